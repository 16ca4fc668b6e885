// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::{
    AccessoryCounts, AccessoryKind, ChannelType, PriceFormat, PriceKey, PriceMatrices,
    PriceTable, QuoteLedger, RemoteDistribution, RowId, format_price,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelLine {
    pub channel: ChannelType,
    pub quantity: u32,
    pub unit_cents: i64,
    pub total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPrice {
    pub kind: AccessoryKind,
    pub quantity: u64,
    pub unit_cents: Option<i64>,
    pub total_cents: i64,
    pub format: PriceFormat,
    pub channels: Vec<ChannelLine>,
}

impl CategoryPrice {
    pub fn display(&self) -> String {
        format_price(self.total_cents, self.format)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinePrice {
    pub row: RowId,
    pub index: usize,
    pub base_cents: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteTotals {
    pub categories: Vec<CategoryPrice>,
    pub accessories_total_cents: i64,
    pub lines: Vec<LinePrice>,
    pub items_total_cents: i64,
    pub grand_total_cents: i64,
    pub first_error: Option<String>,
    pub undistributed_remotes: u32,
}

impl QuoteTotals {
    pub fn category(&self, kind: AccessoryKind) -> Option<&CategoryPrice> {
        self.categories.iter().find(|category| category.kind == kind)
    }

    pub fn category_cents(&self, kind: AccessoryKind) -> i64 {
        self.category(kind)
            .map(|category| category.total_cents)
            .unwrap_or(0)
    }

    pub fn category_display(&self, kind: AccessoryKind) -> String {
        format_price(self.category_cents(kind), kind.price_format())
    }
}

pub fn aggregate(
    ledger: &QuoteLedger,
    counts: &AccessoryCounts,
    remotes: &RemoteDistribution,
    prices: &PriceTable,
    matrices: &PriceMatrices,
) -> QuoteTotals {
    let categories = AccessoryKind::ALL
        .into_iter()
        .map(|kind| price_category(kind, ledger, counts, remotes, prices))
        .collect::<Vec<_>>();
    let accessories_total_cents = categories
        .iter()
        .fold(0_i64, |sum, category| sum.saturating_add(category.total_cents));

    let lines = price_lines(ledger, matrices);
    let items_total_cents = lines
        .iter()
        .filter_map(|line| line.base_cents)
        .fold(0_i64, i64::saturating_add);
    let first_error = lines.iter().find_map(|line| {
        line.error
            .as_ref()
            .map(|error| format!("Row {}: {error}", line.index + 1))
    });

    QuoteTotals {
        categories,
        accessories_total_cents,
        lines,
        items_total_cents,
        grand_total_cents: items_total_cents.saturating_add(accessories_total_cents),
        first_error,
        undistributed_remotes: remotes.undistributed(),
    }
}

fn price_category(
    kind: AccessoryKind,
    ledger: &QuoteLedger,
    counts: &AccessoryCounts,
    remotes: &RemoteDistribution,
    prices: &PriceTable,
) -> CategoryPrice {
    let format = kind.price_format();
    let Some(key) = PriceKey::for_accessory(kind) else {
        let channels = price_channels(remotes, prices);
        return CategoryPrice {
            kind,
            quantity: channels.iter().map(|line| u64::from(line.quantity)).sum(),
            unit_cents: None,
            total_cents: channels
                .iter()
                .fold(0_i64, |sum, line| sum.saturating_add(line.total_cents)),
            format,
            channels,
        };
    };

    // Dual brackets are sold in pairs; an unmatched row adds nothing.
    let quantity = match kind.counted() {
        Some(counted) => u64::from(counts.get(counted)),
        None => (ledger.valid_dual_count() / 2) as u64,
    };
    let unit_cents = prices.unit_cents(key);
    CategoryPrice {
        kind,
        quantity,
        unit_cents: Some(unit_cents),
        total_cents: times(unit_cents, quantity),
        format,
        channels: Vec::new(),
    }
}

fn price_channels(remotes: &RemoteDistribution, prices: &PriceTable) -> Vec<ChannelLine> {
    let Some(committed) = remotes.by_channel_type() else {
        return Vec::new();
    };
    committed
        .iter()
        .map(|(channel, quantity)| {
            let unit_cents = prices.channel_unit_cents(*channel);
            ChannelLine {
                channel: *channel,
                quantity: *quantity,
                unit_cents,
                total_cents: times(unit_cents, u64::from(*quantity)),
            }
        })
        .collect()
}

fn price_lines(ledger: &QuoteLedger, matrices: &PriceMatrices) -> Vec<LinePrice> {
    if matrices.is_empty() {
        return Vec::new();
    }
    ledger
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let priced = matrices.price_row(row)?;
            let (base_cents, error) = match priced {
                Ok(cents) => (Some(cents), None),
                Err(error) => (None, Some(error.to_string())),
            };
            Some(LinePrice {
                row: row.id,
                index,
                base_cents,
                error,
            })
        })
        .collect()
}

fn times(unit_cents: i64, quantity: u64) -> i64 {
    let quantity = i64::try_from(quantity).unwrap_or(i64::MAX);
    unit_cents.saturating_mul(quantity)
}
