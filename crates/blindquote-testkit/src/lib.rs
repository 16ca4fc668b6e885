// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use blindquote_app::{
    AccessoryCounts, Axis, ChannelQuantities, ChannelType, CountedAccessory, FabricType,
    PriceMatrices, PriceMatrix, PriceTable, QuoteCommand, QuoteMeta, QuoteSession, QuoteSettings,
};
use std::path::PathBuf;
use time::Date;
use time::macros::date;

// Bracket widths and drops (mm) used by the reference matrix.
const MATRIX_WIDTHS: [f64; 6] = [600.0, 900.0, 1200.0, 1500.0, 1800.0, 2400.0];
const MATRIX_DROPS: [f64; 4] = [1000.0, 1500.0, 2000.0, 2600.0];

const MIN_DIMENSION_MM: i64 = 300;
const MAX_DIMENSION_MM: i64 = 2400;
const MAX_COUNT: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeRow {
    pub width: f64,
    pub height: f64,
    pub fabric: Option<FabricType>,
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

#[derive(Debug, Clone)]
pub struct QuoteFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl QuoteFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn row(&mut self) -> FakeRow {
        let fabric = if self.rng.bool() {
            Some(FabricType::SEQUENCE[self.rng.int_n(FabricType::SEQUENCE.len())])
        } else {
            None
        };
        FakeRow {
            width: self.int_range_i64(MIN_DIMENSION_MM, MAX_DIMENSION_MM) as f64,
            height: self.int_range_i64(MIN_DIMENSION_MM, MAX_DIMENSION_MM) as f64,
            fabric,
        }
    }

    pub fn counts(&mut self) -> AccessoryCounts {
        let mut counts = AccessoryCounts::default();
        for kind in CountedAccessory::ALL {
            counts.set(kind, self.int_range_i64(0, MAX_COUNT) as u32);
        }
        counts
    }

    pub fn remote_split(&mut self, total: u32) -> ChannelQuantities {
        let one = self.int_range_i64(0, i64::from(total)) as u32;
        ChannelQuantities::from([
            (ChannelType::OneChannel, one),
            (ChannelType::SixteenChannel, total - one),
        ])
    }

    pub fn session(&mut self, settings: QuoteSettings, rows: usize) -> Result<QuoteSession> {
        let mut session = QuoteSession::new(settings);
        for index in 0..rows {
            let row = self.row();
            session
                .dispatch(QuoteCommand::AddRow)
                .context("add faker row")?;
            for (axis, value) in [(Axis::Width, row.width), (Axis::Height, row.height)] {
                session
                    .dispatch(QuoteCommand::SetDimension { index, axis, value })
                    .with_context(|| format!("set {} on faker row {}", axis.as_str(), index + 1))?;
            }
            session
                .dispatch(QuoteCommand::SetFabricType {
                    index,
                    fabric: row.fabric,
                })
                .context("set faker fabric")?;
        }
        Ok(session)
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let config_path = dir.path().join("config.toml");
    Ok((dir, config_path))
}

pub fn fixture_date() -> Date {
    date!(2026 - 02 - 19)
}

pub fn reference_meta() -> QuoteMeta {
    QuoteMeta::issued(fixture_date(), 14)
}

pub fn reference_prices() -> PriceTable {
    PriceTable::default()
}

pub fn reference_matrix() -> PriceMatrix {
    let prices = (0..MATRIX_DROPS.len() as i64)
        .map(|drop| {
            (0..MATRIX_WIDTHS.len() as i64)
                .map(|width| 9_500 + width * 2_000 + drop * 3_500)
                .collect::<Vec<_>>()
        })
        .collect();
    PriceMatrix {
        widths: MATRIX_WIDTHS.to_vec(),
        drops: MATRIX_DROPS.to_vec(),
        prices,
    }
}

pub fn reference_settings() -> QuoteSettings {
    let mut matrices = PriceMatrices::default();
    for fabric in FabricType::SEQUENCE {
        matrices.insert(fabric, reference_matrix());
    }
    QuoteSettings {
        prices: reference_prices(),
        matrices,
        ..QuoteSettings::default()
    }
}
