// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use blindquote_app::{QuoteSession, QuoteTotals, format_cents};
use serde::Serialize;
use std::collections::BTreeMap;
use time::Date;
use time::macros::format_description;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    issued_on: Option<String>,
    due_on: Option<String>,
    rows: Vec<JsonRow>,
    totals: &'a QuoteTotals,
    display: JsonDisplay,
    pairing_issues: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonRow {
    number: usize,
    width: Option<f64>,
    height: Option<f64>,
    fabric: Option<&'static str>,
    drive: Option<&'static str>,
    dual: bool,
    valid: bool,
}

#[derive(Debug, Serialize)]
struct JsonDisplay {
    categories: BTreeMap<&'static str, String>,
    accessories_total: String,
    items_total: String,
    grand_total: String,
}

pub fn format_date(date: Date) -> Result<String> {
    date.format(&format_description!("[year]-[month]-[day]"))
        .context("format quote date")
}

pub fn parse_date(raw: &str) -> Result<Date> {
    Date::parse(raw, &format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("invalid date {raw:?}; use YYYY-MM-DD"))
}

pub fn render_table(session: &QuoteSession) -> Result<String> {
    let totals = session.totals();
    let mut lines = Vec::new();

    if let Some(meta) = session.meta() {
        lines.push(format!(
            "Quote issued {}, due {}",
            format_date(meta.issued_on)?,
            format_date(meta.due_on)?
        ));
    }

    lines.push(format!(
        "{:>3}  {:>7}  {:>7}  {:<4}  {:<6}  {:<4}  {:>12}",
        "Row", "Width", "Height", "Type", "Drive", "Dual", "Base"
    ));
    for (index, row) in session.ledger().rows().iter().enumerate() {
        let base = totals
            .lines
            .iter()
            .find(|line| line.row == row.id)
            .and_then(|line| line.base_cents)
            .map(format_cents)
            .unwrap_or_else(|| "-".to_owned());
        lines.push(format!(
            "{:>3}  {:>7}  {:>7}  {:<4}  {:<6}  {:<4}  {:>12}",
            index + 1,
            dimension(row.width),
            dimension(row.height),
            row.fabric_type.map(|fabric| fabric.as_str()).unwrap_or("-"),
            row.drive.map(|drive| drive.as_str()).unwrap_or("-"),
            dual_flag(session, index),
            base,
        ));
    }

    lines.push(String::new());
    lines.push("Accessories".to_owned());
    for category in &totals.categories {
        let mut line = format!(
            "  {:<8} {:>4}  {:>12}",
            category.kind.as_str(),
            category.quantity,
            category.display()
        );
        if !category.channels.is_empty() {
            let detail = category
                .channels
                .iter()
                .map(|channel| {
                    format!(
                        "{} {} x {} = {}",
                        channel.channel.as_str(),
                        channel.quantity,
                        format_cents(channel.unit_cents),
                        format_cents(channel.total_cents)
                    )
                })
                .collect::<Vec<_>>()
                .join("; ");
            line.push_str(&format!("  ({detail})"));
        }
        lines.push(line);
    }

    lines.push(format!(
        "Accessories total  {}",
        format_cents(totals.accessories_total_cents)
    ));
    lines.push(format!(
        "Items total        {}",
        format_cents(totals.items_total_cents)
    ));
    lines.push(format!(
        "Grand total        {}",
        format_cents(totals.grand_total_cents)
    ));

    if totals.undistributed_remotes > 0 {
        lines.push(format!(
            "note: {} remotes are not distributed yet",
            totals.undistributed_remotes
        ));
    }
    if let Some(error) = &totals.first_error {
        lines.push(format!("error: {error}"));
    }
    for issue in session.ledger().dual_pairing_issues() {
        lines.push(format!("warning: {issue}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

pub fn render_json(session: &QuoteSession) -> Result<String> {
    let totals = session.totals();
    let (issued_on, due_on) = match session.meta() {
        Some(meta) => (
            Some(format_date(meta.issued_on)?),
            Some(format_date(meta.due_on)?),
        ),
        None => (None, None),
    };

    let report = JsonReport {
        issued_on,
        due_on,
        rows: session
            .ledger()
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| JsonRow {
                number: index + 1,
                width: row.width,
                height: row.height,
                fabric: row.fabric_type.map(|fabric| fabric.as_str()),
                drive: row.drive.map(|drive| drive.as_str()),
                dual: row.dual_marked,
                valid: row.is_valid(),
            })
            .collect(),
        totals,
        display: JsonDisplay {
            categories: totals
                .categories
                .iter()
                .map(|category| (category.kind.as_str(), category.display()))
                .collect(),
            accessories_total: format_cents(totals.accessories_total_cents),
            items_total: format_cents(totals.items_total_cents),
            grand_total: format_cents(totals.grand_total_cents),
        },
        pairing_issues: session
            .ledger()
            .dual_pairing_issues()
            .iter()
            .map(ToString::to_string)
            .collect(),
    };
    serde_json::to_string_pretty(&report).context("render quote summary as JSON")
}

fn dimension(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_else(|| "-".to_owned())
}

// "sel" marks a row picked in a selection pass that has not been committed.
fn dual_flag(session: &QuoteSession, index: usize) -> &'static str {
    let selected = session.is_row_selected(index).unwrap_or(false);
    match (selected, session.dual().is_selecting()) {
        (true, true) => "sel",
        (true, false) => "yes",
        _ => "-",
    }
}
