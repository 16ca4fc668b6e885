// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use blindquote_app::{
    Axis, ChannelQuantities, ChannelType, CountedAccessory, Drive, FabricType, QuoteCommand,
    QuoteEvent, QuoteSession, ValidationError, parse_dimension, parse_quantity,
};
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::report;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptAction {
    Engine(QuoteCommand),
    Show,
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub lines: usize,
    pub applied: usize,
    pub rejected: usize,
}

pub struct ScriptRuntime {
    session: QuoteSession,
}

impl ScriptRuntime {
    pub fn new(session: QuoteSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &QuoteSession {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();
        for (number, line) in input.lines().enumerate() {
            let line = line.context("read script line")?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            stats.lines += 1;
            match self.execute(trimmed, out) {
                Ok(()) => stats.applied += 1,
                Err(error) => {
                    stats.rejected += 1;
                    debug!(line = number + 1, %error, "script line rejected");
                    writeln!(out, "error: line {}: {error:#}", number + 1)
                        .context("write script output")?;
                }
            }
        }
        info!(
            lines = stats.lines,
            rejected = stats.rejected,
            "script finished"
        );
        Ok(stats)
    }

    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        match parse_line(line)? {
            ScriptAction::Show => {
                write!(out, "{}", report::render_table(&self.session)?)
                    .context("write summary")?;
            }
            ScriptAction::Prompt => {
                writeln!(out, "{}", self.session.distribution_prompt())
                    .context("write prompt")?;
            }
            ScriptAction::Engine(command) => {
                let events = self.session.dispatch(command)?;
                self.report_events(&events, out)?;
            }
        }
        Ok(())
    }

    fn report_events<W: Write>(&self, events: &[QuoteEvent], out: &mut W) -> Result<()> {
        for event in events {
            match event {
                QuoteEvent::DistributionDiscarded { declared_total } => writeln!(
                    out,
                    "note: remote split cleared; distribute {declared_total} remotes again"
                )?,
                QuoteEvent::WinderAssigned { index, .. } => {
                    writeln!(out, "note: row {} gets an HD winder", index + 1)?
                }
                QuoteEvent::DualMarksCommitted { .. } => {
                    for issue in self.session.ledger().dual_pairing_issues() {
                        writeln!(out, "warning: {issue}")?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

pub fn parse_line(line: &str) -> Result<ScriptAction> {
    let words = line.split_whitespace().collect::<Vec<_>>();
    let Some((&verb, args)) = words.split_first() else {
        bail!("empty command");
    };

    let command = match (verb, args) {
        ("show", []) => return Ok(ScriptAction::Show),
        ("prompt", []) => return Ok(ScriptAction::Prompt),
        ("add", []) => QuoteCommand::AddRow,
        ("insert", [row]) => QuoteCommand::InsertRowAfter(parse_row(row)?),
        ("remove", [row]) => QuoteCommand::RemoveRow(parse_row(row)?),
        ("clear-row", [row]) => QuoteCommand::ClearRow(parse_row(row)?),
        ("set", [row, axis, value]) => {
            let index = parse_row(row)?;
            let axis = Axis::parse(axis)
                .ok_or_else(|| anyhow!("unknown dimension {axis:?}; use width or height"))?;
            QuoteCommand::SetDimension {
                index,
                axis,
                value: parse_dimension(axis, value)?,
            }
        }
        ("type", [row, "next"]) => QuoteCommand::CycleFabricType(parse_row(row)?),
        ("type", [row, "none"]) => QuoteCommand::SetFabricType {
            index: parse_row(row)?,
            fabric: None,
        },
        ("type", [row, fabric]) => QuoteCommand::SetFabricType {
            index: parse_row(row)?,
            fabric: Some(FabricType::parse(fabric).ok_or_else(|| {
                anyhow!("unknown fabric type {fabric:?}; use B1, B2, B3, B4, B5, SN or next")
            })?),
        },
        ("drive", [row, "none"]) => QuoteCommand::SetDrive {
            index: parse_row(row)?,
            drive: None,
        },
        ("drive", [row, drive]) => QuoteCommand::SetDrive {
            index: parse_row(row)?,
            drive: Some(
                Drive::parse(drive)
                    .ok_or_else(|| anyhow!("unknown drive {drive:?}; use winder, motor or none"))?,
            ),
        },
        ("dual", ["on"]) => QuoteCommand::EnterDualSelection,
        ("dual", ["off"]) => QuoteCommand::ExitDualSelection,
        ("toggle", [row]) => QuoteCommand::ToggleDualRow(parse_row(row)?),
        ("counter", [kind, "on"]) => QuoteCommand::EnterCounter(parse_counted(kind)?),
        ("counter", [_, "off"]) => QuoteCommand::ExitCounter,
        ("+", []) => QuoteCommand::IncrementCounter,
        ("-", []) => QuoteCommand::DecrementCounter,
        ("count", [kind, value]) => QuoteCommand::SetCount {
            kind: parse_counted(kind)?,
            value: parse_quantity(value)?,
        },
        ("sync-drives", []) => QuoteCommand::SyncDriveCounts,
        ("distribute", pairs) if !pairs.is_empty() => {
            QuoteCommand::CommitDistribution(parse_distribution(pairs)?)
        }
        ("clear", []) => QuoteCommand::ClearLedger,
        _ => bail!("unknown command {line:?}; run with --help to see script commands"),
    };
    Ok(ScriptAction::Engine(command))
}

fn parse_row(raw: &str) -> Result<usize> {
    let number = parse_quantity(raw)?;
    if number == 0 {
        bail!("rows are numbered from 1");
    }
    Ok(number as usize - 1)
}

fn parse_counted(raw: &str) -> Result<CountedAccessory> {
    CountedAccessory::parse(raw).ok_or_else(|| {
        anyhow!("unknown counter {raw:?}; use winder, motor, remote, charger or cord")
    })
}

fn parse_distribution(pairs: &[&str]) -> Result<ChannelQuantities> {
    let mut split = ChannelQuantities::new();
    for pair in pairs {
        let (channel, quantity) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected CHANNEL=QTY, got {pair:?}"))?;
        let channel = ChannelType::parse(channel)
            .ok_or_else(|| ValidationError::UnknownChannelType(channel.to_owned()))?;
        if split.insert(channel, parse_quantity(quantity)?).is_some() {
            bail!("channel {} listed twice", channel.as_str());
        }
    }
    Ok(split)
}
