// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cell::OnceCell;
use tracing::{debug, warn};

use crate::{
    AccessoryCounts, AccessorySelector, Axis, ChannelQuantities, CountedAccessory, CounterDraft,
    CounterEditor, DimensionLimits, Drive, EngineResult, FabricType, InvalidStateError,
    PriceMatrices, PriceTable, QuoteLedger, QuoteMeta, QuoteTotals, RemoteDistribution, RowId,
    SelectorState, ValidationResult, aggregate,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteSettings {
    pub prices: PriceTable,
    pub matrices: PriceMatrices,
    pub limits: DimensionLimits,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuoteCommand {
    AddRow,
    InsertRowAfter(usize),
    RemoveRow(usize),
    ClearRow(usize),
    SetDimension {
        index: usize,
        axis: Axis,
        value: f64,
    },
    SetFabricType {
        index: usize,
        fabric: Option<FabricType>,
    },
    CycleFabricType(usize),
    SetDrive {
        index: usize,
        drive: Option<Drive>,
    },
    EnterDualSelection,
    ToggleDualRow(usize),
    ExitDualSelection,
    EnterCounter(CountedAccessory),
    IncrementCounter,
    DecrementCounter,
    ExitCounter,
    SetCount {
        kind: CountedAccessory,
        value: u32,
    },
    SyncDriveCounts,
    CommitDistribution(ChannelQuantities),
    ClearLedger,
}

impl QuoteCommand {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddRow => "add_row",
            Self::InsertRowAfter(_) => "insert_row_after",
            Self::RemoveRow(_) => "remove_row",
            Self::ClearRow(_) => "clear_row",
            Self::SetDimension { .. } => "set_dimension",
            Self::SetFabricType { .. } => "set_fabric_type",
            Self::CycleFabricType(_) => "cycle_fabric_type",
            Self::SetDrive { .. } => "set_drive",
            Self::EnterDualSelection => "enter_dual_selection",
            Self::ToggleDualRow(_) => "toggle_dual_row",
            Self::ExitDualSelection => "exit_dual_selection",
            Self::EnterCounter(_) => "enter_counter",
            Self::IncrementCounter => "increment_counter",
            Self::DecrementCounter => "decrement_counter",
            Self::ExitCounter => "exit_counter",
            Self::SetCount { .. } => "set_count",
            Self::SyncDriveCounts => "sync_drive_counts",
            Self::CommitDistribution(_) => "commit_distribution",
            Self::ClearLedger => "clear_ledger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteEvent {
    RowAdded { index: usize, id: RowId },
    RowRemoved { index: usize, id: RowId },
    RowCleared { index: usize, id: RowId },
    RowUpdated { index: usize, id: RowId },
    WinderAssigned { index: usize, id: RowId },
    FabricChanged { index: usize, fabric: Option<FabricType> },
    SelectionChanged(SelectorState),
    RowToggled { index: usize, selected: bool },
    DualMarksCommitted { marked: usize },
    CounterChanged(CounterDraft),
    CountCommitted { kind: CountedAccessory, value: u32 },
    DistributionDiscarded { declared_total: u32 },
    DistributionCommitted { declared_total: u32 },
    LedgerCleared,
    RecomputeRequested,
}

#[derive(Debug, Clone)]
pub struct QuoteSession {
    ledger: QuoteLedger,
    dual: AccessorySelector,
    counter: CounterEditor,
    counts: AccessoryCounts,
    remotes: RemoteDistribution,
    prices: PriceTable,
    matrices: PriceMatrices,
    meta: Option<QuoteMeta>,
    totals: OnceCell<QuoteTotals>,
}

impl Default for QuoteSession {
    fn default() -> Self {
        Self::new(QuoteSettings::default())
    }
}

impl QuoteSession {
    pub fn new(settings: QuoteSettings) -> Self {
        Self {
            ledger: QuoteLedger::with_limits(settings.limits),
            dual: AccessorySelector::dual(),
            counter: CounterEditor::default(),
            counts: AccessoryCounts::default(),
            remotes: RemoteDistribution::default(),
            prices: settings.prices,
            matrices: settings.matrices,
            meta: None,
            totals: OnceCell::new(),
        }
    }

    pub fn with_meta(mut self, meta: QuoteMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn meta(&self) -> Option<QuoteMeta> {
        self.meta
    }

    pub fn ledger(&self) -> &QuoteLedger {
        &self.ledger
    }

    pub fn dual(&self) -> &AccessorySelector {
        &self.dual
    }

    pub fn counter(&self) -> &CounterEditor {
        &self.counter
    }

    pub fn counts(&self) -> &AccessoryCounts {
        &self.counts
    }

    pub fn remotes(&self) -> &RemoteDistribution {
        &self.remotes
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub fn is_row_selected(&self, index: usize) -> ValidationResult<bool> {
        let row = self.ledger.row(index)?;
        Ok(self.dual.shows_selected(row.id, row.dual_marked))
    }

    pub fn distribution_prompt(&self) -> String {
        self.remotes.prompt()
    }

    pub fn totals(&self) -> &QuoteTotals {
        self.totals.get_or_init(|| {
            debug!(rows = self.ledger.len(), "recomputing quote totals");
            aggregate(
                &self.ledger,
                &self.counts,
                &self.remotes,
                &self.prices,
                &self.matrices,
            )
        })
    }

    pub fn dispatch(&mut self, command: QuoteCommand) -> EngineResult<Vec<QuoteEvent>> {
        let name = command.name();
        let result = self.apply(command);
        match &result {
            Ok(events) => {
                if events.contains(&QuoteEvent::RecomputeRequested) {
                    self.totals.take();
                }
                debug!(command = name, events = events.len(), "applied quote command");
            }
            Err(error) => warn!(command = name, %error, "rejected quote command"),
        }
        result
    }

    fn apply(&mut self, command: QuoteCommand) -> EngineResult<Vec<QuoteEvent>> {
        match command {
            QuoteCommand::AddRow => {
                let index = self.ledger.add_row();
                let id = self.ledger.row(index)?.id;
                Ok(changed(vec![QuoteEvent::RowAdded { index, id }]))
            }
            QuoteCommand::InsertRowAfter(after) => {
                let index = self.ledger.insert_row_after(after)?;
                let id = self.ledger.row(index)?.id;
                Ok(changed(vec![QuoteEvent::RowAdded { index, id }]))
            }
            QuoteCommand::RemoveRow(index) => {
                let removed = self.ledger.remove_row(index)?;
                self.dual.forget(removed.id);
                Ok(changed(vec![QuoteEvent::RowRemoved {
                    index,
                    id: removed.id,
                }]))
            }
            QuoteCommand::ClearRow(index) => {
                let id = self.ledger.clear_row(index)?;
                self.dual.forget(id);
                Ok(changed(vec![QuoteEvent::RowCleared { index, id }]))
            }
            QuoteCommand::SetDimension { index, axis, value } => {
                let winder = self.ledger.set_dimension(index, axis, value)?;
                let id = self.ledger.row(index)?.id;
                let mut events = vec![QuoteEvent::RowUpdated { index, id }];
                if winder {
                    events.push(QuoteEvent::WinderAssigned { index, id });
                }
                Ok(changed(events))
            }
            QuoteCommand::SetFabricType { index, fabric } => {
                self.ledger.set_fabric_type(index, fabric)?;
                Ok(changed(vec![QuoteEvent::FabricChanged { index, fabric }]))
            }
            QuoteCommand::CycleFabricType(index) => {
                let fabric = self.ledger.cycle_fabric_type(index)?;
                Ok(changed(vec![QuoteEvent::FabricChanged {
                    index,
                    fabric: Some(fabric),
                }]))
            }
            QuoteCommand::SetDrive { index, drive } => {
                self.ledger.set_drive(index, drive)?;
                let id = self.ledger.row(index)?.id;
                Ok(changed(vec![QuoteEvent::RowUpdated { index, id }]))
            }
            QuoteCommand::EnterDualSelection => {
                if !self.dual.enter(self.ledger.marked_ids()) {
                    return Ok(Vec::new());
                }
                Ok(vec![QuoteEvent::SelectionChanged(self.dual.state())])
            }
            QuoteCommand::ToggleDualRow(index) => {
                self.dual.ensure_selecting()?;
                let id = self.ledger.row(index)?.id;
                let selected = self.dual.toggle(id)?;
                Ok(vec![QuoteEvent::RowToggled { index, selected }])
            }
            QuoteCommand::ExitDualSelection => {
                let Some(commit) = self.dual.exit() else {
                    return Ok(Vec::new());
                };
                let marked = self.ledger.commit_dual_marks(&commit.rows);
                debug!(marked, "committed dual selection");
                Ok(changed(vec![
                    QuoteEvent::SelectionChanged(self.dual.state()),
                    QuoteEvent::DualMarksCommitted { marked },
                ]))
            }
            QuoteCommand::EnterCounter(kind) => {
                if !self.counter.enter(kind, self.counts.get(kind))? {
                    return Ok(Vec::new());
                }
                Ok(self
                    .counter
                    .active()
                    .map(QuoteEvent::CounterChanged)
                    .into_iter()
                    .collect())
            }
            QuoteCommand::IncrementCounter => {
                let draft = self.counter.increment()?;
                Ok(vec![QuoteEvent::CounterChanged(draft)])
            }
            QuoteCommand::DecrementCounter => {
                let draft = self.counter.decrement()?;
                Ok(vec![QuoteEvent::CounterChanged(draft)])
            }
            QuoteCommand::ExitCounter => {
                let Some(draft) = self.counter.exit() else {
                    return Ok(Vec::new());
                };
                Ok(changed(self.commit_count(draft.kind, draft.value)))
            }
            QuoteCommand::SetCount { kind, value } => {
                if self.counter.is_editing(kind) {
                    return Err(InvalidStateError::new(
                        "set a count",
                        "that counter is being edited",
                    )
                    .into());
                }
                Ok(changed(self.commit_count(kind, value)))
            }
            QuoteCommand::SyncDriveCounts => {
                if self.counter.is_editing(CountedAccessory::Winder)
                    || self.counter.is_editing(CountedAccessory::Motor)
                {
                    return Err(InvalidStateError::new(
                        "sync drive counts",
                        "a drive counter is being edited",
                    )
                    .into());
                }
                let tally = self.ledger.drive_tally();
                let mut events = self.commit_count(CountedAccessory::Winder, tally.winders);
                events.extend(self.commit_count(CountedAccessory::Motor, tally.motors));
                Ok(changed(events))
            }
            QuoteCommand::CommitDistribution(proposed) => {
                self.remotes.commit(proposed)?;
                Ok(changed(vec![QuoteEvent::DistributionCommitted {
                    declared_total: self.remotes.declared_total(),
                }]))
            }
            QuoteCommand::ClearLedger => {
                self.ledger.clear();
                self.dual.reset();
                self.counter.reset();
                self.counts = AccessoryCounts::default();
                self.remotes.reset();
                Ok(changed(vec![QuoteEvent::LedgerCleared]))
            }
        }
    }

    fn commit_count(&mut self, kind: CountedAccessory, value: u32) -> Vec<QuoteEvent> {
        self.counts.set(kind, value);
        let mut events = vec![QuoteEvent::CountCommitted { kind, value }];
        if kind == CountedAccessory::Remote && self.remotes.declare_total(value) {
            debug!(declared_total = value, "discarded stale remote distribution");
            events.push(QuoteEvent::DistributionDiscarded {
                declared_total: value,
            });
        }
        events
    }
}

fn changed(mut events: Vec<QuoteEvent>) -> Vec<QuoteEvent> {
    events.push(QuoteEvent::RecomputeRequested);
    events
}
