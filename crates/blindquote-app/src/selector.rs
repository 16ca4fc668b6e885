// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::{AccessoryKind, InvalidStateError, RowId, SelectorState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCommit {
    pub kind: AccessoryKind,
    pub rows: BTreeSet<RowId>,
}

// Toggles stay in scratch until exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorySelector {
    kind: AccessoryKind,
    state: SelectorState,
    scratch: BTreeSet<RowId>,
}

impl AccessorySelector {
    pub fn new(kind: AccessoryKind) -> Self {
        Self {
            kind,
            state: SelectorState::Inactive,
            scratch: BTreeSet::new(),
        }
    }

    pub fn dual() -> Self {
        Self::new(AccessoryKind::Dual)
    }

    pub fn kind(&self) -> AccessoryKind {
        self.kind
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        self.state == SelectorState::Selecting
    }

    pub fn enter(&mut self, committed: BTreeSet<RowId>) -> bool {
        if self.is_selecting() {
            return false;
        }
        self.state = SelectorState::Selecting;
        self.scratch = committed;
        true
    }

    pub fn ensure_selecting(&self) -> Result<(), InvalidStateError> {
        if !self.is_selecting() {
            return Err(InvalidStateError::new(
                "toggle a row",
                "the selector is inactive",
            ));
        }
        Ok(())
    }

    pub fn toggle(&mut self, id: RowId) -> Result<bool, InvalidStateError> {
        self.ensure_selecting()?;
        if self.scratch.remove(&id) {
            return Ok(false);
        }
        self.scratch.insert(id);
        Ok(true)
    }

    pub fn exit(&mut self) -> Option<SelectionCommit> {
        if !self.is_selecting() {
            return None;
        }
        self.state = SelectorState::Inactive;
        Some(SelectionCommit {
            kind: self.kind,
            rows: std::mem::take(&mut self.scratch),
        })
    }

    pub fn shows_selected(&self, id: RowId, committed: bool) -> bool {
        if self.is_selecting() {
            return self.scratch.contains(&id);
        }
        committed
    }

    pub fn pending(&self) -> &BTreeSet<RowId> {
        &self.scratch
    }

    pub fn forget(&mut self, id: RowId) {
        self.scratch.remove(&id);
    }

    pub fn reset(&mut self) {
        self.state = SelectorState::Inactive;
        self.scratch.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::AccessorySelector;
    use crate::{AccessoryKind, RowId, SelectorState};
    use std::collections::BTreeSet;

    #[test]
    fn toggle_requires_selecting_state() {
        let mut selector = AccessorySelector::dual();
        let error = selector.toggle(RowId::new(1)).expect_err("inactive toggle");
        assert_eq!(error.operation, "toggle a row");
        assert!(selector.pending().is_empty());
    }

    #[test]
    fn enter_is_noop_while_selecting() {
        let mut selector = AccessorySelector::dual();
        assert!(selector.enter(BTreeSet::new()));
        selector.toggle(RowId::new(1)).expect("toggle while selecting");
        assert!(!selector.enter(BTreeSet::from([RowId::new(9)])));
        assert_eq!(selector.pending(), &BTreeSet::from([RowId::new(1)]));
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selector = AccessorySelector::dual();
        selector.enter(BTreeSet::new());
        assert_eq!(selector.toggle(RowId::new(2)), Ok(true));
        assert_eq!(selector.toggle(RowId::new(2)), Ok(false));
        assert!(selector.pending().is_empty());
    }

    #[test]
    fn exit_hands_back_selection_and_goes_inactive() {
        let mut selector = AccessorySelector::dual();
        selector.enter(BTreeSet::from([RowId::new(1)]));
        selector.toggle(RowId::new(2)).expect("toggle while selecting");

        let commit = selector.exit().expect("commit from running pass");
        assert_eq!(commit.kind, AccessoryKind::Dual);
        assert_eq!(commit.rows, BTreeSet::from([RowId::new(1), RowId::new(2)]));
        assert_eq!(selector.state(), SelectorState::Inactive);
        assert!(selector.exit().is_none());
    }

    #[test]
    fn view_projection_follows_state() {
        let mut selector = AccessorySelector::dual();
        let id = RowId::new(4);
        assert!(selector.shows_selected(id, true));
        selector.enter(BTreeSet::new());
        assert!(!selector.shows_selected(id, true));
        selector.toggle(id).expect("toggle while selecting");
        assert!(selector.shows_selected(id, false));
    }

    #[test]
    fn forget_and_reset_drop_scratch() {
        let mut selector = AccessorySelector::dual();
        selector.enter(BTreeSet::from([RowId::new(1), RowId::new(2)]));
        selector.forget(RowId::new(1));
        assert_eq!(selector.pending(), &BTreeSet::from([RowId::new(2)]));
        selector.reset();
        assert!(!selector.is_selecting());
        assert!(selector.pending().is_empty());
    }
}
