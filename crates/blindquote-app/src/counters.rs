// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{CountedAccessory, InvalidStateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessoryCounts {
    pub winder: u32,
    pub motor: u32,
    pub remote: u32,
    pub charger: u32,
    pub cord: u32,
}

impl AccessoryCounts {
    pub const fn get(&self, kind: CountedAccessory) -> u32 {
        match kind {
            CountedAccessory::Winder => self.winder,
            CountedAccessory::Motor => self.motor,
            CountedAccessory::Remote => self.remote,
            CountedAccessory::Charger => self.charger,
            CountedAccessory::Cord => self.cord,
        }
    }

    pub fn set(&mut self, kind: CountedAccessory, value: u32) {
        let slot = match kind {
            CountedAccessory::Winder => &mut self.winder,
            CountedAccessory::Motor => &mut self.motor,
            CountedAccessory::Remote => &mut self.remote,
            CountedAccessory::Charger => &mut self.charger,
            CountedAccessory::Cord => &mut self.cord,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDraft {
    pub kind: CountedAccessory,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterEditor {
    draft: Option<CounterDraft>,
}

impl CounterEditor {
    pub fn active(&self) -> Option<CounterDraft> {
        self.draft
    }

    pub fn is_editing(&self, kind: CountedAccessory) -> bool {
        self.draft.is_some_and(|draft| draft.kind == kind)
    }

    pub fn enter(&mut self, kind: CountedAccessory, current: u32) -> Result<bool, InvalidStateError> {
        match self.draft {
            Some(draft) if draft.kind == kind => Ok(false),
            Some(_) => Err(InvalidStateError::new(
                "start another counter",
                "a counter is being edited",
            )),
            None => {
                self.draft = Some(CounterDraft {
                    kind,
                    value: current,
                });
                Ok(true)
            }
        }
    }

    pub fn increment(&mut self) -> Result<CounterDraft, InvalidStateError> {
        self.adjust(|value| value.saturating_add(1))
    }

    pub fn decrement(&mut self) -> Result<CounterDraft, InvalidStateError> {
        self.adjust(|value| value.saturating_sub(1))
    }

    pub fn exit(&mut self) -> Option<CounterDraft> {
        self.draft.take()
    }

    pub fn reset(&mut self) {
        self.draft = None;
    }

    fn adjust(&mut self, step: impl FnOnce(u32) -> u32) -> Result<CounterDraft, InvalidStateError> {
        let draft = self
            .draft
            .as_mut()
            .ok_or(InvalidStateError::new("change a count", "no counter is active"))?;
        draft.value = step(draft.value);
        Ok(*draft)
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessoryCounts, CounterEditor};
    use crate::CountedAccessory;

    #[test]
    fn counts_get_and_set_by_kind() {
        let mut counts = AccessoryCounts::default();
        for (value, kind) in CountedAccessory::ALL.into_iter().enumerate() {
            counts.set(kind, value as u32 + 1);
        }
        assert_eq!(counts.get(CountedAccessory::Winder), 1);
        assert_eq!(counts.get(CountedAccessory::Cord), 5);
    }

    #[test]
    fn draft_starts_from_current_and_commits_on_exit() {
        let mut editor = CounterEditor::default();
        assert_eq!(editor.enter(CountedAccessory::Remote, 2), Ok(true));
        for _ in 0..3 {
            editor.increment().expect("increment while editing");
        }
        let draft = editor.exit().expect("draft from active counter");
        assert_eq!(draft.kind, CountedAccessory::Remote);
        assert_eq!(draft.value, 5);
        assert!(editor.active().is_none());
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut editor = CounterEditor::default();
        editor
            .enter(CountedAccessory::Cord, 0)
            .expect("enter cord counter");
        assert_eq!(editor.decrement().expect("decrement").value, 0);
    }

    #[test]
    fn changes_without_active_counter_are_rejected() {
        let mut editor = CounterEditor::default();
        assert!(editor.increment().is_err());
        assert!(editor.decrement().is_err());
        assert!(editor.exit().is_none());
    }

    #[test]
    fn only_one_counter_at_a_time() {
        let mut editor = CounterEditor::default();
        editor
            .enter(CountedAccessory::Winder, 0)
            .expect("enter winder counter");
        assert_eq!(editor.enter(CountedAccessory::Winder, 7), Ok(false));
        assert!(editor.enter(CountedAccessory::Motor, 0).is_err());
        assert!(editor.is_editing(CountedAccessory::Winder));
        assert_eq!(editor.active().map(|draft| draft.value), Some(0));
    }
}
