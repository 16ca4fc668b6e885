// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{
    Axis, DimensionLimits, Drive, FabricType, RowId, ValidationError, ValidationResult,
    validate_dimension,
};

// mm²; larger rows get an HD winder unless motorised.
pub const HD_WINDER_AREA_THRESHOLD: f64 = 4_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub id: RowId,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fabric_type: Option<FabricType>,
    pub drive: Option<Drive>,
    pub dual_marked: bool,
}

impl QuoteRow {
    fn empty(id: RowId) -> Self {
        Self {
            id,
            width: None,
            height: None,
            fabric_type: None,
            drive: None,
            dual_marked: false,
        }
    }

    pub fn dimensions(&self) -> Option<(f64, f64)> {
        match (self.width, self.height) {
            (Some(width), Some(height)) if width > 0.0 && height > 0.0 => Some((width, height)),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.dimensions().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.fabric_type.is_none()
    }

    pub fn area(&self) -> Option<f64> {
        self.dimensions().map(|(width, height)| width * height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingIssue {
    OddCount { count: usize },
    NotAdjacent { first: usize, second: usize },
}

impl std::fmt::Display for PairingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OddCount { count } => write!(
                f,
                "{count} rows are marked for dual brackets; the count should be even"
            ),
            Self::NotAdjacent { first, second } => write!(
                f,
                "dual brackets on rows {} and {} are not adjacent",
                first + 1,
                second + 1
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DriveTally {
    pub winders: u32,
    pub motors: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteLedger {
    rows: Vec<QuoteRow>,
    next_id: i64,
    limits: DimensionLimits,
}

impl QuoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: DimensionLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> DimensionLimits {
        self.limits
    }

    pub fn rows(&self) -> &[QuoteRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> ValidationResult<&QuoteRow> {
        self.rows.get(index).ok_or(ValidationError::UnknownRow {
            index,
            len: self.rows.len(),
        })
    }

    pub fn row_by_id(&self, id: RowId) -> Option<&QuoteRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn add_row(&mut self) -> usize {
        let id = self.allocate_id();
        self.rows.push(QuoteRow::empty(id));
        self.rows.len() - 1
    }

    pub fn insert_row_after(&mut self, index: usize) -> ValidationResult<usize> {
        self.row(index)?;
        let id = self.allocate_id();
        self.rows.insert(index + 1, QuoteRow::empty(id));
        Ok(index + 1)
    }

    pub fn remove_row(&mut self, index: usize) -> ValidationResult<QuoteRow> {
        self.row(index)?;
        Ok(self.rows.remove(index))
    }

    pub fn clear_row(&mut self, index: usize) -> ValidationResult<RowId> {
        let row = self.row_mut(index)?;
        *row = QuoteRow::empty(row.id);
        Ok(row.id)
    }

    pub fn set_dimension(&mut self, index: usize, axis: Axis, value: f64) -> ValidationResult<bool> {
        let value = validate_dimension(axis, value, self.limits.for_axis(axis))?;
        let row = self.row_mut(index)?;
        match axis {
            Axis::Width => row.width = Some(value),
            Axis::Height => row.height = Some(value),
        }

        let oversized = row
            .area()
            .is_some_and(|area| area > HD_WINDER_AREA_THRESHOLD);
        if oversized && row.drive.is_none() {
            row.drive = Some(Drive::Winder);
            return Ok(true);
        }
        Ok(false)
    }

    pub fn set_fabric_type(
        &mut self,
        index: usize,
        fabric: Option<FabricType>,
    ) -> ValidationResult<()> {
        self.row_mut(index)?.fabric_type = fabric;
        Ok(())
    }

    pub fn cycle_fabric_type(&mut self, index: usize) -> ValidationResult<FabricType> {
        let row = self.row_mut(index)?;
        if row.width.is_none() && row.height.is_none() {
            return Err(ValidationError::EmptyRow { index });
        }
        let next = FabricType::cycle(row.fabric_type);
        row.fabric_type = Some(next);
        Ok(next)
    }

    pub fn set_drive(&mut self, index: usize, drive: Option<Drive>) -> ValidationResult<()> {
        self.row_mut(index)?.drive = drive;
        Ok(())
    }

    // Ids keep counting up so stale ids never resolve.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn marked_ids(&self) -> BTreeSet<RowId> {
        self.rows
            .iter()
            .filter(|row| row.dual_marked)
            .map(|row| row.id)
            .collect()
    }

    // Ids that no longer resolve are ignored.
    pub(crate) fn commit_dual_marks(&mut self, selected: &BTreeSet<RowId>) -> usize {
        let mut marked = 0;
        for row in &mut self.rows {
            row.dual_marked = selected.contains(&row.id);
            marked += usize::from(row.dual_marked);
        }
        marked
    }

    pub fn valid_dual_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.dual_marked && row.is_valid())
            .count()
    }

    pub fn dual_pairing_issues(&self) -> Vec<PairingIssue> {
        let marked = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.dual_marked)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        let mut issues = Vec::new();
        if marked.len() % 2 != 0 {
            issues.push(PairingIssue::OddCount {
                count: marked.len(),
            });
        }
        for pair in marked.chunks_exact(2) {
            if pair[1] != pair[0] + 1 {
                issues.push(PairingIssue::NotAdjacent {
                    first: pair[0],
                    second: pair[1],
                });
            }
        }
        issues
    }

    pub fn drive_tally(&self) -> DriveTally {
        let mut tally = DriveTally::default();
        for row in self.rows.iter().filter(|row| row.is_valid()) {
            match row.drive {
                Some(Drive::Winder) => tally.winders += 1,
                Some(Drive::Motor) => tally.motors += 1,
                None => {}
            }
        }
        tally
    }

    fn row_mut(&mut self, index: usize) -> ValidationResult<&mut QuoteRow> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(ValidationError::UnknownRow { index, len })
    }

    fn allocate_id(&mut self) -> RowId {
        self.next_id += 1;
        RowId::new(self.next_id)
    }
}
