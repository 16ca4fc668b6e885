// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{FabricType, QuoteRow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LinePriceError {
    WidthExceedsMatrix { width: f64 },
    HeightExceedsMatrix { height: f64 },
    MissingMatrix { fabric: FabricType },
    MissingCell,
}

impl std::fmt::Display for LinePriceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WidthExceedsMatrix { width } => write!(
                f,
                "Width {width} exceeds the maximum width in the price matrix."
            ),
            Self::HeightExceedsMatrix { height } => write!(
                f,
                "Height {height} exceeds the maximum height in the price matrix."
            ),
            Self::MissingMatrix { fabric } => write!(
                f,
                "Price matrix not found for fabric type: {}",
                fabric.as_str()
            ),
            Self::MissingCell => f.write_str("Price not found for the given dimensions."),
        }
    }
}

impl std::error::Error for LinePriceError {}

// prices[drop][width], in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceMatrix {
    pub widths: Vec<f64>,
    pub drops: Vec<f64>,
    pub prices: Vec<Vec<i64>>,
}

impl PriceMatrix {
    pub fn line_price(&self, width: f64, height: f64) -> Result<i64, LinePriceError> {
        let width_index = self
            .widths
            .iter()
            .position(|bound| width <= *bound)
            .ok_or(LinePriceError::WidthExceedsMatrix { width })?;
        let drop_index = self
            .drops
            .iter()
            .position(|bound| height <= *bound)
            .ok_or(LinePriceError::HeightExceedsMatrix { height })?;
        self.prices
            .get(drop_index)
            .and_then(|row| row.get(width_index))
            .copied()
            .ok_or(LinePriceError::MissingCell)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceMatrices {
    by_fabric: BTreeMap<FabricType, PriceMatrix>,
}

impl PriceMatrices {
    pub fn insert(&mut self, fabric: FabricType, matrix: PriceMatrix) -> Option<PriceMatrix> {
        self.by_fabric.insert(fabric, matrix)
    }

    pub fn get(&self, fabric: FabricType) -> Option<&PriceMatrix> {
        self.by_fabric.get(&fabric)
    }

    pub fn is_empty(&self) -> bool {
        self.by_fabric.is_empty()
    }

    pub fn price_row(&self, row: &QuoteRow) -> Option<Result<i64, LinePriceError>> {
        let (width, height) = row.dimensions()?;
        let fabric = row.fabric_type?;
        let Some(matrix) = self.get(fabric) else {
            return Some(Err(LinePriceError::MissingMatrix { fabric }));
        };
        Some(matrix.line_price(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::{LinePriceError, PriceMatrix};

    fn matrix() -> PriceMatrix {
        PriceMatrix {
            widths: vec![600.0, 900.0, 1200.0],
            drops: vec![1000.0, 2000.0],
            prices: vec![vec![10_000, 12_000, 14_000], vec![15_000, 17_000, 19_000]],
        }
    }

    #[test]
    fn picks_first_bound_at_or_above_dimension() {
        let matrix = matrix();
        assert_eq!(matrix.line_price(600.0, 1000.0), Ok(10_000));
        assert_eq!(matrix.line_price(601.0, 1000.0), Ok(12_000));
        assert_eq!(matrix.line_price(1200.0, 1500.0), Ok(19_000));
    }

    #[test]
    fn oversized_rows_report_the_axis() {
        let matrix = matrix();
        let error = matrix.line_price(1300.0, 500.0).expect_err("too wide");
        assert_eq!(
            error.to_string(),
            "Width 1300 exceeds the maximum width in the price matrix."
        );
        assert_eq!(
            matrix.line_price(500.0, 2500.0),
            Err(LinePriceError::HeightExceedsMatrix { height: 2500.0 })
        );
    }

    #[test]
    fn ragged_matrix_reports_missing_cell() {
        let matrix = PriceMatrix {
            widths: vec![600.0, 900.0],
            drops: vec![1000.0],
            prices: vec![vec![10_000]],
        };
        assert_eq!(
            matrix.line_price(800.0, 900.0),
            Err(LinePriceError::MissingCell)
        );
    }
}
