// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Axis, PriceFormat};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NonFiniteDimension { axis: Axis },
    NonPositiveDimension { axis: Axis },
    DimensionBelowMinimum { axis: Axis, value: f64, min: f64 },
    DimensionAboveMaximum { axis: Axis, value: f64, max: f64 },
    InvalidNumber(String),
    InvalidQuantity(String),
    InvalidPrice { key: String },
    UnknownRow { index: usize, len: usize },
    UnknownChannelType(String),
    EmptyRow { index: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteDimension { axis } => {
                write!(f, "{} must be a finite number", axis.as_str())
            }
            Self::NonPositiveDimension { axis } => {
                write!(f, "{} must be a positive number", axis.as_str())
            }
            Self::DimensionBelowMinimum { axis, value, min } => {
                write!(f, "{} {value} is below the minimum of {min}", axis.label())
            }
            Self::DimensionAboveMaximum { axis, value, max } => {
                write!(f, "{} {value} exceeds the maximum of {max}", axis.label())
            }
            Self::InvalidNumber(raw) => write!(f, "invalid number {raw:?}"),
            Self::InvalidQuantity(raw) => {
                write!(f, "invalid quantity {raw:?}; only whole numbers are allowed")
            }
            Self::InvalidPrice { key } => {
                write!(f, "price for {key} must be a non-negative amount")
            }
            Self::UnknownRow { index, len } => {
                write!(f, "row {} does not exist (quote has {len} rows)", index + 1)
            }
            Self::UnknownChannelType(raw) => {
                write!(f, "unknown remote channel type {raw:?}; use 1ch or 16ch")
            }
            Self::EmptyRow { index } => {
                write!(f, "row {} has no dimensions yet -- enter width or height first", index + 1)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLimits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionLimits {
    pub width: AxisLimits,
    pub height: AxisLimits,
}

impl DimensionLimits {
    pub const fn for_axis(&self, axis: Axis) -> AxisLimits {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }
}

pub fn validate_dimension(axis: Axis, value: f64, limits: AxisLimits) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteDimension { axis });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveDimension { axis });
    }
    if let Some(min) = limits.min
        && value < min
    {
        return Err(ValidationError::DimensionBelowMinimum { axis, value, min });
    }
    if let Some(max) = limits.max
        && value > max
    {
        return Err(ValidationError::DimensionAboveMaximum { axis, value, max });
    }
    Ok(value)
}

pub fn parse_dimension(axis: Axis, input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber(trimmed.to_owned()))?;
    validate_dimension(axis, value, AxisLimits::default())
}

pub fn parse_quantity(input: &str) -> ValidationResult<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidQuantity(trimmed.to_owned()));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidQuantity(trimmed.to_owned()))
}

pub fn dollars_to_cents(key: &str, dollars: f64) -> ValidationResult<i64> {
    if !dollars.is_finite() || dollars < 0.0 || dollars > (i64::MAX / 100) as f64 {
        return Err(ValidationError::InvalidPrice {
            key: key.to_owned(),
        });
    }
    Ok((dollars * 100.0).round() as i64)
}

pub fn format_cents(cents: i64) -> String {
    let (sign, cents) = normalize_sign(cents);
    let dollars = cents / 100;
    let remainder = cents % 100;
    format!("{sign}${}.{:02}", comma_format(dollars), remainder)
}

pub fn format_whole_cents(cents: i64) -> String {
    if cents % 100 != 0 {
        return format_cents(cents);
    }
    let (sign, cents) = normalize_sign(cents);
    format!("{sign}${}", comma_format(cents / 100))
}

pub fn format_price(cents: i64, format: PriceFormat) -> String {
    match format {
        PriceFormat::Whole => format_whole_cents(cents),
        PriceFormat::Cents => format_cents(cents),
    }
}

fn comma_format(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

fn normalize_sign(cents: i64) -> (&'static str, i64) {
    if cents >= 0 {
        return ("", cents);
    }
    if cents == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -cents)
    }
}
