// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStateError {
    pub operation: &'static str,
    pub state: &'static str,
}

impl InvalidStateError {
    pub const fn new(operation: &'static str, state: &'static str) -> Self {
        Self { operation, state }
    }
}

impl std::fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot {} while {}", self.operation, self.state)
    }
}

impl std::error::Error for InvalidStateError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionMismatchError {
    pub declared_total: u32,
    pub actual_sum: u64,
}

impl std::fmt::Display for DistributionMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total must equal {}. Current total: {}.",
            self.declared_total, self.actual_sum
        )
    }
}

impl std::error::Error for DistributionMismatchError {}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Validation(ValidationError),
    InvalidState(InvalidStateError),
    DistributionMismatch(DistributionMismatchError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(error) => std::fmt::Display::fmt(error, f),
            Self::InvalidState(error) => std::fmt::Display::fmt(error, f),
            Self::DistributionMismatch(error) => std::fmt::Display::fmt(error, f),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(error) => Some(error),
            Self::InvalidState(error) => Some(error),
            Self::DistributionMismatch(error) => Some(error),
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<InvalidStateError> for EngineError {
    fn from(error: InvalidStateError) -> Self {
        Self::InvalidState(error)
    }
}

impl From<DistributionMismatchError> for EngineError {
    fn from(error: DistributionMismatchError) -> Self {
        Self::DistributionMismatch(error)
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
