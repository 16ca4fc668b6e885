// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{ChannelType, DistributionMismatchError};

pub type ChannelQuantities = BTreeMap<ChannelType, u32>;

pub fn validate_distribution(
    declared_total: u32,
    proposed: &ChannelQuantities,
) -> Result<u64, DistributionMismatchError> {
    let actual_sum = proposed.values().map(|quantity| u64::from(*quantity)).sum();
    if actual_sum != u64::from(declared_total) {
        return Err(DistributionMismatchError {
            declared_total,
            actual_sum,
        });
    }
    Ok(actual_sum)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteDistribution {
    declared_total: u32,
    committed: Option<ChannelQuantities>,
}

impl RemoteDistribution {
    pub fn declared_total(&self) -> u32 {
        self.declared_total
    }

    // True when a committed split was dropped.
    pub fn declare_total(&mut self, total: u32) -> bool {
        self.declared_total = total;
        let stale = self
            .committed
            .as_ref()
            .is_some_and(|committed| validate_distribution(total, committed).is_err());
        if stale {
            self.committed = None;
        }
        stale
    }

    pub fn commit(&mut self, proposed: ChannelQuantities) -> Result<(), DistributionMismatchError> {
        validate_distribution(self.declared_total, &proposed)?;
        self.committed = Some(proposed);
        Ok(())
    }

    pub fn by_channel_type(&self) -> Option<&ChannelQuantities> {
        self.committed.as_ref()
    }

    pub fn is_committed(&self) -> bool {
        self.committed.is_some()
    }

    pub fn quantity(&self, channel: ChannelType) -> u32 {
        self.committed
            .as_ref()
            .and_then(|committed| committed.get(&channel))
            .copied()
            .unwrap_or(0)
    }

    pub fn undistributed(&self) -> u32 {
        if self.committed.is_some() {
            return 0;
        }
        self.declared_total
    }

    pub fn prompt(&self) -> String {
        format!(
            "Total remotes: {}. Please distribute them.",
            self.declared_total
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
