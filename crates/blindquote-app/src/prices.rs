// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{AccessoryKind, ChannelType, ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceKey {
    ComboBracket,
    WinderHd,
    MotorStandard,
    RemoteSingleChannel,
    RemoteMultiChannel16,
    Charger,
    Cord3m,
}

impl PriceKey {
    pub const ALL: [Self; 7] = [
        Self::ComboBracket,
        Self::WinderHd,
        Self::MotorStandard,
        Self::RemoteSingleChannel,
        Self::RemoteMultiChannel16,
        Self::Charger,
        Self::Cord3m,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ComboBracket => "combo_bracket",
            Self::WinderHd => "winder_hd",
            Self::MotorStandard => "motor_standard",
            Self::RemoteSingleChannel => "remote_single_channel",
            Self::RemoteMultiChannel16 => "remote_multi_channel_16",
            Self::Charger => "charger",
            Self::Cord3m => "cord_3m",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }

    pub const fn default_cents(self) -> i64 {
        match self {
            Self::ComboBracket => 1_000,
            Self::WinderHd => 3_000,
            Self::MotorStandard => 25_000,
            Self::RemoteSingleChannel => 2_000,
            Self::RemoteMultiChannel16 => 7_000,
            Self::Charger => 5_000,
            Self::Cord3m => 500,
        }
    }

    // Remotes have no flat price; each channel type carries its own.
    pub const fn for_accessory(kind: AccessoryKind) -> Option<Self> {
        match kind {
            AccessoryKind::Dual => Some(Self::ComboBracket),
            AccessoryKind::Winder => Some(Self::WinderHd),
            AccessoryKind::Motor => Some(Self::MotorStandard),
            AccessoryKind::Remote => None,
            AccessoryKind::Charger => Some(Self::Charger),
            AccessoryKind::Cord => Some(Self::Cord3m),
        }
    }

    pub const fn for_channel(channel: ChannelType) -> Self {
        match channel {
            ChannelType::OneChannel => Self::RemoteSingleChannel,
            ChannelType::SixteenChannel => Self::RemoteMultiChannel16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    unit_cents: BTreeMap<PriceKey, i64>,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            unit_cents: PriceKey::ALL
                .into_iter()
                .map(|key| (key, key.default_cents()))
                .collect(),
        }
    }
}

impl PriceTable {
    pub fn empty() -> Self {
        Self {
            unit_cents: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, key: PriceKey, cents: i64) -> ValidationResult<()> {
        if cents < 0 {
            return Err(ValidationError::InvalidPrice {
                key: key.as_str().to_owned(),
            });
        }
        self.unit_cents.insert(key, cents);
        Ok(())
    }

    pub fn unit_cents(&self, key: PriceKey) -> i64 {
        self.unit_cents.get(&key).copied().unwrap_or(0)
    }

    pub fn channel_unit_cents(&self, channel: ChannelType) -> i64 {
        self.unit_cents(PriceKey::for_channel(channel))
    }
}
