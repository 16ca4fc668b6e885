// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "width" | "w" => Some(Self::Width),
            "height" | "h" | "drop" => Some(Self::Height),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Width => "Width",
            Self::Height => "Height",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FabricType {
    B1,
    B2,
    B3,
    B4,
    B5,
    SN,
}

impl FabricType {
    pub const SEQUENCE: [Self; 6] = [Self::B1, Self::B2, Self::B3, Self::B4, Self::B5, Self::SN];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::B4 => "B4",
            Self::B5 => "B5",
            Self::SN => "SN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "B1" => Some(Self::B1),
            "B2" => Some(Self::B2),
            "B3" => Some(Self::B3),
            "B4" => Some(Self::B4),
            "B5" => Some(Self::B5),
            "SN" => Some(Self::SN),
            _ => None,
        }
    }

    pub fn cycle(current: Option<Self>) -> Self {
        let Some(current) = current else {
            return Self::SEQUENCE[0];
        };
        let position = Self::SEQUENCE
            .iter()
            .position(|fabric| *fabric == current)
            .unwrap_or(0);
        Self::SEQUENCE[(position + 1) % Self::SEQUENCE.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Drive {
    Winder,
    Motor,
}

impl Drive {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Winder => "winder",
            Self::Motor => "motor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "winder" | "hd" => Some(Self::Winder),
            "motor" => Some(Self::Motor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessoryKind {
    Dual,
    Winder,
    Motor,
    Remote,
    Charger,
    Cord,
}

impl AccessoryKind {
    pub const ALL: [Self; 6] = [
        Self::Dual,
        Self::Winder,
        Self::Motor,
        Self::Remote,
        Self::Charger,
        Self::Cord,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dual => "dual",
            Self::Winder => "winder",
            Self::Motor => "motor",
            Self::Remote => "remote",
            Self::Charger => "charger",
            Self::Cord => "cord",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dual" => Some(Self::Dual),
            "winder" => Some(Self::Winder),
            "motor" => Some(Self::Motor),
            "remote" => Some(Self::Remote),
            "charger" => Some(Self::Charger),
            "cord" => Some(Self::Cord),
            _ => None,
        }
    }

    pub const fn counted(self) -> Option<CountedAccessory> {
        match self {
            Self::Dual => None,
            Self::Winder => Some(CountedAccessory::Winder),
            Self::Motor => Some(CountedAccessory::Motor),
            Self::Remote => Some(CountedAccessory::Remote),
            Self::Charger => Some(CountedAccessory::Charger),
            Self::Cord => Some(CountedAccessory::Cord),
        }
    }

    pub const fn price_format(self) -> PriceFormat {
        match self {
            Self::Dual => PriceFormat::Whole,
            _ => PriceFormat::Cents,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CountedAccessory {
    Winder,
    Motor,
    Remote,
    Charger,
    Cord,
}

impl CountedAccessory {
    pub const ALL: [Self; 5] = [
        Self::Winder,
        Self::Motor,
        Self::Remote,
        Self::Charger,
        Self::Cord,
    ];

    pub const fn kind(self) -> AccessoryKind {
        match self {
            Self::Winder => AccessoryKind::Winder,
            Self::Motor => AccessoryKind::Motor,
            Self::Remote => AccessoryKind::Remote,
            Self::Charger => AccessoryKind::Charger,
            Self::Cord => AccessoryKind::Cord,
        }
    }

    pub const fn as_str(self) -> &'static str {
        self.kind().as_str()
    }

    pub fn parse(value: &str) -> Option<Self> {
        AccessoryKind::parse(value).and_then(AccessoryKind::counted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    OneChannel,
    SixteenChannel,
}

impl ChannelType {
    pub const ALL: [Self; 2] = [Self::OneChannel, Self::SixteenChannel];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneChannel => "1ch",
            Self::SixteenChannel => "16ch",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1ch" => Some(Self::OneChannel),
            "16ch" => Some(Self::SixteenChannel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorState {
    Inactive,
    Selecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceFormat {
    Whole,
    Cents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteMeta {
    pub issued_on: Date,
    pub due_on: Date,
}

impl QuoteMeta {
    pub fn issued(issued_on: Date, due_days: u16) -> Self {
        Self {
            issued_on,
            due_on: issued_on.saturating_add(Duration::days(i64::from(due_days))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessoryKind, Axis, ChannelType, CountedAccessory, FabricType, QuoteMeta};
    use time::{Date, Month};

    #[test]
    fn fabric_cycle_starts_at_head_and_wraps() {
        assert_eq!(FabricType::cycle(None), FabricType::B1);
        assert_eq!(FabricType::cycle(Some(FabricType::B1)), FabricType::B2);
        assert_eq!(FabricType::cycle(Some(FabricType::SN)), FabricType::B1);
    }

    #[test]
    fn channel_labels_parse_case_insensitively() {
        assert_eq!(ChannelType::parse("1CH"), Some(ChannelType::OneChannel));
        assert_eq!(ChannelType::parse("16ch"), Some(ChannelType::SixteenChannel));
        assert_eq!(ChannelType::parse("4ch"), None);
    }

    #[test]
    fn only_dual_is_not_counted() {
        for kind in AccessoryKind::ALL {
            assert_eq!(kind == AccessoryKind::Dual, kind.counted().is_none(), "{kind:?}");
        }
        assert_eq!(CountedAccessory::parse("dual"), None);
        assert_eq!(CountedAccessory::parse("remote"), Some(CountedAccessory::Remote));
    }

    #[test]
    fn axis_aliases() {
        assert_eq!(Axis::parse("drop"), Some(Axis::Height));
        assert_eq!(Axis::parse("w"), Some(Axis::Width));
        assert_eq!(Axis::parse("depth"), None);
    }

    #[test]
    fn quote_meta_due_date_adds_days() {
        let issued = Date::from_calendar_date(2026, Month::January, 25).expect("valid date");
        let meta = QuoteMeta::issued(issued, 14);
        assert_eq!(
            meta.due_on,
            Date::from_calendar_date(2026, Month::February, 8).expect("valid date")
        );
    }
}
