// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

// Row ids are handed out by the ledger and never reused, so accessory marks
// stay attached to the same physical row across inserts and removals.
entity_id!(RowId);

#[cfg(test)]
mod tests {
    use super::RowId;

    #[test]
    fn row_id_display_includes_value() {
        assert_eq!(RowId::new(7).to_string(), "RowId#7");
        assert_eq!(RowId::from(3).get(), 3);
    }
}
