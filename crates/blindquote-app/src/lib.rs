// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod counters;
pub mod distribution;
pub mod errors;
pub mod ids;
pub mod ledger;
pub mod matrix;
pub mod model;
pub mod prices;
pub mod pricing;
pub mod selector;
pub mod session;
pub mod validation;

pub use counters::*;
pub use distribution::*;
pub use errors::*;
pub use ids::*;
pub use ledger::*;
pub use matrix::*;
pub use model::*;
pub use prices::*;
pub use pricing::*;
pub use selector::*;
pub use session::*;
pub use validation::*;
