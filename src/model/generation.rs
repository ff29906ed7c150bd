//! The three generations a plate dataset passes through.
//!
//! Only the stage that owns a transition can build the next generation, so
//! the raw -> delta -> delta-delta order is enforced by the types.

use crate::model::measurement::Measurement;

/// Measurements that passed identifier validation, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    measurements: Vec<Measurement>,
}

/// Housekeeping-normalized measurements (delta Ct).
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    measurements: Vec<Measurement>,
}

/// Reference-normalized measurements (delta-delta Ct).
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaDelta {
    measurements: Vec<Measurement>,
}

impl Validated {
    pub(crate) fn new(measurements: Vec<Measurement>) -> Self {
        Self { measurements }
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }
}

impl Delta {
    pub(crate) fn new(measurements: Vec<Measurement>) -> Self {
        Self { measurements }
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }
}

impl DeltaDelta {
    pub(crate) fn new(measurements: Vec<Measurement>) -> Self {
        Self { measurements }
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }
}
