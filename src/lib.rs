//! Delta-delta-Ct normalization of qPCR plate readings.
//!
//! A plate (Ct grid, gene table, sample layout) is resolved into replicate
//! measurements, validated, normalized against housekeeping genes and then
//! against a reference condition, and finally turned into fold-change
//! tables. Reading spreadsheets and drawing charts happen elsewhere; this
//! crate only sees the plate data handed over as JSON.

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod plate;
pub mod report;

pub use error::{QpcrError, Result};

#[cfg(test)]
#[path = "../tests/src_inline/test_support.rs"]
pub(crate) mod test_support;
