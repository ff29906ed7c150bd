use serde::{Deserialize, Serialize};

/// Assay conventions the normalization relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssayProfile {
    /// Gene type marking housekeeping genes.
    pub housekeeping_type: String,
    /// Sample identifier of the reference condition every other sample is
    /// compared against.
    pub reference_identifier: String,
    /// Blank-control sample whose housekeeping norm is pinned to zero.
    pub blank_identifier: String,
    /// Cycle count substituted for an empty reading: the assay's last cycle,
    /// meaning no amplification was detected.
    pub no_amplification_ct: f64,
    /// Width identifiers are zero-padded to when sorting measurements.
    pub identifier_pad_width: usize,
    /// Width identifiers are zero-padded to when ordering result rows.
    pub result_pad_width: usize,
}

pub const NO_AMPLIFICATION_CT: f64 = 40.0;

impl AssayProfile {
    pub fn default_v1() -> Self {
        Self {
            housekeeping_type: "HK".to_string(),
            reference_identifier: "pluri".to_string(),
            blank_identifier: "water".to_string(),
            no_amplification_ct: NO_AMPLIFICATION_CT,
            identifier_pad_width: 4,
            result_pad_width: 5,
        }
    }
}

impl Default for AssayProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}
