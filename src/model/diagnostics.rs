use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::plate::layout::Color;
use crate::plate::well::Well;

/// Non-fatal findings of a run. Processing continues after any of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A plate-layout cell is filled with a color no gene is defined for.
    /// Its wells are collected as unidentified and dropped.
    UnmappedColor {
        well: Well,
        color: Color,
        identifier: Option<String>,
    },
    /// A gene missing from the display order list.
    UngroupedGene { gene: String },
}

impl Warning {
    pub fn kind(&self) -> &'static str {
        match self {
            Warning::UnmappedColor { .. } => "unmapped_color",
            Warning::UngroupedGene { .. } => "ungrouped_gene",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnmappedColor {
                well,
                color,
                identifier,
            } => write!(
                f,
                "unknown color {} in layout well {} with value {}",
                color,
                well,
                identifier.as_deref().unwrap_or("-")
            ),
            Warning::UngroupedGene { gene } => {
                write!(f, "gene {gene} is not in the display order; appended last")
            }
        }
    }
}

/// Collects warnings instead of printing them from deep inside a stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and logs it once.
    pub fn push(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings per kind.
    pub fn tally(&self) -> BTreeMap<&'static str, usize> {
        let mut out = BTreeMap::new();
        for w in &self.warnings {
            *out.entry(w.kind()).or_insert(0) += 1;
        }
        out
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }
}
