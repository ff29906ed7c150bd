use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{QpcrError, Result};
use crate::plate::well::{PLATE_COLUMNS, PLATE_ROWS, Well, parse_well};
use crate::plate::{ColorMapping, CtGrid, IdentifierMapping};

pub mod snapshot;

/// Everything the sheet reader hands over for one plate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlateInput {
    pub ct_grid: CtGrid,
    pub genes: ColorMapping,
    pub layout: IdentifierMapping,
    #[serde(default)]
    pub gene_order: Option<Vec<String>>,
}

/// Wells the operator excluded, e.g. for funky melt curves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    wells: BTreeSet<Well>,
}

impl ExclusionSet {
    pub fn from_wells(wells: impl IntoIterator<Item = Well>) -> Self {
        Self {
            wells: wells.into_iter().collect(),
        }
    }

    pub fn contains(&self, well: &Well) -> bool {
        self.wells.contains(well)
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Well> {
        self.wells.iter()
    }
}

/// Parses the comma-delimited exclusion prompt ("9A, B12"). Blank tokens
/// mean "no exclusion".
pub fn parse_exclusions(text: &str) -> Result<ExclusionSet> {
    let mut wells = BTreeSet::new();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let well = parse_well(token)?;
        if !well.is_on_plate() {
            return Err(QpcrError::WellOutOfRange {
                well: well.to_string(),
                rows: PLATE_ROWS,
                columns: PLATE_COLUMNS,
            });
        }
        wells.insert(well);
    }
    Ok(ExclusionSet { wells })
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn load_plate(path: &Path) -> Result<PlateInput> {
    let reader = open_maybe_gz(path)?;
    let plate: PlateInput = serde_json::from_reader(reader)?;
    info!(
        "loaded plate {}: {} gene colors, {} layout cells",
        path.display(),
        plate.genes.len(),
        plate.layout.len()
    );
    Ok(plate)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
