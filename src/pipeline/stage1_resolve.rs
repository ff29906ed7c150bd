use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::Result;
use crate::input::{ExclusionSet, PlateInput};
use crate::model::{AssayProfile, Diagnostics, Identifier, Measurement, Warning};
use crate::plate::well::{PLATE_COLUMNS, PLATE_ROWS, grid_position_to_well};
use crate::plate::{ColorMapping, GridPosition, IdentifierMapping, WellGene};

#[derive(Debug)]
pub struct Stage1Output {
    pub measurements: Vec<Measurement>,
    pub diagnostics: Diagnostics,
}

type GroupKey = (Option<String>, Option<String>, Option<String>);

/// Warns once per layout cell whose fill color has no gene definition.
pub fn audit_layout_colors(
    layout: &IdentifierMapping,
    colors: &ColorMapping,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    for (pos, cell) in layout.iter() {
        let Some(color) = &cell.color else {
            continue;
        };
        if colors.contains(color) {
            continue;
        }
        diagnostics.push(Warning::UnmappedColor {
            well: grid_position_to_well(*pos)?,
            color: color.clone(),
            identifier: cell.identifier.as_ref().map(Identifier::key),
        });
    }
    Ok(())
}

/// Walks the plate row-major and groups readings by
/// (gene name, gene type, identifier) into replicate lists.
pub fn resolve_plate(
    plate: &PlateInput,
    exclusions: &ExclusionSet,
    profile: &AssayProfile,
) -> Result<Vec<Measurement>> {
    let mut groups: BTreeMap<GroupKey, (Option<Identifier>, Vec<Option<f64>>)> = BTreeMap::new();
    let mut unresolved = 0usize;
    let mut excluded = 0usize;

    for row in 0..PLATE_ROWS {
        for column in 0..PLATE_COLUMNS {
            let pos = GridPosition { row, column };
            let well = grid_position_to_well(pos)?;

            let mut reading = Some(plate.ct_grid.get(pos).unwrap_or(profile.no_amplification_ct));
            if exclusions.contains(&well) {
                reading = None;
                excluded += 1;
            }

            let cell = plate.layout.get(pos);
            let identifier = cell.and_then(|c| c.identifier.clone());
            let color = cell.and_then(|c| c.color.as_ref());

            let assignment = match plate.genes.resolve(color) {
                WellGene::Resolved(a) => a,
                WellGene::Unresolved => {
                    unresolved += 1;
                    continue;
                }
            };

            let key = (
                assignment.name.clone(),
                assignment.gene_type.clone(),
                identifier.as_ref().map(Identifier::key),
            );
            groups
                .entry(key)
                .or_insert_with(|| (identifier, Vec::new()))
                .1
                .push(reading);
        }
    }

    debug!("{unresolved} wells without a gene, {excluded} wells excluded");

    let measurements = groups
        .into_iter()
        .map(|((gene_name, gene_type, _), (identifier, data))| Measurement {
            data,
            gene_name,
            gene_type,
            identifier,
        })
        .collect::<Vec<_>>();
    Ok(measurements)
}

pub fn run_stage1(
    plate: &PlateInput,
    exclusions: &ExclusionSet,
    profile: &AssayProfile,
) -> Result<Stage1Output> {
    let mut diagnostics = Diagnostics::new();
    audit_layout_colors(&plate.layout, &plate.genes, &mut diagnostics)?;
    let measurements = resolve_plate(plate, exclusions, profile)?;
    info!(
        "resolved {} measurements from the plate layout",
        measurements.len()
    );
    Ok(Stage1Output {
        measurements,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_resolve.rs"]
mod tests;
