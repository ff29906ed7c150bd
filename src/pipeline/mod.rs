pub mod stage1_resolve;
pub mod stage2_validate;
pub mod stage3_housekeeping;
pub mod stage4_reference;
pub mod stage5_foldchange;
pub mod stage6_report;

use tracing::info;

use crate::error::Result;
use crate::input::snapshot::Snapshot;
use crate::input::{ExclusionSet, PlateInput};
use crate::model::{AssayProfile, Delta, DeltaDelta, Diagnostics, NormTable, Validated};
use crate::pipeline::stage1_resolve::run_stage1;
use crate::pipeline::stage2_validate::validate;
use crate::pipeline::stage3_housekeeping::run_stage3;
use crate::pipeline::stage4_reference::run_stage4;
use crate::pipeline::stage5_foldchange::{
    FoldChangeTable, ReplicateSummary, apply_gene_order, assemble_results, summarize,
};

/// Every generation of one run, kept side by side for the sink.
#[derive(Debug)]
pub struct PipelineOutput {
    pub validated: Validated,
    pub housekeeping: NormTable,
    pub delta: Delta,
    pub reference: NormTable,
    pub delta_delta: DeltaDelta,
    pub results: FoldChangeTable,
    pub summaries: Vec<ReplicateSummary>,
    pub diagnostics: Diagnostics,
}

/// Plate in, fold changes out. Fails as a whole: no partial output exists
/// when any stage errors.
pub fn run_pipeline(
    plate: &PlateInput,
    exclusions: &ExclusionSet,
    profile: &AssayProfile,
) -> Result<PipelineOutput> {
    let stage1 = run_stage1(plate, exclusions, profile)?;
    let validated = validate(stage1.measurements, profile)?;
    normalize(
        validated,
        plate.gene_order.as_deref(),
        profile,
        stage1.diagnostics,
    )
}

/// Reruns normalization from persisted validated data. The data is validated
/// again since the file may have been edited by hand.
pub fn replay(snapshot: &Snapshot, profile: &AssayProfile) -> Result<PipelineOutput> {
    let validated = validate(snapshot.data.clone(), profile)?;
    normalize(validated, None, profile, Diagnostics::new())
}

/// Both normalization stages plus result assembly. Shared by plate runs and
/// snapshot replay.
pub fn normalize(
    validated: Validated,
    gene_order: Option<&[String]>,
    profile: &AssayProfile,
    mut diagnostics: Diagnostics,
) -> Result<PipelineOutput> {
    let stage3 = run_stage3(&validated, profile)?;
    let stage4 = run_stage4(&stage3.delta, profile)?;

    let mut results = assemble_results(&stage3.delta, &stage4.delta_delta, profile)?;
    if let Some(order) = gene_order {
        results = apply_gene_order(results, order, &mut diagnostics);
    }
    let summaries = summarize(&results);

    info!(
        "normalized {} measurements into {} result rows ({} warnings)",
        validated.measurements().len(),
        summaries.len(),
        diagnostics.warnings().len()
    );

    Ok(PipelineOutput {
        validated,
        housekeeping: stage3.norms,
        delta: stage3.delta,
        reference: stage4.norms,
        delta_delta: stage4.delta_delta,
        results,
        summaries,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/fixtures.rs"]
pub(crate) mod fixtures;

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
