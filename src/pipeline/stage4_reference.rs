use tracing::{debug, info};

use crate::error::{QpcrError, Result};
use crate::model::measurement::mean_present;
use crate::model::{AssayProfile, Delta, DeltaDelta, NormTable};

#[derive(Debug)]
pub struct Stage4Output {
    pub norms: NormTable,
    pub delta_delta: DeltaDelta,
}

/// Mean delta Ct of the reference condition, per gene.
pub fn compute_reference_norms(delta: &Delta, profile: &AssayProfile) -> Result<NormTable> {
    let mut norms = NormTable::default();
    for m in delta.measurements() {
        if m.identifier_key().as_deref() != Some(profile.reference_identifier.as_str()) {
            continue;
        }
        debug!("processing {} {}", m.gene_label(), profile.reference_identifier);
        let mean = mean_present(&m.data).ok_or_else(|| QpcrError::MissingReferenceAverage {
            gene: m.gene_label().to_string(),
        })?;
        norms.insert(m.gene_label(), mean);
    }
    Ok(norms)
}

/// delta-delta Ct: every delta reading minus its gene's reference mean.
pub fn apply_reference(delta: &Delta, norms: &NormTable) -> Result<DeltaDelta> {
    let mut out = Vec::with_capacity(delta.measurements().len());
    for m in delta.measurements() {
        if !m.has_identifier() {
            continue;
        }
        let norm = norms
            .get(m.gene_label())
            .ok_or_else(|| QpcrError::MissingReferenceAverage {
                gene: m.gene_label().to_string(),
            })?;
        out.push(m.shifted_by(norm));
    }
    Ok(DeltaDelta::new(out))
}

pub fn run_stage4(delta: &Delta, profile: &AssayProfile) -> Result<Stage4Output> {
    let norms = compute_reference_norms(delta, profile)?;
    info!("reference norms for {} genes", norms.len());
    let delta_delta = apply_reference(delta, &norms)?;
    Ok(Stage4Output { norms, delta_delta })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_reference.rs"]
mod tests;
