use tracing::{debug, info};

use crate::error::{QpcrError, Result};
use crate::model::measurement::mean_present;
use crate::model::{AssayProfile, Delta, NormTable, Validated};

#[derive(Debug)]
pub struct Stage3Output {
    pub norms: NormTable,
    pub delta: Delta,
}

/// Mean housekeeping Ct per sample identifier; the blank control is pinned
/// to 0.
pub fn compute_housekeeping_norms(
    validated: &Validated,
    profile: &AssayProfile,
) -> Result<NormTable> {
    let mut norms = NormTable::default();
    for m in validated.measurements() {
        if m.gene_type.as_deref() != Some(profile.housekeeping_type.as_str()) {
            continue;
        }
        let Some(key) = m.identifier_key() else {
            continue;
        };
        let mean = mean_present(&m.data).ok_or_else(|| QpcrError::NoValidReplicates {
            stage: "housekeeping",
            key: key.clone(),
        })?;
        debug!("housekeeping norm {} {} = {}", m.gene_label(), key, mean);
        norms.insert(key, mean);
    }
    norms.insert(profile.blank_identifier.clone(), 0.0);
    Ok(norms)
}

/// delta Ct: every reading minus its sample's housekeeping mean. Wells
/// without a sample identifier are dropped here.
pub fn apply_housekeeping(validated: &Validated, norms: &NormTable) -> Result<Delta> {
    let mut out = Vec::with_capacity(validated.measurements().len());
    for m in validated.measurements() {
        if !m.has_identifier() {
            continue;
        }
        let key = m.identifier_key().unwrap_or_default();
        let norm = norms
            .get(&key)
            .ok_or(QpcrError::MissingHousekeepingNorm { identifier: key })?;
        out.push(m.shifted_by(norm));
    }
    Ok(Delta::new(out))
}

pub fn run_stage3(validated: &Validated, profile: &AssayProfile) -> Result<Stage3Output> {
    let norms = compute_housekeeping_norms(validated, profile)?;
    info!("housekeeping norms for {} samples", norms.len());
    let delta = apply_housekeeping(validated, &norms)?;
    Ok(Stage3Output { norms, delta })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_housekeeping.rs"]
mod tests;
