use tracing::{debug, error, info};

use crate::error::{QpcrError, Result};
use crate::model::measurement::zero_pad;
use crate::model::{AssayProfile, Identifier, Measurement, Validated};

/// Measurements whose identifier arrived as a fractional number, i.e. an
/// integer sample index the sheet reader corrupted.
pub fn find_invalid(measurements: &[Measurement]) -> Vec<&Measurement> {
    measurements
        .iter()
        .filter(|m| m.identifier.as_ref().is_some_and(Identifier::is_fractional))
        .collect()
}

/// Orders by (gene type, gene name, zero-padded identifier); absent parts
/// sort as empty strings.
pub fn display_sort_key(m: &Measurement, pad_width: usize) -> (String, String, String) {
    let identifier = match &m.identifier {
        Some(id) if id.is_present() => zero_pad(&id.key(), pad_width),
        _ => String::new(),
    };
    (
        m.type_label().to_string(),
        m.gene_label().to_string(),
        identifier,
    )
}

/// Rejects the whole plate if any identifier is invalid; nothing downstream
/// runs in that case. Otherwise sorts for display and drops measurements
/// with no present reading.
pub fn validate(mut measurements: Vec<Measurement>, profile: &AssayProfile) -> Result<Validated> {
    let invalid = find_invalid(&measurements);
    if !invalid.is_empty() {
        for m in &invalid {
            error!("invalid measurement: {m}");
        }
        error!(
            "if an identifier is a fractional number the sheet reader returned corrupted data; re-read the plate"
        );
        return Err(QpcrError::InvalidData {
            offending: invalid.iter().map(|m| m.to_string()).collect(),
        });
    }

    measurements.sort_by_cached_key(|m| display_sort_key(m, profile.identifier_pad_width));

    // Groups whose every well was excluded carry no information.
    let before = measurements.len();
    measurements.retain(|m| m.data.iter().any(Option::is_some));
    if measurements.len() < before {
        debug!(
            "dropped {} measurements without any present reading",
            before - measurements.len()
        );
    }

    info!("validated {} measurements", measurements.len());
    Ok(Validated::new(measurements))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_validate.rs"]
mod tests;
