use thiserror::Error;

/// Every fatal condition of a plate run.
///
/// Any of these aborts the whole run before the sink sees a single table.
#[derive(Error, Debug)]
pub enum QpcrError {
    #[error("couldn't understand well {0:?}")]
    UnparseableWell(String),

    #[error("well {well} is outside the {rows}x{columns} plate")]
    WellOutOfRange {
        well: String,
        rows: usize,
        columns: usize,
    },

    #[error("invalid plate: {0}")]
    InvalidPlate(String),

    #[error(
        "detected invalid data in {} measurement(s), aborting: {}",
        offending.len(),
        offending.join("; ")
    )]
    InvalidData { offending: Vec<String> },

    #[error("cannot compute normalization mean: no valid replicates for {stage} key {key:?}")]
    NoValidReplicates { stage: &'static str, key: String },

    #[error("missing housekeeping normalization for sample {identifier:?}")]
    MissingHousekeepingNorm { identifier: String },

    #[error("could not calculate reference average for gene {gene:?}, is every reference well excluded?")]
    MissingReferenceAverage { gene: String },

    #[error("inconsistent gene/identifier between delta and delta-delta snapshots: {gene}/{identifier}")]
    InconsistentSnapshots { gene: String, identifier: String },

    /// Carries the version field as found, rendered as JSON.
    #[error("unsupported snapshot version {0} (expected 1)")]
    UnsupportedSnapshotVersion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QpcrError>;
