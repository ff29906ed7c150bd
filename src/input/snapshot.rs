use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QpcrError, Result};
use crate::input::open_maybe_gz;
use crate::model::Measurement;
use crate::plate::{ColorMapping, IdentifierMapping};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Validated plate data persisted for re-display in a later session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub color_mapping: ColorMapping,
    pub identifier_mapping: IdentifierMapping,
    pub data: Vec<Measurement>,
}

impl Snapshot {
    pub fn new(
        color_mapping: ColorMapping,
        identifier_mapping: IdentifierMapping,
        data: Vec<Measurement>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            color_mapping,
            identifier_mapping,
            data,
        }
    }
}

pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, snapshot)?;
    w.flush()?;
    Ok(())
}

/// Loads a snapshot, refusing any version but the current one before the
/// payload is interpreted.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let value: serde_json::Value = serde_json::from_reader(open_maybe_gz(path)?)?;
    let version = value.get("version").cloned().unwrap_or(serde_json::Value::Null);
    if version.as_u64() != Some(u64::from(SNAPSHOT_VERSION)) {
        return Err(QpcrError::UnsupportedSnapshotVersion(version.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/snapshot.rs"]
mod tests;
