use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::model::{AssayProfile, NormTable};
use crate::pipeline::stage5_foldchange::ReplicateSummary;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormSummary {
    pub housekeeping: NormTable,
    pub reference: NormTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountSummary {
    pub measurements: usize,
    pub genes: usize,
    /// Unknown when replaying a snapshot.
    pub excluded_wells: Option<usize>,
}

/// Everything `summary.json` holds.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub profile: AssayProfile,
    pub counts: CountSummary,
    pub norms: NormSummary,
    pub warnings: BTreeMap<&'static str, usize>,
    pub gene_colors: BTreeMap<String, String>,
    pub replicates: Vec<ReplicateSummary>,
}

pub fn render_summary_json(data: &SummaryData) -> Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}
