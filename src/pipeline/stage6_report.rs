use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::model::{AssayProfile, Delta, DeltaDelta, Diagnostics, NormTable, Validated};
use crate::pipeline::stage5_foldchange::{FoldChangeTable, ReplicateSummary};
use crate::plate::ColorMapping;
use crate::report::json::{CountSummary, NormSummary, SummaryData, ToolMeta, render_summary_json};
use crate::report::{foldchange_table, measurement_table, render_tsv};

pub const EXCLUDED_TSV: &str = "excluded.tsv";
pub const DELTA_CT_TSV: &str = "delta_ct.tsv";
pub const DDCT_TSV: &str = "ddct.tsv";
pub const FOLDCHANGE_TSV: &str = "foldchange.tsv";
pub const SUMMARY_JSON: &str = "summary.json";

#[derive(Debug, Clone)]
pub struct Stage6Input<'a> {
    pub colors: &'a ColorMapping,
    pub profile: &'a AssayProfile,
    pub excluded_wells: Option<usize>,

    pub validated: &'a Validated,
    pub housekeeping: &'a NormTable,
    pub delta: &'a Delta,
    pub reference: &'a NormTable,
    pub delta_delta: &'a DeltaDelta,

    pub results: &'a FoldChangeTable,
    pub summaries: &'a [ReplicateSummary],
    pub diagnostics: &'a Diagnostics,
}

/// Writes the four tables and the run summary into `out_dir`.
pub fn write_reports(input: &Stage6Input<'_>, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let tables = [
        (EXCLUDED_TSV, measurement_table(input.validated.measurements(), input.colors)),
        (DELTA_CT_TSV, measurement_table(input.delta.measurements(), input.colors)),
        (DDCT_TSV, measurement_table(input.delta_delta.measurements(), input.colors)),
        (FOLDCHANGE_TSV, foldchange_table(input.results)),
    ];
    for (name, table) in &tables {
        write_text(&out_dir.join(name), &render_tsv(table))?;
    }

    let summary = build_summary(input);
    write_text(&out_dir.join(SUMMARY_JSON), &render_summary_json(&summary)?)?;

    info!("reports written to {}", out_dir.display());
    Ok(())
}

pub fn build_summary(input: &Stage6Input<'_>) -> SummaryData {
    let mut gene_colors = BTreeMap::new();
    for (color, gene) in input.colors.iter() {
        if let Some(name) = &gene.name {
            gene_colors
                .entry(name.clone())
                .or_insert_with(|| color.0.clone());
        }
    }

    SummaryData {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        profile: input.profile.clone(),
        counts: CountSummary {
            measurements: input.validated.measurements().len(),
            genes: input.results.genes.len(),
            excluded_wells: input.excluded_wells,
        },
        norms: NormSummary {
            housekeeping: input.housekeeping.clone(),
            reference: input.reference.clone(),
        },
        warnings: input.diagnostics.tally(),
        gene_colors,
        replicates: input.summaries.to_vec(),
    }
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
