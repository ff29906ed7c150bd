use serde::Serialize;
use tracing::info;

use crate::error::{QpcrError, Result};
use crate::model::measurement::zero_pad;
use crate::model::{AssayProfile, Delta, DeltaDelta, Diagnostics, Identifier, Warning};

/// Linear relative expression, `2^-x`. Absent stays absent.
pub fn fold_change(x: Option<f64>) -> Option<f64> {
    x.map(|v| (-v).exp2())
}

pub fn fold_changes(data: &[Option<f64>]) -> Vec<Option<f64>> {
    data.iter().map(|&x| fold_change(x)).collect()
}

/// Fold changes of one (gene, sample) pair from both generations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub gene_name: Option<String>,
    pub gene_type: Option<String>,
    pub identifier: Option<Identifier>,
    pub delta: Vec<Option<f64>>,
    pub delta_delta: Vec<Option<f64>>,
}

impl ResultRow {
    pub fn identifier_key(&self) -> String {
        self.identifier
            .as_ref()
            .map(Identifier::key)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneResults {
    pub gene_name: Option<String>,
    pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FoldChangeTable {
    pub genes: Vec<GeneResults>,
}

impl FoldChangeTable {
    pub fn rows(&self) -> impl Iterator<Item = &ResultRow> {
        self.genes.iter().flat_map(|g| g.rows.iter())
    }

    pub fn max_replicates(&self) -> usize {
        self.rows()
            .map(|r| r.delta.len().max(r.delta_delta.len()))
            .max()
            .unwrap_or(0)
    }
}

/// Reference rows sort first, everything else by zero-padded identifier so
/// that "2" precedes "10".
pub fn result_sort_key(identifier: &str, profile: &AssayProfile) -> String {
    if identifier == profile.reference_identifier {
        String::new()
    } else {
        zero_pad(identifier, profile.result_pad_width)
    }
}

/// Joins the delta and delta-delta generations row by row. Genes keep the
/// order in which they first appear in the delta generation.
pub fn assemble_results(
    delta: &Delta,
    delta_delta: &DeltaDelta,
    profile: &AssayProfile,
) -> Result<FoldChangeTable> {
    let mut genes: Vec<GeneResults> = Vec::new();
    let mut pending: Vec<Vec<bool>> = Vec::new();

    for m in delta.measurements() {
        let gi = match genes.iter().position(|g| g.gene_name == m.gene_name) {
            Some(i) => i,
            None => {
                genes.push(GeneResults {
                    gene_name: m.gene_name.clone(),
                    rows: Vec::new(),
                });
                pending.push(Vec::new());
                genes.len() - 1
            }
        };
        genes[gi].rows.push(ResultRow {
            gene_name: m.gene_name.clone(),
            gene_type: m.gene_type.clone(),
            identifier: m.identifier.clone(),
            delta: fold_changes(&m.data),
            delta_delta: Vec::new(),
        });
        pending[gi].push(true);
    }

    for m in delta_delta.measurements() {
        let key = m.identifier_key().unwrap_or_default();
        let inconsistent = || QpcrError::InconsistentSnapshots {
            gene: m.gene_label().to_string(),
            identifier: key.clone(),
        };
        let gi = genes
            .iter()
            .position(|g| g.gene_name == m.gene_name)
            .ok_or_else(inconsistent)?;
        let ri = genes[gi]
            .rows
            .iter()
            .zip(&pending[gi])
            .position(|(r, &open)| {
                open && r.gene_type == m.gene_type && r.identifier_key() == key
            })
            .ok_or_else(inconsistent)?;
        pending[gi][ri] = false;
        genes[gi].rows[ri].delta_delta = fold_changes(&m.data);
    }

    for (gi, flags) in pending.iter().enumerate() {
        if let Some(ri) = flags.iter().position(|&p| p) {
            let row = &genes[gi].rows[ri];
            return Err(QpcrError::InconsistentSnapshots {
                gene: row.gene_name.clone().unwrap_or_default(),
                identifier: row.identifier_key(),
            });
        }
    }

    for gene in &mut genes {
        gene.rows
            .sort_by_cached_key(|r| result_sort_key(&r.identifier_key(), profile));
    }

    info!("assembled fold changes for {} genes", genes.len());
    Ok(FoldChangeTable { genes })
}

/// Puts listed genes first, in list order. Unlisted genes keep their order
/// behind them and are reported.
pub fn apply_gene_order(
    table: FoldChangeTable,
    order: &[String],
    diagnostics: &mut Diagnostics,
) -> FoldChangeTable {
    let mut listed: Vec<(usize, GeneResults)> = Vec::new();
    let mut unlisted: Vec<GeneResults> = Vec::new();
    for gene in table.genes {
        let idx = gene
            .gene_name
            .as_ref()
            .and_then(|name| order.iter().position(|o| o == name));
        match idx {
            Some(i) => listed.push((i, gene)),
            None => {
                diagnostics.push(Warning::UngroupedGene {
                    gene: gene.gene_name.clone().unwrap_or_default(),
                });
                unlisted.push(gene);
            }
        }
    }
    listed.sort_by_key(|(i, _)| *i);
    let mut genes: Vec<GeneResults> = listed.into_iter().map(|(_, g)| g).collect();
    genes.extend(unlisted);
    FoldChangeTable { genes }
}

/// Replicate statistics over present fold changes. Population standard
/// deviation; undefined when no replicate is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplicateStats {
    pub n: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

impl ReplicateStats {
    pub fn lower(&self) -> Option<f64> {
        Some(self.mean? - self.std_dev?)
    }

    pub fn upper(&self) -> Option<f64> {
        Some(self.mean? + self.std_dev?)
    }
}

pub fn replicate_stats(values: &[Option<f64>]) -> ReplicateStats {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let n = present.len();
    if n == 0 {
        return ReplicateStats {
            n,
            mean: None,
            std_dev: None,
        };
    }
    let mean = present.iter().sum::<f64>() / n as f64;
    let var = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    ReplicateStats {
        n,
        mean: Some(mean),
        std_dev: Some(var.sqrt()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicateSummary {
    pub gene_name: Option<String>,
    pub sample: String,
    pub delta: ReplicateStats,
    pub delta_delta: ReplicateStats,
}

pub fn summarize(table: &FoldChangeTable) -> Vec<ReplicateSummary> {
    table
        .rows()
        .map(|r| ReplicateSummary {
            gene_name: r.gene_name.clone(),
            sample: r.identifier_key(),
            delta: replicate_stats(&r.delta),
            delta_delta: replicate_stats(&r.delta_delta),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_foldchange.rs"]
mod tests;
