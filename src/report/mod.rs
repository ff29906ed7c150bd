pub mod json;

use crate::model::Measurement;
use crate::pipeline::stage5_foldchange::FoldChangeTable;
use crate::plate::{Color, ColorMapping};

/// One line of a sink table. `fill` is the gene's plate color, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub fill: Option<Color>,
}

/// Rectangular table handed to the sink: every row is padded to the header
/// width.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
    pub with_fill: bool,
}

impl Table {
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_value(v: Option<f64>) -> String {
    v.map(format_f64_6).unwrap_or_default()
}

fn replicate_headers(prefix: &str, n: usize) -> impl Iterator<Item = String> + '_ {
    (1..=n).map(move |i| format!("{prefix}R{i}"))
}

fn pad_to(cells: &mut Vec<String>, width: usize) {
    while cells.len() < width {
        cells.push(String::new());
    }
}

/// Name, Type, Sample, R1..Rn. Rows carry the fill color of their gene.
pub fn measurement_table(measurements: &[Measurement], colors: &ColorMapping) -> Table {
    let n = measurements
        .iter()
        .map(Measurement::replicate_count)
        .max()
        .unwrap_or(0);

    let mut header = vec!["Name".to_string(), "Type".to_string(), "Sample".to_string()];
    header.extend(replicate_headers("", n));

    let rows = measurements
        .iter()
        .map(|m| {
            let mut cells = vec![
                m.gene_label().to_string(),
                m.type_label().to_string(),
                m.identifier_key().unwrap_or_default(),
            ];
            cells.extend(m.data.iter().map(|&x| format_value(x)));
            pad_to(&mut cells, header.len());
            TableRow {
                cells,
                fill: m
                    .gene_name
                    .as_deref()
                    .and_then(|name| colors.color_for_gene(name))
                    .cloned(),
            }
        })
        .collect();

    Table {
        header,
        rows,
        with_fill: true,
    }
}

/// Name, Type, Sample, the delta fold changes, an empty spacer column, then
/// the delta-delta fold changes.
pub fn foldchange_table(results: &FoldChangeTable) -> Table {
    let n = results.max_replicates();

    let mut header = vec!["Name".to_string(), "Type".to_string(), "Sample".to_string()];
    header.extend(replicate_headers("DCT [Foldchange] ", n));
    header.push(String::new());
    header.extend(replicate_headers("DDCT [Foldchange] ", n));

    let rows = results
        .rows()
        .map(|r| {
            let mut cells = vec![
                r.gene_name.clone().unwrap_or_default(),
                r.gene_type.clone().unwrap_or_default(),
                r.identifier_key(),
            ];
            cells.extend(r.delta.iter().map(|&x| format_value(x)));
            pad_to(&mut cells, 3 + n);
            cells.push(String::new());
            cells.extend(r.delta_delta.iter().map(|&x| format_value(x)));
            pad_to(&mut cells, header.len());
            TableRow { cells, fill: None }
        })
        .collect();

    Table {
        header,
        rows,
        with_fill: false,
    }
}

pub fn render_tsv(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(&table.header.join("\t"));
    if table.with_fill {
        out.push_str("\tfill");
    }
    out.push('\n');
    for row in &table.rows {
        out.push_str(&row.cells.join("\t"));
        if table.with_fill {
            out.push('\t');
            if let Some(color) = &row.fill {
                out.push_str(&color.0);
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
