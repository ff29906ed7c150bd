use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Identifier;
use crate::plate::well::{GridPosition, PLATE_COLUMNS, PLATE_ROWS};

/// Cell fill color as reported by the sheet reader. Only equality matters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color(value.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the gene table: a fill color and the gene it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDefinition {
    pub color: Option<Color>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub gene_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneAssignment {
    pub name: Option<String>,
    pub gene_type: Option<String>,
}

/// Gene identity of a single well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellGene<'a> {
    Resolved(&'a GeneAssignment),
    /// No fill color, or a color without a gene definition.
    Unresolved,
}

/// Color -> (gene name, gene type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GeneDefinition>", into = "Vec<GeneDefinition>")]
pub struct ColorMapping {
    entries: BTreeMap<Color, GeneAssignment>,
}

impl ColorMapping {
    pub fn insert(&mut self, color: Color, assignment: GeneAssignment) {
        self.entries.insert(color, assignment);
    }

    pub fn contains(&self, color: &Color) -> bool {
        self.entries.contains_key(color)
    }

    pub fn resolve(&self, color: Option<&Color>) -> WellGene<'_> {
        match color.and_then(|c| self.entries.get(c)) {
            Some(assignment) if assignment.name.is_some() || assignment.gene_type.is_some() => {
                WellGene::Resolved(assignment)
            }
            _ => WellGene::Unresolved,
        }
    }

    /// Inverse lookup used to paint output rows in the gene's color.
    pub fn color_for_gene(&self, gene_name: &str) -> Option<&Color> {
        self.entries
            .iter()
            .find(|(_, a)| a.name.as_deref() == Some(gene_name))
            .map(|(c, _)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Color, &GeneAssignment)> {
        self.entries.iter()
    }
}

impl From<Vec<GeneDefinition>> for ColorMapping {
    fn from(defs: Vec<GeneDefinition>) -> Self {
        let mut mapping = ColorMapping::default();
        for def in defs {
            // Rows without a name and without a type are blank table rows.
            if def.name.is_none() && def.gene_type.is_none() {
                continue;
            }
            let Some(color) = def.color else {
                continue;
            };
            mapping.insert(
                color,
                GeneAssignment {
                    name: def.name,
                    gene_type: def.gene_type,
                },
            );
        }
        mapping
    }
}

impl From<ColorMapping> for Vec<GeneDefinition> {
    fn from(mapping: ColorMapping) -> Self {
        mapping
            .entries
            .into_iter()
            .map(|(color, a)| GeneDefinition {
                color: Some(color),
                name: a.name,
                gene_type: a.gene_type,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub row: usize,
    pub column: usize,
    #[serde(default)]
    pub identifier: Option<Identifier>,
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCell {
    pub identifier: Option<Identifier>,
    pub color: Option<Color>,
}

/// Grid position -> (sample identifier, fill color), one entry per well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayoutEntry>", into = "Vec<LayoutEntry>")]
pub struct IdentifierMapping {
    cells: BTreeMap<GridPosition, LayoutCell>,
}

impl IdentifierMapping {
    pub fn insert(&mut self, pos: GridPosition, cell: LayoutCell) {
        self.cells.insert(pos, cell);
    }

    pub fn get(&self, pos: GridPosition) -> Option<&LayoutCell> {
        self.cells.get(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridPosition, &LayoutCell)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl TryFrom<Vec<LayoutEntry>> for IdentifierMapping {
    type Error = String;

    fn try_from(entries: Vec<LayoutEntry>) -> Result<Self, Self::Error> {
        let mut mapping = IdentifierMapping::default();
        for e in entries {
            if e.row >= PLATE_ROWS || e.column >= PLATE_COLUMNS {
                return Err(format!(
                    "layout position ({}, {}) is outside the {}x{} plate",
                    e.row, e.column, PLATE_ROWS, PLATE_COLUMNS
                ));
            }
            mapping.insert(
                GridPosition {
                    row: e.row,
                    column: e.column,
                },
                LayoutCell {
                    identifier: e.identifier,
                    color: e.color,
                },
            );
        }
        Ok(mapping)
    }
}

impl From<IdentifierMapping> for Vec<LayoutEntry> {
    fn from(mapping: IdentifierMapping) -> Self {
        mapping
            .cells
            .into_iter()
            .map(|(pos, cell)| LayoutEntry {
                row: pos.row,
                column: pos.column,
                identifier: cell.identifier,
                color: cell.color,
            })
            .collect()
    }
}

/// Raw cycle-threshold readings, 16 logical rows by 24 columns.
/// Rows or columns the reader left out read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<f64>>>", into = "Vec<Vec<Option<f64>>>")]
pub struct CtGrid {
    rows: Vec<Vec<Option<f64>>>,
}

impl CtGrid {
    pub fn get(&self, pos: GridPosition) -> Option<f64> {
        self.rows
            .get(pos.row)
            .and_then(|r| r.get(pos.column))
            .copied()
            .flatten()
    }
}

impl TryFrom<Vec<Vec<Option<f64>>>> for CtGrid {
    type Error = String;

    fn try_from(rows: Vec<Vec<Option<f64>>>) -> Result<Self, Self::Error> {
        if rows.len() > PLATE_ROWS {
            return Err(format!(
                "ct grid has {} rows, plate has {}",
                rows.len(),
                PLATE_ROWS
            ));
        }
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() > PLATE_COLUMNS) {
            return Err(format!(
                "ct grid row {} has {} columns, plate has {}",
                idx,
                row.len(),
                PLATE_COLUMNS
            ));
        }
        Ok(CtGrid { rows })
    }
}

impl From<CtGrid> for Vec<Vec<Option<f64>>> {
    fn from(grid: CtGrid) -> Self {
        grid.rows
    }
}
