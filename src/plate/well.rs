use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QpcrError, Result};

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const PLATE_ROWS: usize = 16;
pub const PLATE_COLUMNS: usize = 24;

/// The cycle-threshold block of the data sheet starts at sheet row 4 and
/// every logical plate row occupies 4 sheet rows.
pub const SHEET_ROW_OFFSET: u32 = 4;
pub const SHEET_ROW_STEP: u32 = 4;
/// Sheet column C holds plate column 1.
pub const SHEET_COLUMN_OFFSET: u32 = 2;

/// A physical well, row letter plus 1-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Well {
    pub row: char,
    pub column: u32,
}

/// Zero-based logical grid coordinate of a well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

/// 1-based coordinate of a cell on the instrument's data sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetCell {
    pub row: u32,
    pub column: u32,
}

impl Well {
    pub fn row_index(&self) -> usize {
        (self.row as u32).wrapping_sub('A' as u32) as usize
    }

    pub fn is_on_plate(&self) -> bool {
        self.row_index() < PLATE_ROWS && (1..=PLATE_COLUMNS).contains(&(self.column as usize))
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

/// Parses "9A", "A9", "12B" or "B12". Either the row letter leads and the
/// column follows, or the column leads and the row letter trails.
pub fn parse_well(label: &str) -> Result<Well> {
    let unparseable = || QpcrError::UnparseableWell(label.to_string());

    let chars: Vec<char> = label.chars().collect();
    if !(2..=3).contains(&chars.len()) {
        return Err(unparseable());
    }

    let (row, digits) = if chars[0].is_ascii_alphabetic() {
        (chars[0], &chars[1..])
    } else {
        (chars[chars.len() - 1], &chars[..chars.len() - 1])
    };

    if !row.is_ascii_alphabetic() || !digits.iter().all(|c| c.is_ascii_digit()) {
        return Err(unparseable());
    }
    let column: u32 = digits
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| unparseable())?;
    if column == 0 {
        return Err(unparseable());
    }

    Ok(Well {
        row: row.to_ascii_uppercase(),
        column,
    })
}

pub fn well_to_grid_position(well: &Well) -> Result<GridPosition> {
    if !well.is_on_plate() {
        return Err(QpcrError::WellOutOfRange {
            well: well.to_string(),
            rows: PLATE_ROWS,
            columns: PLATE_COLUMNS,
        });
    }
    Ok(GridPosition {
        row: well.row_index(),
        column: well.column as usize - 1,
    })
}

pub fn grid_position_to_well(pos: GridPosition) -> Result<Well> {
    let row = ALPHABET.get(pos.row).ok_or_else(|| {
        QpcrError::InvalidPlate(format!("grid row {} has no row letter", pos.row))
    })?;
    Ok(Well {
        row: *row as char,
        column: pos.column as u32 + 1,
    })
}

pub fn well_to_sheet_cell(well: &Well) -> Result<SheetCell> {
    let pos = well_to_grid_position(well)?;
    Ok(SheetCell {
        row: SHEET_ROW_OFFSET + SHEET_ROW_STEP * pos.row as u32,
        column: well.column + SHEET_COLUMN_OFFSET,
    })
}

pub fn sheet_cell_to_well(cell: SheetCell) -> Result<Well> {
    if cell.row < SHEET_ROW_OFFSET || cell.column <= SHEET_COLUMN_OFFSET {
        return Err(QpcrError::InvalidPlate(format!(
            "sheet cell ({}, {}) lies before the ct block",
            cell.row, cell.column
        )));
    }
    grid_position_to_well(GridPosition {
        row: ((cell.row - SHEET_ROW_OFFSET) / SHEET_ROW_STEP) as usize,
        column: (cell.column - SHEET_COLUMN_OFFSET - 1) as usize,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/plate/well.rs"]
mod tests;
