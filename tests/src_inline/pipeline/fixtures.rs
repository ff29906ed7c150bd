use crate::input::PlateInput;
use crate::model::Identifier;
use crate::plate::layout::{GeneAssignment, LayoutCell};
use crate::plate::well::{PLATE_COLUMNS, PLATE_ROWS, parse_well, well_to_grid_position};
use crate::plate::{Color, CtGrid};

pub const HOXB: &str = "#ff0000";
pub const ACTB: &str = "#00ff00";

pub struct PlateBuilder {
    plate: PlateInput,
    grid: Vec<Vec<Option<f64>>>,
}

impl PlateBuilder {
    pub fn new() -> Self {
        Self {
            plate: PlateInput::default(),
            grid: vec![vec![None; PLATE_COLUMNS]; PLATE_ROWS],
        }
    }

    pub fn gene(mut self, color: &str, name: &str, gene_type: &str) -> Self {
        self.plate.genes.insert(
            Color::from(color),
            GeneAssignment {
                name: Some(name.to_string()),
                gene_type: Some(gene_type.to_string()),
            },
        );
        self
    }

    pub fn well(mut self, label: &str, identifier: Option<Identifier>, color: &str, ct: Option<f64>) -> Self {
        let pos = well_to_grid_position(&parse_well(label).unwrap()).unwrap();
        self.plate.layout.insert(
            pos,
            LayoutCell {
                identifier,
                color: Some(Color::from(color)),
            },
        );
        self.grid[pos.row][pos.column] = ct;
        self
    }

    /// Three consecutive wells in one row, e.g. `replicates("A", 1, ...)`
    /// fills A1, A2 and A3.
    pub fn replicates(mut self, row: &str, first: u32, identifier: &str, color: &str, cts: [f64; 3]) -> Self {
        for (i, ct) in cts.iter().enumerate() {
            let label = format!("{}{}", row, first + i as u32);
            self = self.well(&label, Some(Identifier::from(identifier)), color, Some(*ct));
        }
        self
    }

    pub fn gene_order(mut self, order: &[&str]) -> Self {
        self.plate.gene_order = Some(order.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build(mut self) -> PlateInput {
        self.plate.ct_grid = CtGrid::try_from(self.grid).unwrap();
        self.plate
    }
}

/// HOXB (target) and ACTB (HK) for samples "1" and "2", three replicates each.
pub fn two_gene_builder() -> PlateBuilder {
    PlateBuilder::new()
        .gene(HOXB, "HOXB", "target")
        .gene(ACTB, "ACTB", "HK")
        .replicates("A", 1, "1", HOXB, [20.0, 21.0, 22.0])
        .replicates("B", 1, "1", ACTB, [18.0, 18.0, 18.0])
        .replicates("A", 4, "2", HOXB, [19.0, 20.0, 21.0])
        .replicates("B", 4, "2", ACTB, [17.0, 18.0, 19.0])
}

/// The two-gene plate plus reference ("pluri") wells for both genes.
pub fn reference_builder() -> PlateBuilder {
    two_gene_builder()
        .replicates("C", 1, "pluri", HOXB, [24.0, 24.0, 24.0])
        .replicates("D", 1, "pluri", ACTB, [16.0, 16.0, 16.0])
}
