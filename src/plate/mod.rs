pub mod layout;
pub mod well;

pub use layout::{Color, ColorMapping, CtGrid, GeneAssignment, IdentifierMapping, WellGene};
pub use well::{GridPosition, Well, parse_well};

#[cfg(test)]
#[path = "../../tests/src_inline/plate/layout.rs"]
mod tests;
