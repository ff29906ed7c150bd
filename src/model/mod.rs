pub mod diagnostics;
pub mod generation;
pub mod measurement;
pub mod norms;
pub mod profile;

pub use diagnostics::{Diagnostics, Warning};
pub use generation::{Delta, DeltaDelta, Validated};
pub use measurement::{Identifier, Measurement};
pub use norms::NormTable;
pub use profile::AssayProfile;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
