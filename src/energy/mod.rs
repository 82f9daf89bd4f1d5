//! Installation kinds, categories and their reference economics.

pub mod kind;
/// Price and emission reference table.
pub mod spec;

pub use kind::{Category, SourceKind};
pub use spec::{EnergySourceSpec, PriceTable};
