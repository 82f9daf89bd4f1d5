//! Placement validity and techno-economic analysis for building-scale
//! renewable installations.

#[cfg(feature = "api")]
pub mod api;
pub mod building;
pub mod config;
pub mod economics;
/// Installation kinds, categories and the price table.
pub mod energy;
pub mod io;
pub mod persistence;
pub mod placement;
pub mod session;
