/// Visual force fields that offset generated geometry.
pub mod tidal;

pub use tidal::{DeformationStrategy, TidalField, TidalTuning};
