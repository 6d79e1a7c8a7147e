pub mod bands;
pub mod constants;
pub mod engine;
pub mod formulation;

pub use bands::{Band, deviation_weight, out_of_band, tolerance_bands, within_tolerance};
pub use constants::*;
pub use engine::{EngineConfig, optimize, optimize_with, validate_request};
pub use formulation::{BandMode, PortionProgram};
