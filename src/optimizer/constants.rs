/// Default fractional band around each target component.
pub const DEFAULT_TOLERANCE: f64 = 0.15;

/// Realistic serving ceiling per food in grams, independent of nutrient density.
pub const DEFAULT_MAX_PORTION_G: f64 = 300.0;

/// Quantities below this many grams are treated as unused and dropped.
pub const NEGLIGIBLE_G: f64 = 1.0;

/// Deviation weight for a metric whose target is zero (1/target is undefined).
pub const ZERO_TARGET_WEIGHT: f64 = 100.0;

/// Per-gram cost added to the objective so that ties resolve toward less food.
pub const QUANTITY_REGULARIZER: f64 = 1e-6;

/// Relative slack when checking achieved totals against a band (solver float noise).
pub const BAND_EPSILON: f64 = 1e-6;

/// Upper limit on candidate foods per invocation.
pub const MAX_CANDIDATES: usize = 500;
