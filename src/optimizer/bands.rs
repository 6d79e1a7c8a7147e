use crate::models::{Metric, Nutrients, TargetVector};
use crate::optimizer::constants::ZERO_TARGET_WEIGHT;

/// Accepted interval for one metric: `[target·(1−tol), target·(1+tol)]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub metric: Metric,
    pub lower: f64,
    pub upper: f64,
}

impl Band {
    pub fn around(metric: Metric, target: f64, tolerance: f64) -> Self {
        Self {
            metric,
            lower: target * (1.0 - tolerance),
            upper: target * (1.0 + tolerance),
        }
    }

    /// Membership test with `epsilon` slack relative to the band's magnitude.
    pub fn contains(&self, value: f64, epsilon: f64) -> bool {
        let slack = epsilon * self.upper.abs().max(1.0);
        value >= self.lower - slack && value <= self.upper + slack
    }
}

/// Bands for every metric with a non-zero target. Zero targets have no band.
pub fn tolerance_bands(target: &TargetVector, tolerance: f64) -> Vec<Band> {
    Metric::ALL
        .iter()
        .filter(|&&m| target.get(m) > 0.0)
        .map(|&m| Band::around(m, target.get(m), tolerance))
        .collect()
}

/// Metrics whose achieved value falls outside its band.
pub fn out_of_band(
    target: &TargetVector,
    achieved: &Nutrients,
    tolerance: f64,
    epsilon: f64,
) -> Vec<Metric> {
    tolerance_bands(target, tolerance)
        .into_iter()
        .filter(|band| !band.contains(achieved.get(band.metric), epsilon))
        .map(|band| band.metric)
        .collect()
}

pub fn within_tolerance(
    target: &TargetVector,
    achieved: &Nutrients,
    tolerance: f64,
    epsilon: f64,
) -> bool {
    out_of_band(target, achieved, tolerance, epsilon).is_empty()
}

/// Objective weight for a metric's deviation variables.
///
/// Inverse of the target magnitude so that kcal and grams contribute comparably.
pub fn deviation_weight(target_value: f64) -> f64 {
    if target_value > 0.0 {
        1.0 / target_value
    } else {
        ZERO_TARGET_WEIGHT
    }
}
