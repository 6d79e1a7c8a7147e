use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calculator::constants::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::models::{Nutrients, TargetVector};

/// A named daily target to time the planner against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchCase {
    pub name: String,
    pub target: TargetVector,
}

impl BenchCase {
    pub fn new(name: impl Into<String>, target: TargetVector) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    /// Random daily target drawn from `ranges`, fat taking the remaining energy.
    pub fn random(rng: &mut impl Rng, ranges: &TargetRanges, index: usize) -> Self {
        let calories = rng.gen_range(ranges.calories.0..=ranges.calories.1);
        let protein_share = rng.gen_range(ranges.protein_share.0..=ranges.protein_share.1);
        let carbs_share = rng.gen_range(ranges.carbs_share.0..=ranges.carbs_share.1);
        let fat_share = (1.0 - protein_share - carbs_share).max(0.0);

        let target = Nutrients::new(
            calories.round(),
            (calories * protein_share / KCAL_PER_G_PROTEIN).round(),
            (calories * carbs_share / KCAL_PER_G_CARBS).round(),
            (calories * fat_share / KCAL_PER_G_FAT).round(),
        );
        Self::new(format!("random-{:03}", index + 1), target)
    }
}

/// The fixed low-calorie, maintenance and bulk cases.
pub fn standard_cases() -> Vec<BenchCase> {
    vec![
        BenchCase::new("Low Cal", Nutrients::new(1500.0, 120.0, 150.0, 50.0)),
        BenchCase::new("Maintenance", Nutrients::new(2000.0, 150.0, 200.0, 65.0)),
        BenchCase::new("Bulk", Nutrients::new(2800.0, 200.0, 320.0, 80.0)),
    ]
}

/// Sampling ranges for random targets. Shares are fractions of calories.
#[derive(Debug, Clone)]
pub struct TargetRanges {
    pub calories: (f64, f64),
    pub protein_share: (f64, f64),
    pub carbs_share: (f64, f64),
}

impl Default for TargetRanges {
    fn default() -> Self {
        Self {
            calories: (1400.0, 3200.0),
            protein_share: (0.20, 0.35),
            carbs_share: (0.35, 0.55),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_standard_cases() {
        let cases = standard_cases();
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[2].target.calories, 2800.0);
    }

    #[test]
    fn test_random_cases_are_seeded_and_in_range() {
        let ranges = TargetRanges::default();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        for i in 0..20 {
            let x = BenchCase::random(&mut a, &ranges, i);
            let y = BenchCase::random(&mut b, &ranges, i);
            assert_eq!(x.target, y.target);
            assert!(x.target.calories >= 1400.0 && x.target.calories <= 3200.0);
            assert!(x.target.is_non_negative());
        }
    }
}
