use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{Meal, TargetVector};
use crate::planner::constants::{DEFAULT_MEAL_SPLIT, SPLIT_SUM_EPSILON};

/// Ordered per-meal fractions of the daily target.
///
/// Serialized as a list of `[meal, fraction]` pairs; deserialization goes
/// through `MealSplit::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Meal, f64)>", into = "Vec<(Meal, f64)>")]
pub struct MealSplit {
    shares: Vec<(Meal, f64)>,
}

impl MealSplit {
    /// Fractions must be positive, meals distinct, and the sum must be 1.0.
    pub fn new(shares: Vec<(Meal, f64)>) -> Result<Self> {
        if shares.is_empty() {
            return Err(PlannerError::InvalidInput(
                "meal split needs at least one meal".to_string(),
            ));
        }

        for (i, (meal, fraction)) in shares.iter().enumerate() {
            if !fraction.is_finite() || *fraction <= 0.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "{} fraction must be positive, got {}",
                    meal.name(),
                    fraction
                )));
            }
            if shares[..i].iter().any(|(m, _)| m == meal) {
                return Err(PlannerError::InvalidInput(format!(
                    "{} appears twice in meal split",
                    meal.name()
                )));
            }
        }

        let sum: f64 = shares.iter().map(|(_, f)| f).sum();
        if (sum - 1.0).abs() > SPLIT_SUM_EPSILON {
            return Err(PlannerError::InvalidInput(format!(
                "meal fractions must sum to 1.0, got {:.4}",
                sum
            )));
        }

        Ok(Self { shares })
    }

    pub fn shares(&self) -> &[(Meal, f64)] {
        &self.shares
    }

    /// Per-meal sub-targets: the daily target scaled by each fraction.
    pub fn sub_targets(&self, daily: &TargetVector) -> Vec<(Meal, f64, TargetVector)> {
        self.shares
            .iter()
            .map(|&(meal, fraction)| (meal, fraction, daily.scale(fraction)))
            .collect()
    }
}

impl Default for MealSplit {
    fn default() -> Self {
        Self {
            shares: DEFAULT_MEAL_SPLIT.to_vec(),
        }
    }
}

impl TryFrom<Vec<(Meal, f64)>> for MealSplit {
    type Error = PlannerError;

    fn try_from(shares: Vec<(Meal, f64)>) -> Result<Self> {
        MealSplit::new(shares)
    }
}

impl From<MealSplit> for Vec<(Meal, f64)> {
    fn from(split: MealSplit) -> Self {
        split.shares
    }
}

/// Parses `"breakfast=0.3,lunch=0.4,dinner=0.3"`.
impl FromStr for MealSplit {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let shares = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| -> Result<(Meal, f64)> {
                let (meal, fraction) = part.split_once('=').ok_or_else(|| {
                    PlannerError::InvalidInput(format!("expected meal=fraction, got '{}'", part))
                })?;
                let meal: Meal = meal.parse()?;
                let fraction: f64 = fraction.trim().parse().map_err(|_| {
                    PlannerError::InvalidInput(format!("invalid fraction in '{}'", part))
                })?;
                Ok((meal, fraction))
            })
            .collect::<Result<Vec<_>>>()?;

        MealSplit::new(shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrients;

    #[test]
    fn test_default_split_sums_to_one() {
        let split = MealSplit::default();
        let sum: f64 = split.shares().iter().map(|(_, f)| f).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(split.shares()[1], (Meal::Lunch, 0.40));
    }

    #[test]
    fn test_sub_targets() {
        let daily = Nutrients::new(2000.0, 150.0, 200.0, 65.0);
        let subs = MealSplit::default().sub_targets(&daily);
        assert_eq!(subs.len(), 3);
        let (meal, _, breakfast) = subs[0];
        assert_eq!(meal, Meal::Breakfast);
        assert!((breakfast.calories - 500.0).abs() < 1e-9);
        assert!((breakfast.protein_g - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_splits() {
        assert!(MealSplit::new(vec![]).is_err());
        assert!(MealSplit::new(vec![(Meal::Lunch, 0.5), (Meal::Dinner, 0.4)]).is_err());
        assert!(MealSplit::new(vec![(Meal::Lunch, 1.2), (Meal::Dinner, -0.2)]).is_err());
        assert!(MealSplit::new(vec![(Meal::Lunch, 0.5), (Meal::Lunch, 0.5)]).is_err());
    }

    #[test]
    fn test_parse() {
        let split: MealSplit = "breakfast=0.3, lunch=0.4, dinner=0.3".parse().unwrap();
        assert_eq!(split.shares().len(), 3);
        assert!("lunch=abc".parse::<MealSplit>().is_err());
        assert!("brunch=1.0".parse::<MealSplit>().is_err());
        assert!("lunch".parse::<MealSplit>().is_err());
    }

    #[test]
    fn test_deserialize_validates_fractions() {
        let split: MealSplit =
            serde_json::from_str(r#"[["breakfast", 0.3], ["lunch", 0.4], ["dinner", 0.3]]"#)
                .unwrap();
        assert_eq!(split.shares()[2], (Meal::Dinner, 0.3));

        let json = serde_json::to_string(&split).unwrap();
        assert_eq!(serde_json::from_str::<MealSplit>(&json).unwrap(), split);

        let err = serde_json::from_str::<MealSplit>(r#"[["lunch", 0.5], ["dinner", 0.4]]"#)
            .unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"), "{err}");
    }
}
