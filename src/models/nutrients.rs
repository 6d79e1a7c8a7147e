use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// One of the four tracked quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Calories, Metric::Protein, Metric::Carbs, Metric::Fat];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Calories => "Calories",
            Metric::Protein => "Protein",
            Metric::Carbs => "Carbs",
            Metric::Fat => "Fat",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Calories => "kcal",
            _ => "g",
        }
    }
}

/// Calories and macros, used for food profiles, targets and achieved totals alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// A daily or per-meal goal. All components must be non-negative.
pub type TargetVector = Nutrients;

impl Nutrients {
    pub const ZERO: Nutrients = Nutrients {
        calories: 0.0,
        protein_g: 0.0,
        carbs_g: 0.0,
        fat_g: 0.0,
    };

    pub fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Calories => self.calories,
            Metric::Protein => self.protein_g,
            Metric::Carbs => self.carbs_g,
            Metric::Fat => self.fat_g,
        }
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    pub fn is_non_negative(&self) -> bool {
        Metric::ALL
            .iter()
            .all(|&m| self.get(m).is_finite() && self.get(m) >= 0.0)
    }

    pub fn is_zero(&self) -> bool {
        Metric::ALL.iter().all(|&m| self.get(m) == 0.0)
    }

    /// Energy implied by the macros at 4/4/9 kcal per gram.
    pub fn macro_calories(&self) -> f64 {
        self.protein_g * 4.0 + self.carbs_g * 4.0 + self.fat_g * 9.0
    }
}

impl Add for Nutrients {
    type Output = Nutrients;

    fn add(self, rhs: Nutrients) -> Nutrients {
        Nutrients {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
        }
    }
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, rhs: Nutrients) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Nutrients>>(iter: I) -> Self {
        iter.fold(Nutrients::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_calories() {
        let n = Nutrients::new(0.0, 10.0, 20.0, 5.0);
        assert!((n.macro_calories() - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_sum_and_get() {
        let total: Nutrients = vec![
            Nutrients::new(100.0, 1.0, 2.0, 3.0),
            Nutrients::new(50.0, 4.0, 5.0, 6.0),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.get(Metric::Calories), 150.0);
        assert_eq!(total.get(Metric::Fat), 9.0);
    }

    #[test]
    fn test_non_negative() {
        assert!(Nutrients::ZERO.is_non_negative());
        assert!(!Nutrients::new(1.0, -0.1, 0.0, 0.0).is_non_negative());
        assert!(!Nutrients::new(f64::NAN, 0.0, 0.0, 0.0).is_non_negative());
    }
}
