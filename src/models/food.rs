use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::nutrients::Nutrients;

/// Which meals a food is appropriate for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    LunchDinner,
    All,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::LunchDinner => "lunch_dinner",
            MealType::All => "all",
        }
    }
}

impl FromStr for MealType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch_dinner" => Ok(MealType::LunchDinner),
            "all" => Ok(MealType::All),
            other => Err(PlannerError::InvalidCatalog(format!(
                "unknown meal type '{}'",
                other
            ))),
        }
    }
}

/// Presentation hint: a named household unit and its mass in grams.
///
/// Parsed from `"<unit-name>:<unit-mass>"`, e.g. `"egg:50"`. Never read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayUnit {
    pub name: String,
    pub grams: f64,
}

impl DisplayUnit {
    /// How many units a quantity in grams corresponds to.
    pub fn count(&self, grams: f64) -> f64 {
        grams / self.grams
    }
}

impl FromStr for DisplayUnit {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, grams) = s
            .split_once(':')
            .ok_or_else(|| PlannerError::InvalidCatalog(format!("bad display unit '{}'", s)))?;

        let name = name.trim();
        let grams: f64 = grams
            .trim()
            .parse()
            .map_err(|_| PlannerError::InvalidCatalog(format!("bad display unit mass '{}'", s)))?;

        if name.is_empty() || !(grams > 0.0) {
            return Err(PlannerError::InvalidCatalog(format!(
                "bad display unit '{}'",
                s
            )));
        }

        Ok(Self {
            name: name.to_string(),
            grams,
        })
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.grams)
    }
}

/// A catalog food with its nutrient profile per 100 g.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub per_100g: Nutrients,
    pub meal_type: MealType,
    pub display_unit: Option<DisplayUnit>,
    /// Overrides the engine's default serving cap for this food.
    pub max_portion_g: Option<f64>,
}

impl FoodItem {
    /// Nutrients contributed by one gram.
    #[inline]
    pub fn per_gram(&self) -> Nutrients {
        self.per_100g.scale(0.01)
    }

    /// Nutrients contributed by `grams` of this food.
    #[inline]
    pub fn nutrients_for(&self, grams: f64) -> Nutrients {
        self.per_100g.scale(grams / 100.0)
    }

    /// Basic validation: non-negative profile and a positive cap if one is set.
    pub fn is_valid(&self) -> bool {
        self.per_100g.is_non_negative() && self.max_portion_g.is_none_or(|cap| cap > 0.0)
    }
}

impl PartialEq for FoodItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FoodItem {}

impl std::hash::Hash for FoodItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_food() -> FoodItem {
        FoodItem {
            id: 1,
            name: "Chicken Breast".to_string(),
            category: "protein".to_string(),
            per_100g: Nutrients::new(165.0, 31.0, 0.0, 3.6),
            meal_type: MealType::LunchDinner,
            display_unit: None,
            max_portion_g: None,
        }
    }

    #[test]
    fn test_nutrients_for() {
        let food = sample_food();
        let n = food.nutrients_for(200.0);
        assert!((n.calories - 330.0).abs() < 1e-9);
        assert!((n.protein_g - 62.0).abs() < 1e-9);
        assert!((n.fat_g - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_is_valid() {
        let food = sample_food();
        assert!(food.is_valid());

        let mut invalid = sample_food();
        invalid.per_100g.fat_g = -1.0;
        assert!(!invalid.is_valid());

        let mut zero_cap = sample_food();
        zero_cap.max_portion_g = Some(0.0);
        assert!(!zero_cap.is_valid());
    }

    #[test]
    fn test_equality_by_id() {
        let a = sample_food();
        let mut b = sample_food();
        b.name = "Renamed".to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_unit_parse() {
        let unit: DisplayUnit = "egg:50".parse().unwrap();
        assert_eq!(unit.name, "egg");
        assert!((unit.count(100.0) - 2.0).abs() < 1e-9);

        assert!("egg".parse::<DisplayUnit>().is_err());
        assert!("egg:abc".parse::<DisplayUnit>().is_err());
        assert!("egg:0".parse::<DisplayUnit>().is_err());
        assert!(":15".parse::<DisplayUnit>().is_err());
    }

    #[test]
    fn test_meal_type_parse() {
        assert_eq!("Breakfast".parse::<MealType>().unwrap(), MealType::Breakfast);
        assert_eq!("lunch_dinner".parse::<MealType>().unwrap(), MealType::LunchDinner);
        assert!("brunch".parse::<MealType>().is_err());
    }
}
