use std::collections::{BTreeSet, HashSet};

use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::models::{FoodItem, Meal};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Immutable set of foods, ordered by id.
///
/// Built once by the caller and shared by reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    foods: Vec<FoodItem>,
}

impl FoodCatalog {
    /// Build a catalog, rejecting duplicate ids and invalid nutrient profiles.
    pub fn new(mut foods: Vec<FoodItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for food in &foods {
            if !seen.insert(food.id) {
                return Err(PlannerError::InvalidCatalog(format!(
                    "duplicate food id {}",
                    food.id
                )));
            }
            if !food.is_valid() {
                return Err(PlannerError::InvalidCatalog(format!(
                    "invalid nutrient data for '{}'",
                    food.name
                )));
            }
        }

        foods.sort_by_key(|f| f.id);
        Ok(Self { foods })
    }

    pub fn get(&self, id: u32) -> Option<&FoodItem> {
        self.foods
            .binary_search_by_key(&id, |f| f.id)
            .ok()
            .map(|idx| &self.foods[idx])
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&FoodItem> {
        let needle = name.trim().to_lowercase();
        self.foods.iter().find(|f| f.name.to_lowercase() == needle)
    }

    /// Foods whose name resembles `query`, best match first.
    pub fn fuzzy_matches(&self, query: &str) -> Vec<(&FoodItem, f64)> {
        let needle = query.trim().to_lowercase();
        let mut candidates: Vec<(&FoodItem, f64)> = self
            .foods
            .iter()
            .map(|f| (f, jaro_winkler(&f.name.to_lowercase(), &needle)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.id.cmp(&b.0.id))
        });
        candidates
    }

    /// Resolve a user reference: numeric id, exact name, then best fuzzy match.
    pub fn resolve(&self, reference: &str) -> Result<&FoodItem> {
        let reference = reference.trim();
        if let Ok(id) = reference.parse::<u32>() {
            return self
                .get(id)
                .ok_or_else(|| PlannerError::FoodNotFound(format!("id {}", id)));
        }
        self.find_by_name(reference)
            .or_else(|| self.fuzzy_matches(reference).first().map(|(f, _)| *f))
            .ok_or_else(|| PlannerError::FoodNotFound(reference.to_string()))
    }

    pub fn all(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Foods suitable for `meal`.
    pub fn for_meal(&self, meal: Meal) -> Vec<&FoodItem> {
        self.foods
            .iter()
            .filter(|f| meal.accepts(f.meal_type))
            .collect()
    }

    /// Every food except the given ids.
    pub fn without(&self, excluded: &HashSet<u32>) -> Vec<&FoodItem> {
        self.foods
            .iter()
            .filter(|f| !excluded.contains(&f.id))
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&FoodItem> {
        self.foods
            .iter()
            .filter(|f| f.category.eq_ignore_ascii_case(category))
            .collect()
    }

    pub fn categories(&self) -> BTreeSet<&str> {
        self.foods.iter().map(|f| f.category.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, Nutrients};

    fn food(id: u32, name: &str, category: &str, meal_type: MealType) -> FoodItem {
        FoodItem {
            id,
            name: name.to_string(),
            category: category.to_string(),
            per_100g: Nutrients::new(100.0, 5.0, 10.0, 2.0),
            meal_type,
            display_unit: None,
            max_portion_g: None,
        }
    }

    fn sample_catalog() -> FoodCatalog {
        FoodCatalog::new(vec![
            food(3, "Salmon", "protein", MealType::LunchDinner),
            food(1, "Oatmeal", "carbs", MealType::Breakfast),
            food(2, "Banana", "fruit", MealType::All),
        ])
        .unwrap()
    }

    #[test]
    fn test_sorted_by_id() {
        let catalog = sample_catalog();
        let ids: Vec<u32> = catalog.all().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.get(3).unwrap().name, "Salmon");
        assert!(catalog.get(9).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = FoodCatalog::new(vec![
            food(1, "Oatmeal", "carbs", MealType::Breakfast),
            food(1, "Granola", "carbs", MealType::Breakfast),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_for_meal() {
        let catalog = sample_catalog();
        let breakfast: Vec<&str> = catalog
            .for_meal(Meal::Breakfast)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(breakfast, vec!["Oatmeal", "Banana"]);

        let dinner: Vec<&str> = catalog
            .for_meal(Meal::Dinner)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(dinner, vec!["Banana", "Salmon"]);
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let catalog = sample_catalog();
        assert!(catalog.find_by_name("salmon").is_some());
        assert!(catalog.find_by_name("  BANANA ").is_some());
        assert!(catalog.find_by_name("apple").is_none());
    }

    #[test]
    fn test_fuzzy_matches() {
        let catalog = sample_catalog();
        let matches = catalog.fuzzy_matches("salmn");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].0.name, "Salmon");
    }

    #[test]
    fn test_resolve() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve("2").unwrap().name, "Banana");
        assert_eq!(catalog.resolve("oatmeal").unwrap().id, 1);
        assert_eq!(catalog.resolve("Salmn").unwrap().id, 3);
        assert!(matches!(
            catalog.resolve("42"),
            Err(PlannerError::FoodNotFound(_))
        ));
        assert!(catalog.resolve("xyzzy").is_err());
    }

    #[test]
    fn test_without() {
        let catalog = sample_catalog();
        let excluded: HashSet<u32> = [1, 3].into_iter().collect();
        let rest = catalog.without(&excluded);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "Banana");
    }

    #[test]
    fn test_by_category() {
        let catalog = sample_catalog();
        assert_eq!(catalog.by_category("PROTEIN").len(), 1);
        assert_eq!(catalog.categories().len(), 3);
    }
}
