use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::FoodCatalog;
use crate::error::Result;
use crate::models::{DisplayUnit, FoodItem, MealType, Nutrients};

/// One CSV row. Nutrients are per 100 g.
#[derive(Debug, Deserialize)]
struct FoodRecord {
    food_id: u32,
    name: String,
    #[serde(default)]
    category: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    meal_type: String,
    #[serde(default)]
    display_unit: Option<String>,
    #[serde(default)]
    max_portion: Option<f64>,
}

impl FoodRecord {
    fn into_food(self) -> Result<FoodItem> {
        let meal_type: MealType = self.meal_type.parse()?;
        let display_unit = match self.display_unit.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.parse::<DisplayUnit>()?),
            _ => None,
        };

        Ok(FoodItem {
            id: self.food_id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            per_100g: Nutrients::new(self.calories, self.protein, self.carbs, self.fat),
            meal_type,
            display_unit,
            max_portion_g: self.max_portion,
        })
    }
}

/// Load a catalog from a CSV file.
///
/// Expected header: `food_id,name,category,calories,protein,carbs,fat,meal_type,display_unit`
/// with an optional trailing `max_portion` column.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<FoodCatalog> {
    let file = File::open(path.as_ref())?;
    let catalog = read_catalog(file)?;
    debug!(
        path = %path.as_ref().display(),
        foods = catalog.len(),
        "loaded food catalog"
    );
    Ok(catalog)
}

/// Parse catalog CSV from any reader.
pub fn read_catalog<R: Read>(reader: R) -> Result<FoodCatalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut foods = Vec::new();
    for record in rdr.deserialize::<FoodRecord>() {
        foods.push(record?.into_food()?);
    }

    FoodCatalog::new(foods)
}
