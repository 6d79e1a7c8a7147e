mod food_catalog;
mod loader;

pub use food_catalog::{FUZZY_MATCH_THRESHOLD, FoodCatalog};
pub use loader::{load_catalog, read_catalog};
