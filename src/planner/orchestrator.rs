use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::catalog::FoodCatalog;
use crate::models::{DailyPlan, FoodItem, Meal, MealPlan, Nutrients, TargetVector};
use crate::optimizer::{DEFAULT_TOLERANCE, EngineConfig, optimize_with};
use crate::planner::split::MealSplit;

/// Everything a daily plan depends on besides the catalog.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub target: TargetVector,
    pub tolerance: f64,
    pub split: MealSplit,
    pub engine: EngineConfig,
    /// Food ids never offered to the engine.
    pub excluded: HashSet<u32>,
}

impl PlanRequest {
    pub fn new(target: TargetVector) -> Self {
        Self {
            target,
            tolerance: DEFAULT_TOLERANCE,
            split: MealSplit::default(),
            engine: EngineConfig::default(),
            excluded: HashSet::new(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_split(mut self, split: MealSplit) -> Self {
        self.split = split;
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.excluded.extend(ids);
        self
    }
}

/// Candidate foods for one meal: meal-appropriate and not excluded.
pub fn meal_candidates<'a>(
    catalog: &'a FoodCatalog,
    meal: Meal,
    excluded: &HashSet<u32>,
) -> Vec<&'a FoodItem> {
    catalog
        .for_meal(meal)
        .into_iter()
        .filter(|f| !excluded.contains(&f.id))
        .collect()
}

/// Plan every meal of the day.
///
/// Meals are optimized in parallel and returned in split order. A meal that
/// fails or cannot meet its tolerance is kept with its status; it does not
/// stop the others. Totals cover optimal meals only.
pub fn create_daily_plan(catalog: &FoodCatalog, request: &PlanRequest) -> DailyPlan {
    let meals: Vec<MealPlan> = request
        .split
        .sub_targets(&request.target)
        .into_par_iter()
        .map(|(meal, fraction, target)| {
            let candidates = meal_candidates(catalog, meal, &request.excluded);
            let candidate_count = candidates.len();
            let result = optimize_with(candidates, &target, request.tolerance, &request.engine);

            if result.is_optimal() {
                info!(
                    meal = meal.name(),
                    candidates = candidate_count,
                    foods = result.portions.len(),
                    "meal planned"
                );
            } else {
                warn!(
                    meal = meal.name(),
                    status = %result.status,
                    cause = result.cause.as_deref().unwrap_or(""),
                    "could not optimize meal"
                );
            }

            MealPlan {
                meal,
                fraction,
                target,
                candidate_count,
                result,
            }
        })
        .collect();

    let totals: Nutrients = meals
        .iter()
        .filter(|m| m.result.is_optimal())
        .map(|m| m.result.totals)
        .sum();

    DailyPlan {
        target: request.target,
        tolerance: request.tolerance,
        meals,
        totals,
    }
}
