pub mod constants;
pub mod orchestrator;
pub mod split;

pub use constants::*;
pub use orchestrator::{PlanRequest, create_daily_plan, meal_candidates};
pub use split::MealSplit;
