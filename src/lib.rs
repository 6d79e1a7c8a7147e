pub mod bench;
pub mod calculator;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod optimizer;
pub mod planner;

pub use catalog::FoodCatalog;
pub use error::{PlannerError, Result};
pub use models::{DailyPlan, FoodItem, Nutrients, OptimizationResult, SolveStatus, TargetVector};
pub use optimizer::optimize;
pub use planner::{PlanRequest, create_daily_plan};
