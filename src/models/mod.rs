pub mod food;
pub mod nutrients;
pub mod plan;

pub use food::{DisplayUnit, FoodItem, MealType};
pub use nutrients::{Metric, Nutrients, TargetVector};
pub use plan::{
    DailyPlan, Meal, MealPlan, MetricComparison, OptimizationResult, PortionLine, SolveStatus,
};
