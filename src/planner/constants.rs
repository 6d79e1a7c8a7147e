use crate::models::Meal;

/// Default share of the daily target assigned to each meal, in serving order.
pub const DEFAULT_MEAL_SPLIT: [(Meal, f64); 3] = [
    (Meal::Breakfast, 0.25),
    (Meal::Lunch, 0.40),
    (Meal::Dinner, 0.35),
];

/// Allowed drift of the meal fractions' sum away from 1.0.
pub const SPLIT_SUM_EPSILON: f64 = 1e-6;
