use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::food::MealType;
use crate::models::nutrients::{Metric, Nutrients, TargetVector};

/// Outcome of a single engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Error,
}

impl SolveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Error => "error",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single food in an allocation, with the nutrients its portion contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionLine {
    pub food_id: u32,
    pub name: String,
    /// Quantity in grams.
    pub quantity_g: f64,
    pub nutrients: Nutrients,
}

/// Engine response: status, non-negligible portions and their exact totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub status: SolveStatus,
    pub portions: Vec<PortionLine>,
    pub totals: Nutrients,
    /// Human-readable reason for `Infeasible` / `Error`.
    pub cause: Option<String>,
}

impl OptimizationResult {
    pub fn error(cause: impl Into<String>) -> Self {
        Self {
            status: SolveStatus::Error,
            portions: Vec::new(),
            totals: Nutrients::ZERO,
            cause: Some(cause.into()),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Food id to grams.
    pub fn allocation(&self) -> BTreeMap<u32, f64> {
        self.portions
            .iter()
            .map(|p| (p.food_id, p.quantity_g))
            .collect()
    }
}

/// A meal slot in the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub fn name(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }

    /// Whether foods tagged `meal_type` may be served at this meal.
    pub fn accepts(&self, meal_type: MealType) -> bool {
        match (self, meal_type) {
            (_, MealType::All) => true,
            (Meal::Breakfast, MealType::Breakfast) => true,
            (Meal::Lunch | Meal::Dinner, MealType::LunchDinner) => true,
            _ => false,
        }
    }
}

impl FromStr for Meal {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Meal::Breakfast),
            "lunch" => Ok(Meal::Lunch),
            "dinner" => Ok(Meal::Dinner),
            other => Err(PlannerError::InvalidInput(format!("unknown meal '{}'", other))),
        }
    }
}

/// Engine result for one meal, together with the sub-target it was asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub meal: Meal,
    pub fraction: f64,
    pub target: TargetVector,
    pub candidate_count: usize,
    pub result: OptimizationResult,
}

/// Target versus achieved for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: Metric,
    pub target: f64,
    pub actual: f64,
    pub diff: f64,
    /// Signed percentage deviation; 0 when the target is 0.
    pub deviation_pct: f64,
}

/// All meals of a day plus the aggregate over successful meals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPlan {
    pub target: TargetVector,
    pub tolerance: f64,
    pub meals: Vec<MealPlan>,
    pub totals: Nutrients,
}

impl DailyPlan {
    pub fn optimal_meals(&self) -> impl Iterator<Item = &MealPlan> {
        self.meals.iter().filter(|m| m.result.is_optimal())
    }

    /// True if no meal could be planned.
    pub fn is_failed(&self) -> bool {
        self.optimal_meals().next().is_none()
    }

    pub fn comparison(&self) -> Vec<MetricComparison> {
        Metric::ALL
            .iter()
            .map(|&metric| {
                let target = self.target.get(metric);
                let actual = self.totals.get(metric);
                let diff = actual - target;
                let deviation_pct = if target > 0.0 {
                    diff / target * 100.0
                } else {
                    0.0
                };
                MetricComparison {
                    metric,
                    target,
                    actual,
                    diff,
                    deviation_pct,
                }
            })
            .collect()
    }
}
