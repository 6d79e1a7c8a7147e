#[macro_use]
extern crate assert_float_eq;

use std::path::PathBuf;

use portion_planner_rs::calculator::Goal;
use portion_planner_rs::catalog::{FoodCatalog, load_catalog};
use portion_planner_rs::interface::plan_to_json;
use portion_planner_rs::models::{Meal, Metric, Nutrients, SolveStatus};
use portion_planner_rs::optimizer::tolerance_bands;
use portion_planner_rs::planner::{MealSplit, PlanRequest, create_daily_plan};

fn bundled_catalog() -> FoodCatalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/foods.csv");
    load_catalog(path).expect("bundled catalog loads")
}

#[test]
fn test_bundled_catalog_is_valid() {
    let catalog = bundled_catalog();
    assert!(catalog.len() >= 30);
    assert!(!catalog.for_meal(Meal::Breakfast).is_empty());
    assert!(!catalog.for_meal(Meal::Dinner).is_empty());
    let eggs = catalog.find_by_name("eggs").unwrap();
    assert_eq!(eggs.display_unit.as_ref().unwrap().grams, 50.0);
}

#[test]
fn test_maintenance_day_is_planned() {
    let catalog = bundled_catalog();
    let request = PlanRequest::new(Goal::Maintenance.preset());
    let plan = create_daily_plan(&catalog, &request);

    let meals: Vec<Meal> = plan.meals.iter().map(|m| m.meal).collect();
    assert_eq!(meals, vec![Meal::Breakfast, Meal::Lunch, Meal::Dinner]);
    assert_eq!(plan.optimal_meals().count(), 3);

    for meal in &plan.meals {
        for band in tolerance_bands(&meal.target, request.tolerance) {
            let value = meal.result.totals.get(band.metric);
            assert!(
                band.contains(value, 1e-6),
                "{} {} {} outside band",
                meal.meal.name(),
                band.metric.label(),
                value
            );
        }
        for line in &meal.result.portions {
            let food = catalog.get(line.food_id).unwrap();
            assert!(meal.meal.accepts(food.meal_type), "{} at {}", food.name, meal.meal.name());
        }
    }

    let summed: Nutrients = plan.optimal_meals().map(|m| m.result.totals).sum();
    for metric in Metric::ALL {
        assert_float_absolute_eq!(plan.totals.get(metric), summed.get(metric), 1e-9);
    }
}

#[test]
fn test_exclusions_never_appear() {
    let catalog = bundled_catalog();
    let chicken = catalog.find_by_name("Chicken Breast").unwrap().id;
    let oatmeal = catalog.find_by_name("Oatmeal").unwrap().id;

    let request = PlanRequest::new(Goal::MuscleGain.preset()).excluding([chicken, oatmeal]);
    let plan = create_daily_plan(&catalog, &request);

    for meal in &plan.meals {
        let ids = meal.result.allocation();
        assert!(!ids.contains_key(&chicken));
        assert!(!ids.contains_key(&oatmeal));
    }
}

#[test]
fn test_custom_split_scales_sub_targets() {
    let catalog = bundled_catalog();
    let split: MealSplit = "lunch=0.5,dinner=0.5".parse().unwrap();
    let request = PlanRequest::new(Nutrients::new(2000.0, 150.0, 200.0, 60.0)).with_split(split);
    let plan = create_daily_plan(&catalog, &request);

    assert_eq!(plan.meals.len(), 2);
    for meal in &plan.meals {
        assert_float_absolute_eq!(meal.target.calories, 1000.0, 1e-9);
        assert_float_absolute_eq!(meal.target.protein_g, 75.0, 1e-9);
    }
}

#[test]
fn test_plan_is_deterministic() {
    let catalog = bundled_catalog();
    let request = PlanRequest::new(Goal::WeightLoss.preset());
    let a = create_daily_plan(&catalog, &request);
    let b = create_daily_plan(&catalog, &request);

    for (x, y) in a.meals.iter().zip(&b.meals) {
        assert_eq!(x.result.status, y.result.status);
        assert_eq!(x.result.allocation(), y.result.allocation());
    }
}

#[test]
fn test_impossible_day_reports_every_meal() {
    let catalog = bundled_catalog();
    // 3 g of fat a day is below what any protein-rich selection carries.
    let request =
        PlanRequest::new(Nutrients::new(2000.0, 250.0, 200.0, 3.0)).with_tolerance(0.01);
    let plan = create_daily_plan(&catalog, &request);

    assert_eq!(plan.meals.len(), 3);
    for meal in &plan.meals {
        assert_ne!(meal.result.status, SolveStatus::Error);
        if meal.result.status == SolveStatus::Infeasible {
            assert!(meal.result.cause.is_some());
        }
    }
}

#[test]
fn test_json_export_contains_meals() {
    let catalog = bundled_catalog();
    let plan = create_daily_plan(&catalog, &PlanRequest::new(Goal::Maintenance.preset()));
    let json = plan_to_json(&plan).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["meals"].as_array().unwrap().len(), 3);
    assert_eq!(value["meals"][0]["meal"], "breakfast");
    assert!(value["comparison"].is_array());
}
