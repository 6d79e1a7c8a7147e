#[macro_use]
extern crate assert_float_eq;

use portion_planner_rs::models::{FoodItem, MealType, Metric, Nutrients, SolveStatus};
use portion_planner_rs::optimizer::{
    DEFAULT_MAX_PORTION_G, EngineConfig, optimize, optimize_with, tolerance_bands,
};

fn food(id: u32, name: &str, per_100g: [f64; 4]) -> FoodItem {
    FoodItem {
        id,
        name: name.to_string(),
        category: "test".to_string(),
        per_100g: Nutrients::new(per_100g[0], per_100g[1], per_100g[2], per_100g[3]),
        meal_type: MealType::All,
        display_unit: None,
        max_portion_g: None,
    }
}

fn chicken() -> FoodItem {
    food(1, "Chicken Breast", [165.0, 31.0, 0.0, 3.6])
}

fn rice() -> FoodItem {
    food(2, "White Rice", [130.0, 2.7, 28.0, 0.3])
}

fn oil() -> FoodItem {
    food(3, "Olive Oil", [884.0, 0.0, 0.0, 100.0])
}

fn assert_in_bands(totals: &Nutrients, target: &Nutrients, tolerance: f64) {
    for band in tolerance_bands(target, tolerance) {
        let value = totals.get(band.metric);
        assert!(
            band.contains(value, 1e-6),
            "{} {} outside [{}, {}]",
            band.metric.label(),
            value,
            band.lower,
            band.upper
        );
    }
}

fn assert_totals_consistent(foods: &[FoodItem], result: &portion_planner_rs::OptimizationResult) {
    let mut expected = Nutrients::ZERO;
    for line in &result.portions {
        let food = foods.iter().find(|f| f.id == line.food_id).unwrap();
        expected += food.nutrients_for(line.quantity_g);
    }
    for metric in Metric::ALL {
        assert_float_absolute_eq!(result.totals.get(metric), expected.get(metric), 1e-9);
    }
}

#[test]
fn test_lean_meal_with_fat_source_is_optimal() {
    let foods = vec![chicken(), rice(), oil()];
    let target = Nutrients::new(400.0, 40.0, 50.0, 10.0);
    let result = optimize(&foods, &target, 0.15);

    assert_eq!(result.status, SolveStatus::Optimal, "{:?}", result.cause);
    assert_in_bands(&result.totals, &target, 0.15);
    assert_totals_consistent(&foods, &result);

    let grams = result.allocation();
    let protein_from = |id: u32| {
        let f = foods.iter().find(|f| f.id == id).unwrap();
        f.nutrients_for(grams.get(&id).copied().unwrap_or(0.0)).protein_g
    };
    let carbs_from = |id: u32| {
        let f = foods.iter().find(|f| f.id == id).unwrap();
        f.nutrients_for(grams.get(&id).copied().unwrap_or(0.0)).carbs_g
    };
    assert!(protein_from(1) > protein_from(2));
    assert!(carbs_from(2) > carbs_from(1));
}

#[test]
fn test_two_lean_foods_cannot_reach_fat_band() {
    // Keeping protein under 46 g caps chicken near 150 g, which gives at most ~6 g fat.
    let foods = vec![chicken(), rice()];
    let target = Nutrients::new(400.0, 40.0, 50.0, 10.0);
    let result = optimize(&foods, &target, 0.15);

    assert_eq!(result.status, SolveStatus::Infeasible);
    assert_totals_consistent(&foods, &result);
    let cause = result.cause.as_deref().unwrap_or_default();
    assert!(cause.contains("outside tolerance"), "{cause}");
}

#[test]
fn test_unreachable_calories_are_infeasible() {
    let foods = vec![chicken(), rice()];
    let target = Nutrients::new(700.0, 40.0, 0.0, 10.0);
    let result = optimize(&foods, &target, 0.05);

    assert_eq!(result.status, SolveStatus::Infeasible);
    for line in &result.portions {
        assert!(line.quantity_g >= 0.0);
        assert!(line.quantity_g <= DEFAULT_MAX_PORTION_G + 1e-6);
    }
}

#[test]
fn test_reachable_target_is_met() {
    let foods = vec![chicken(), rice(), oil()];
    let mut target = Nutrients::ZERO;
    for (food, grams) in foods.iter().zip([150.0, 200.0, 10.0]) {
        target += food.nutrients_for(grams);
    }

    let result = optimize(&foods, &target, 0.10);
    assert_eq!(result.status, SolveStatus::Optimal);
    assert_in_bands(&result.totals, &target, 0.10);
}

#[test]
fn test_per_food_caps_respected() {
    let mut capped_oil = oil();
    capped_oil.max_portion_g = Some(5.0);
    let foods = vec![chicken(), rice(), capped_oil];
    let target = Nutrients::new(1200.0, 60.0, 100.0, 60.0);

    let config = EngineConfig {
        default_max_portion_g: 250.0,
        ..EngineConfig::default()
    };
    let result = optimize_with(&foods, &target, 0.15, &config);

    for line in &result.portions {
        let cap = if line.food_id == 3 { 5.0 } else { 250.0 };
        assert!(line.quantity_g <= cap + 1e-6, "{} over cap", line.name);
        assert!(line.quantity_g >= config.negligible_g);
    }
}

#[test]
fn test_deterministic_regardless_of_candidate_order() {
    let forward = vec![chicken(), rice(), oil()];
    let reversed = vec![oil(), rice(), chicken()];
    let target = Nutrients::new(650.0, 45.0, 70.0, 18.0);

    let a = optimize(&forward, &target, 0.15);
    let b = optimize(&reversed, &target, 0.15);
    let c = optimize(&forward, &target, 0.15);

    assert_eq!(a.status, b.status);
    assert_eq!(a.allocation(), b.allocation());
    assert_eq!(a.allocation(), c.allocation());
}

#[test]
fn test_empty_candidates_is_error() {
    let foods: Vec<FoodItem> = Vec::new();
    let result = optimize(&foods, &Nutrients::new(500.0, 30.0, 50.0, 15.0), 0.15);
    assert_eq!(result.status, SolveStatus::Error);
    assert!(result.portions.is_empty());
    assert!(result.cause.is_some());
}

#[test]
fn test_zero_target_gives_empty_optimal_plan() {
    let foods = vec![chicken(), rice(), oil()];
    let result = optimize(&foods, &Nutrients::ZERO, 0.15);
    assert_eq!(result.status, SolveStatus::Optimal);
    assert!(result.portions.is_empty());
    assert_eq!(result.totals, Nutrients::ZERO);
}

#[test]
fn test_small_fat_top_up_is_kept_in_band() {
    // 100 g chicken alone misses the fat band; about a gram of oil closes it.
    let foods = vec![chicken(), oil()];
    let target = Nutrients::new(172.0, 31.0, 0.0, 4.4);
    let result = optimize(&foods, &target, 0.05);

    assert_eq!(result.status, SolveStatus::Optimal, "{:?}", result.cause);
    assert_in_bands(&result.totals, &target, 0.05);
    assert_totals_consistent(&foods, &result);

    let grams = result.allocation();
    let oil_g = grams.get(&3).copied().unwrap_or(0.0);
    assert!(oil_g >= 1.0 - 1e-9, "oil {oil_g}");
}
