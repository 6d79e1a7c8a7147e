use crate::calculator::PersonalTargets;
use crate::catalog::FoodCatalog;
use crate::models::{DailyPlan, DisplayUnit, FoodItem, MealPlan, Metric, Nutrients};

const RULE_WIDTH: usize = 64;

/// Unit names that take a plural "s".
const COUNTABLE_UNITS: [&str; 4] = ["egg", "piece", "slice", "cup"];

/// Household-unit rendering of a gram quantity, e.g. `"2 eggs"` or `"0.5 cups"`.
///
/// Counts above 1.5 are rounded to whole units, smaller ones to a tenth.
pub fn format_unit(unit: &DisplayUnit, grams: f64) -> String {
    let count = unit.count(grams);
    let rounded = if count > 1.5 {
        count.round()
    } else {
        (count * 10.0).round() / 10.0
    };

    let plural = rounded != 1.0 && COUNTABLE_UNITS.contains(&unit.name.as_str());
    let suffix = if plural { "s" } else { "" };
    format!("{} {}{}", rounded, unit.name, suffix)
}

/// `"150.0g"`, with the household unit appended when the food has one.
pub fn format_amount(food: Option<&FoodItem>, grams: f64) -> String {
    match food.and_then(|f| f.display_unit.as_ref()) {
        Some(unit) => format!("{:.1}g ({})", grams, format_unit(unit, grams)),
        None => format!("{:.1}g", grams),
    }
}

fn format_nutrients(n: &Nutrients) -> String {
    format!(
        "Cal: {:.1}, P: {:.1}g, C: {:.1}g, F: {:.1}g",
        n.calories, n.protein_g, n.carbs_g, n.fat_g
    )
}

fn display_meal(meal: &MealPlan, catalog: &FoodCatalog) {
    println!();
    println!(
        "{} ({:.0}% of day, {} candidates):",
        meal.meal.name().to_uppercase(),
        meal.fraction * 100.0,
        meal.candidate_count
    );
    println!("{}", "-".repeat(RULE_WIDTH));

    if !meal.result.is_optimal() {
        println!(
            "  [{}] {}",
            meal.result.status,
            meal.result.cause.as_deref().unwrap_or("no cause reported")
        );
        return;
    }

    let name_width = meal
        .result
        .portions
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(10);

    for line in &meal.result.portions {
        println!(
            "  - {:<width$}  {}",
            line.name,
            format_amount(catalog.get(line.food_id), line.quantity_g),
            width = name_width
        );
        println!("    {}", format_nutrients(&line.nutrients));
    }

    println!();
    println!("  Meal total: {}", format_nutrients(&meal.result.totals));
}

/// Print every meal with portions, household units and per-meal totals.
pub fn display_daily_plan(plan: &DailyPlan, catalog: &FoodCatalog) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "DAILY MEAL PLAN (tolerance ±{:.0}%)",
        plan.tolerance * 100.0
    );
    println!("{}", "=".repeat(RULE_WIDTH));

    for meal in &plan.meals {
        display_meal(meal, catalog);
    }

    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("DAILY TOTAL (planned meals only):");
    println!("Calories: {:.1} kcal", plan.totals.calories);
    println!("Protein: {:.1}g", plan.totals.protein_g);
    println!("Carbs: {:.1}g", plan.totals.carbs_g);
    println!("Fat: {:.1}g", plan.totals.fat_g);
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Print the target-versus-actual table for the day.
pub fn display_comparison(plan: &DailyPlan) {
    println!();
    println!("TARGET vs ACTUAL:");
    println!("{}", "-".repeat(RULE_WIDTH));
    for row in plan.comparison() {
        println!(
            "{:<10}: Target: {:7.1} | Actual: {:7.1} | Diff: {:+7.1} ({:+.1}%)",
            row.metric.label(),
            row.target,
            row.actual,
            row.diff,
            row.deviation_pct
        );
    }
    println!("{}", "-".repeat(RULE_WIDTH));
}

/// Display a list of catalog foods with their per-100g profile.
pub fn display_food_list(foods: &[&FoodItem], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    let name_width = foods.iter().map(|f| f.name.len()).max().unwrap_or(10);

    for food in foods {
        let unit = food
            .display_unit
            .as_ref()
            .map(|u| format!("  [{}]", u))
            .unwrap_or_default();
        println!(
            "  {:>3}  {:<width$}  {:>5.0} kcal  P:{:>5.1} C:{:>5.1} F:{:>5.1}  {:<12} {}{}",
            food.id,
            food.name,
            food.per_100g.calories,
            food.per_100g.protein_g,
            food.per_100g.carbs_g,
            food.per_100g.fat_g,
            food.category,
            food.meal_type.as_str(),
            unit,
            width = name_width
        );
    }

    println!();
}

/// Print the personal calculator's report.
pub fn display_personal_targets(report: &PersonalTargets) {
    println!();
    println!("=== Personal Targets ===");
    println!(
        "BMI: {:.1} ({}, {})",
        report.bmi.bmi,
        report.bmi.category,
        report.bmi.category.health_status()
    );
    println!("BMR: {:.0} kcal/day", report.bmr);
    println!(
        "TDEE: {:.0} kcal/day ({})",
        report.tdee,
        report.activity.description()
    );
    println!("Goal: {}", report.goal);
    for metric in Metric::ALL {
        println!(
            "  {:<9} {:>7.1} {}",
            metric.label(),
            report.targets.get(metric),
            metric.unit()
        );
    }
    println!();
}
