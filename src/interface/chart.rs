//! Plain-text charts for a finished daily plan.

use crate::models::{DailyPlan, Metric};

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';

/// Achievement within this band around 100% is marked on target.
const ON_TARGET_PCT: (f64, f64) = (95.0, 105.0);

/// A bar of `value / max` scaled to `width` cells.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) || !(value > 0.0) {
        return String::new();
    }
    let cells = ((value / max).min(1.0) * width as f64).round() as usize;
    std::iter::repeat_n(BAR_CHAR, cells).collect()
}

/// Percent of target achieved; 0 for a zero target.
pub fn achievement_pct(target: f64, actual: f64) -> f64 {
    if target > 0.0 {
        actual / target * 100.0
    } else {
        0.0
    }
}

fn display_macro_bars(plan: &DailyPlan) {
    println!("Macronutrients: target vs actual (g)");
    let macros = [Metric::Protein, Metric::Carbs, Metric::Fat];
    let max = macros
        .iter()
        .flat_map(|&m| [plan.target.get(m), plan.totals.get(m)])
        .fold(0.0_f64, f64::max);

    for metric in macros {
        let target = plan.target.get(metric);
        let actual = plan.totals.get(metric);
        println!(
            "  {:<8} target {:<w$} {:.1}",
            metric.label(),
            bar(target, max, BAR_WIDTH),
            target,
            w = BAR_WIDTH
        );
        println!(
            "  {:<8} actual {:<w$} {:.1}",
            "",
            bar(actual, max, BAR_WIDTH),
            actual,
            w = BAR_WIDTH
        );
    }
}

fn display_meal_shares(plan: &DailyPlan) {
    println!("Calorie distribution by meal");
    let total: f64 = plan.optimal_meals().map(|m| m.result.totals.calories).sum();
    for meal in plan.optimal_meals() {
        let kcal = meal.result.totals.calories;
        let share = if total > 0.0 { kcal / total * 100.0 } else { 0.0 };
        println!(
            "  {:<9} {:<w$} {:5.1}%",
            meal.meal.name(),
            bar(share, 100.0, BAR_WIDTH),
            share,
            w = BAR_WIDTH
        );
    }
}

fn display_protein_by_meal(plan: &DailyPlan) {
    println!("Protein distribution by meal (g)");
    let max = plan
        .optimal_meals()
        .map(|m| m.result.totals.protein_g)
        .fold(0.0_f64, f64::max);
    for meal in plan.optimal_meals() {
        let protein = meal.result.totals.protein_g;
        println!(
            "  {:<9} {:<w$} {:.1}",
            meal.meal.name(),
            bar(protein, max, BAR_WIDTH),
            protein,
            w = BAR_WIDTH
        );
    }
}

fn display_achievement(plan: &DailyPlan) {
    println!("Target achievement (100% = on target)");
    for metric in Metric::ALL {
        let pct = achievement_pct(plan.target.get(metric), plan.totals.get(metric));
        let mark = if (ON_TARGET_PCT.0..=ON_TARGET_PCT.1).contains(&pct) {
            "ok"
        } else {
            "off"
        };
        println!(
            "  {:<9} {:<w$} {:6.1}% {}",
            metric.label(),
            // Scale so 100% sits at 80% of the width and overshoot stays visible.
            bar(pct, 125.0, BAR_WIDTH),
            pct,
            mark,
            w = BAR_WIDTH
        );
    }
}

/// Print the four summary charts for a plan.
pub fn display_charts(plan: &DailyPlan) {
    if plan.is_failed() {
        println!("Nothing to chart: no meal could be planned.");
        return;
    }
    println!();
    println!("=== Daily Nutrition Plan Analysis ===");
    println!();
    display_macro_bars(plan);
    println!();
    display_meal_shares(plan);
    println!();
    display_protein_by_meal(plan);
    println!();
    display_achievement(plan);
    println!();
}
