use crate::calculator::constants::*;
use crate::error::{PlannerError, Result};
use crate::models::TargetVector;

fn check_range(label: &str, value: f64, (min, max): (f64, f64), unit: &str) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(PlannerError::InvalidInput(format!(
            "{} must be between {} and {} {}, got {}",
            label, min, max, unit, value
        )));
    }
    Ok(())
}

/// Sanity checks for user-entered daily targets.
///
/// Calories must be 500-5000 and the macro-implied energy within 70-120% of
/// them; each macro has its own plausible range.
pub fn validate_custom_targets(target: &TargetVector) -> Result<()> {
    check_range("Calories", target.calories, (MIN_CALORIES, MAX_CALORIES), "kcal")?;
    check_range("Protein", target.protein_g, PROTEIN_RANGE_G, "g")?;
    check_range("Carbs", target.carbs_g, CARBS_RANGE_G, "g")?;
    check_range("Fat", target.fat_g, FAT_RANGE_G, "g")?;

    let macro_kcal = target.macro_calories();
    let min = target.calories * MACRO_ENERGY_MIN_RATIO;
    let max = target.calories * MACRO_ENERGY_MAX_RATIO;
    if macro_kcal < min || macro_kcal > max {
        return Err(PlannerError::InvalidInput(format!(
            "macros add up to {:.0} kcal, expected {:.0}-{:.0} for a {:.0} kcal target",
            macro_kcal, min, max, target.calories
        )));
    }

    Ok(())
}

pub fn validate_body_inputs(weight_kg: f64, height_cm: f64, age: u32) -> Result<()> {
    check_range("Weight", weight_kg, WEIGHT_RANGE_KG, "kg")?;
    check_range("Height", height_cm, HEIGHT_RANGE_CM, "cm")?;

    let (min_age, max_age) = AGE_RANGE_YEARS;
    if !(min_age..=max_age).contains(&age) {
        return Err(PlannerError::InvalidInput(format!(
            "Age must be between {} and {} years, got {}",
            min_age, max_age, age
        )));
    }
    Ok(())
}
