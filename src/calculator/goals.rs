use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculator::body::{self, ActivityLevel, BmiReport, BodyProfile, round1};
use crate::calculator::constants::*;
use crate::models::{Nutrients, TargetVector};

/// Dietary goal driving the calorie adjustment and macro split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Maintenance,
    MuscleGain,
}

/// Share of daily energy from each macro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::WeightLoss, Goal::Maintenance, Goal::MuscleGain];

    pub fn label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight loss",
            Goal::Maintenance => "Maintenance",
            Goal::MuscleGain => "Muscle gain",
        }
    }

    /// kcal added to TDEE.
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::WeightLoss => -WEIGHT_LOSS_DEFICIT,
            Goal::Maintenance => 0.0,
            Goal::MuscleGain => MUSCLE_GAIN_SURPLUS,
        }
    }

    pub fn macro_ratios(&self) -> MacroRatios {
        match self {
            Goal::WeightLoss => MacroRatios {
                protein: 0.35,
                carbs: 0.35,
                fat: 0.30,
            },
            Goal::Maintenance => MacroRatios {
                protein: 0.30,
                carbs: 0.40,
                fat: 0.30,
            },
            Goal::MuscleGain => MacroRatios {
                protein: 0.30,
                carbs: 0.45,
                fat: 0.25,
            },
        }
    }

    /// Fixed daily targets for users who skip the body calculator.
    pub fn preset(&self) -> TargetVector {
        match self {
            Goal::WeightLoss => Nutrients::new(1800.0, 140.0, 150.0, 60.0),
            Goal::Maintenance => Nutrients::new(2000.0, 150.0, 200.0, 65.0),
            Goal::MuscleGain => Nutrients::new(2500.0, 180.0, 280.0, 70.0),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grams of each macro for a calorie target; grams are rounded to 0.1.
pub fn macro_targets(calories: f64, goal: Goal) -> TargetVector {
    let ratios = goal.macro_ratios();
    Nutrients {
        calories: calories.round(),
        protein_g: round1(calories * ratios.protein / KCAL_PER_G_PROTEIN),
        carbs_g: round1(calories * ratios.carbs / KCAL_PER_G_CARBS),
        fat_g: round1(calories * ratios.fat / KCAL_PER_G_FAT),
    }
}

/// Everything the personal calculator reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalTargets {
    pub profile: BodyProfile,
    pub activity: ActivityLevel,
    pub goal: Goal,
    pub bmi: BmiReport,
    pub bmr: f64,
    pub tdee: f64,
    pub targets: TargetVector,
}

/// BMR -> TDEE -> goal-adjusted calories -> macro grams.
pub fn personal_targets(profile: &BodyProfile, activity: ActivityLevel, goal: Goal) -> PersonalTargets {
    let bmr = body::bmr(profile);
    let tdee = body::tdee(bmr, activity);
    let calories = tdee + goal.calorie_adjustment();

    PersonalTargets {
        profile: *profile,
        activity,
        goal,
        bmi: body::bmi(profile.weight_kg, profile.height_cm),
        bmr: bmr.round(),
        tdee: tdee.round(),
        targets: macro_targets(calories, goal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::body::Sex;

    #[test]
    fn test_macro_ratios_sum_to_one() {
        for goal in Goal::ALL {
            let r = goal.macro_ratios();
            assert!((r.protein + r.carbs + r.fat - 1.0).abs() < 1e-12, "{goal}");
        }
    }

    #[test]
    fn test_macro_targets_maintenance() {
        let t = macro_targets(2000.0, Goal::Maintenance);
        assert_eq!(t.calories, 2000.0);
        assert_eq!(t.protein_g, 150.0);
        assert_eq!(t.carbs_g, 200.0);
        assert_eq!(t.fat_g, 66.7);
    }

    #[test]
    fn test_personal_targets_weight_loss() {
        let profile = BodyProfile {
            weight_kg: 80.0,
            height_cm: 180.0,
            age: 30,
            sex: Sex::Male,
        };
        let result = personal_targets(&profile, ActivityLevel::ModeratelyActive, Goal::WeightLoss);
        assert_eq!(result.bmr, 1780.0);
        assert_eq!(result.tdee, 2759.0);
        // 2759 - 500
        assert_eq!(result.targets.calories, 2259.0);
        assert!((result.targets.protein_g - 197.7).abs() < 1e-9);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Goal::MuscleGain.preset().calories, 2500.0);
        assert_eq!(Goal::WeightLoss.preset().fat_g, 60.0);
    }
}
