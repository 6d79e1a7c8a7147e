use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculator::constants::*;
use crate::error::PlannerError;

/// Biological sex for the BMR equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(PlannerError::InvalidInput(format!(
                "expected 'male' or 'female', got '{}'",
                other
            ))),
        }
    }
}

/// Activity level for TDEE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 days/week
    LightlyActive,
    /// 3-5 days/week
    ModeratelyActive,
    /// 6-7 days/week
    VeryActive,
    /// Athlete
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::LightlyActive => "Lightly active (1-3 days/week)",
            ActivityLevel::ModeratelyActive => "Moderately active (3-5 days/week)",
            ActivityLevel::VeryActive => "Very active (6-7 days/week)",
            ActivityLevel::ExtraActive => "Extra active (athlete)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < BMI_OVERWEIGHT_FROM {
            BmiCategory::Normal
        } else if bmi < BMI_OBESE_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn health_status(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Below healthy weight",
            BmiCategory::Normal => "Healthy weight",
            BmiCategory::Overweight => "Above healthy weight",
            BmiCategory::Obese => "Significantly above healthy weight",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReport {
    /// Rounded to one decimal.
    pub bmi: f64,
    pub category: BmiCategory,
}

/// Body measurements used by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Body mass index; the category is taken from the unrounded value.
pub fn bmi(weight_kg: f64, height_cm: f64) -> BmiReport {
    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    BmiReport {
        bmi: round1(value),
        category: BmiCategory::from_bmi(value),
    }
}

/// Basal metabolic rate (kcal/day), Mifflin-St Jeor.
///
/// `BMR = 10·w + 6.25·h − 5·age + s`, with `s = +5` for men and `−161` for women.
pub fn bmr(profile: &BodyProfile) -> f64 {
    let offset = match profile.sex {
        Sex::Male => BMR_MALE_OFFSET,
        Sex::Female => BMR_FEMALE_OFFSET,
    };
    BMR_WEIGHT_COEF * profile.weight_kg + BMR_HEIGHT_COEF * profile.height_cm
        - BMR_AGE_COEF * profile.age as f64
        + offset
}

/// Maintenance energy expenditure (kcal/day).
pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_categories() {
        let report = bmi(70.0, 175.0);
        assert!((report.bmi - 22.9).abs() < 1e-9);
        assert_eq!(report.category, BmiCategory::Normal);

        assert_eq!(bmi(50.0, 180.0).category, BmiCategory::Underweight);
        assert_eq!(bmi(85.0, 175.0).category, BmiCategory::Overweight);
        assert_eq!(bmi(110.0, 175.0).category, BmiCategory::Obese);
    }

    #[test]
    fn test_bmr_mifflin() {
        let male = BodyProfile {
            weight_kg: 80.0,
            height_cm: 180.0,
            age: 30,
            sex: Sex::Male,
        };
        // 800 + 1125 - 150 + 5
        assert!((bmr(&male) - 1780.0).abs() < 1e-9);

        let female = BodyProfile {
            sex: Sex::Female,
            ..male
        };
        assert!((bmr(&female) - 1614.0).abs() < 1e-9);
    }

    #[test]
    fn test_tdee() {
        assert!((tdee(1780.0, ActivityLevel::ModeratelyActive) - 2759.0).abs() < 1e-9);
        assert!((tdee(1000.0, ActivityLevel::Sedentary) - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("m".parse::<Sex>().unwrap(), Sex::Male);
        assert!("other".parse::<Sex>().is_err());
    }
}
