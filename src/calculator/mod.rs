//! Personal target calculator: BMI, BMR, TDEE and goal-based macros.

pub mod body;
pub mod constants;
pub mod goals;
pub mod validation;

pub use body::{ActivityLevel, BmiCategory, BmiReport, BodyProfile, Sex, bmi, bmr, tdee};
pub use goals::{Goal, MacroRatios, PersonalTargets, macro_targets, personal_targets};
pub use validation::{validate_body_inputs, validate_custom_targets};
