/// Energy density of each macro, kcal per gram.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// ─────────────────────────────────────────────────────────────────────────────
// Mifflin-St Jeor coefficients
// ─────────────────────────────────────────────────────────────────────────────

pub const BMR_WEIGHT_COEF: f64 = 10.0;
pub const BMR_HEIGHT_COEF: f64 = 6.25;
pub const BMR_AGE_COEF: f64 = 5.0;
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

// ─────────────────────────────────────────────────────────────────────────────
// BMI category boundaries
// ─────────────────────────────────────────────────────────────────────────────

pub const BMI_UNDERWEIGHT_BELOW: f64 = 18.5;
pub const BMI_OVERWEIGHT_FROM: f64 = 25.0;
pub const BMI_OBESE_FROM: f64 = 30.0;

// ─────────────────────────────────────────────────────────────────────────────
// Goal adjustments
// ─────────────────────────────────────────────────────────────────────────────

/// Daily deficit for weight loss (~0.5 kg/week).
pub const WEIGHT_LOSS_DEFICIT: f64 = 500.0;

/// Daily surplus for muscle gain (~0.25 kg/week).
pub const MUSCLE_GAIN_SURPLUS: f64 = 300.0;

// ─────────────────────────────────────────────────────────────────────────────
// Input validation ranges
// ─────────────────────────────────────────────────────────────────────────────

pub const MIN_CALORIES: f64 = 500.0;
pub const MAX_CALORIES: f64 = 5000.0;

/// Macro-implied energy must lie within these multiples of the calorie target.
pub const MACRO_ENERGY_MIN_RATIO: f64 = 0.7;
pub const MACRO_ENERGY_MAX_RATIO: f64 = 1.2;

pub const PROTEIN_RANGE_G: (f64, f64) = (30.0, 400.0);
pub const CARBS_RANGE_G: (f64, f64) = (50.0, 600.0);
pub const FAT_RANGE_G: (f64, f64) = (20.0, 200.0);

pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 300.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);
pub const AGE_RANGE_YEARS: (u32, u32) = (15, 100);
