use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::calculator::{ActivityLevel, Goal, Sex};
use crate::optimizer::DEFAULT_TOLERANCE;
use crate::planner::MealSplit;

/// Portion Planner: a daily meal planning CLI that sizes food portions to hit calorie and macro targets.
#[derive(Parser, Debug)]
#[command(name = "portion_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog CSV file.
    #[arg(short, long, global = true, default_value = "data/foods.csv")]
    pub catalog: PathBuf,

    /// Log solver details (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive menu (default).
    Menu,

    /// Plan a day from explicit targets or a preset.
    Plan {
        /// Use preset targets instead of explicit values.
        #[arg(long, value_enum, conflicts_with_all = ["calories", "protein", "carbs", "fat"])]
        preset: Option<Goal>,

        /// Daily calories (kcal).
        #[arg(long, required_unless_present = "preset")]
        calories: Option<f64>,

        /// Daily protein (g).
        #[arg(long, required_unless_present = "preset")]
        protein: Option<f64>,

        /// Daily carbs (g).
        #[arg(long, required_unless_present = "preset")]
        carbs: Option<f64>,

        /// Daily fat (g).
        #[arg(long, required_unless_present = "preset")]
        fat: Option<f64>,

        #[command(flatten)]
        options: PlanOptions,
    },

    /// Derive targets from body data, then plan a day.
    Personal {
        /// Body weight in kg.
        #[arg(long)]
        weight: f64,

        /// Height in cm.
        #[arg(long)]
        height: f64,

        /// Age in years.
        #[arg(long)]
        age: u32,

        /// male or female.
        #[arg(long)]
        sex: Sex,

        #[arg(long, value_enum, default_value = "sedentary")]
        activity: ActivityLevel,

        #[arg(long, value_enum, default_value = "maintenance")]
        goal: Goal,

        /// Only print the calculated targets.
        #[arg(long)]
        targets_only: bool,

        #[command(flatten)]
        options: PlanOptions,
    },

    /// List catalog foods.
    Foods {
        /// Only foods suitable for this meal (breakfast, lunch, dinner).
        #[arg(long)]
        meal: Option<String>,

        /// Only foods in this category.
        #[arg(long)]
        category: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Menu
    }
}

/// Options shared by every command that produces a plan.
#[derive(Args, Debug, Clone)]
pub struct PlanOptions {
    /// Relative tolerance per metric (0.15 = ±15%).
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Meal split, e.g. "breakfast=0.25,lunch=0.40,dinner=0.35".
    #[arg(long)]
    pub split: Option<MealSplit>,

    /// Food names or ids to leave out (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Print the plan as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Also write the plan as JSON to this file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Draw text charts after the plan.
    #[arg(long)]
    pub chart: bool,
}
