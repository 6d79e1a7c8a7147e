use std::collections::HashSet;

use dialoguer::{Confirm, Input, Select};

use crate::calculator::{
    ActivityLevel, BodyProfile, Goal, Sex, validate_body_inputs, validate_custom_targets,
};
use crate::catalog::FoodCatalog;
use crate::error::{PlannerError, Result};
use crate::models::{Nutrients, TargetVector};
use crate::optimizer::DEFAULT_TOLERANCE;

/// Attempts allowed for a single numeric prompt before giving up.
pub const MAX_ATTEMPTS: usize = 3;

/// Fuzzy suggestions offered per exclusion query.
const MAX_SUGGESTIONS: usize = 5;

/// Top-level choices of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CustomTargets,
    Preset,
    Personal,
    BrowseFoods,
    Quit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 5] = [
        MenuChoice::CustomTargets,
        MenuChoice::Preset,
        MenuChoice::Personal,
        MenuChoice::BrowseFoods,
        MenuChoice::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuChoice::CustomTargets => "Enter custom daily targets",
            MenuChoice::Preset => "Use a preset plan",
            MenuChoice::Personal => "Calculate targets from body data",
            MenuChoice::BrowseFoods => "Browse the food catalog",
            MenuChoice::Quit => "Quit",
        }
    }
}

pub fn prompt_menu() -> Result<MenuChoice> {
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
    let selection = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MenuChoice::ALL[selection])
}

/// Parse a number and check it against an inclusive range.
pub fn parse_number(input: &str, min: f64, max: f64) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput(format!("'{}' is not a number", input.trim())))?;
    if !value.is_finite() || value < min || value > max {
        return Err(PlannerError::InvalidInput(format!(
            "{} is outside {}-{}",
            value, min, max
        )));
    }
    Ok(value)
}

/// Ask for a number until it parses and lies in range, at most `MAX_ATTEMPTS` times.
pub fn prompt_number(prompt: &str, default: f64, min: f64, max: f64) -> Result<f64> {
    for attempt in 1..=MAX_ATTEMPTS {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;

        match parse_number(&input, min, max) {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_ATTEMPTS => {
                println!("{} ({} attempts left)", e, MAX_ATTEMPTS - attempt);
            }
            Err(e) => return Err(e),
        }
    }
    Err(PlannerError::InvalidInput(format!(
        "no valid value for '{}'",
        prompt
    )))
}

/// Daily calories and macros typed in by the user, then sanity-checked.
pub fn prompt_custom_targets() -> Result<TargetVector> {
    println!();
    println!("Enter your daily nutritional targets:");
    let calories = prompt_number("Daily calories (kcal)", 2000.0, 0.0, 10_000.0)?;
    let protein = prompt_number("Daily protein (g)", 150.0, 0.0, 1000.0)?;
    let carbs = prompt_number("Daily carbs (g)", 200.0, 0.0, 1000.0)?;
    let fat = prompt_number("Daily fat (g)", 65.0, 0.0, 1000.0)?;

    let target = Nutrients::new(calories, protein, carbs, fat);
    validate_custom_targets(&target)?;
    Ok(target)
}

/// Pick a preset; `None` means back to the menu.
pub fn prompt_preset() -> Result<Option<Goal>> {
    let mut labels: Vec<String> = Goal::ALL
        .iter()
        .map(|g| {
            let t = g.preset();
            format!(
                "{} ({:.0} kcal, P {:.0}g, C {:.0}g, F {:.0}g)",
                g, t.calories, t.protein_g, t.carbs_g, t.fat_g
            )
        })
        .collect();
    labels.push("Back to main menu".to_string());

    let selection = Select::new()
        .with_prompt("Choose a preset")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Goal::ALL.get(selection).copied())
}

pub fn prompt_body_profile() -> Result<BodyProfile> {
    let weight_kg = prompt_number("Weight (kg)", 70.0, 30.0, 300.0)?;
    let height_cm = prompt_number("Height (cm)", 175.0, 100.0, 250.0)?;
    let age = prompt_number("Age (years)", 30.0, 15.0, 100.0)?.round() as u32;

    let sexes = [Sex::Male, Sex::Female];
    let selection = Select::new()
        .with_prompt("Sex")
        .items(&["Male", "Female"])
        .default(0)
        .interact()?;

    validate_body_inputs(weight_kg, height_cm, age)?;
    Ok(BodyProfile {
        weight_kg,
        height_cm,
        age,
        sex: sexes[selection],
    })
}

pub fn prompt_activity() -> Result<ActivityLevel> {
    let labels: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.description()).collect();
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(ActivityLevel::ALL[selection])
}

pub fn prompt_goal() -> Result<Goal> {
    let labels: Vec<&str> = Goal::ALL.iter().map(|g| g.label()).collect();
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&labels)
        .default(1)
        .interact()?;
    Ok(Goal::ALL[selection])
}

/// Tolerance as a percentage, returned as a fraction.
pub fn prompt_tolerance() -> Result<f64> {
    let pct = prompt_number("Tolerance (%)", DEFAULT_TOLERANCE * 100.0, 1.0, 100.0)?;
    Ok(pct / 100.0)
}

/// Collect foods to leave out, matching names exactly first and fuzzily second.
pub fn prompt_exclusions(catalog: &FoodCatalog) -> Result<HashSet<u32>> {
    let mut excluded = HashSet::new();

    loop {
        let input: String = Input::new()
            .with_prompt("Food to exclude (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        if let Some(food) = catalog.find_by_name(input) {
            excluded.insert(food.id);
            println!("Excluded: {}", food.name);
            continue;
        }

        let candidates = catalog.fuzzy_matches(input);

        if candidates.is_empty() {
            println!("No matching food found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let food = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", food.name))
                .default(true)
                .interact()?;

            if confirm {
                excluded.insert(food.id);
                println!("Excluded: {}", food.name);
            }
        } else {
            let options: Vec<_> = candidates
                .iter()
                .take(MAX_SUGGESTIONS)
                .map(|(f, _)| *f)
                .collect();

            let mut labels: Vec<String> = options.iter().map(|f| f.name.clone()).collect();
            labels.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&labels)
                .default(0)
                .interact()?;

            if let Some(food) = options.get(selection) {
                excluded.insert(food.id);
                println!("Excluded: {}", food.name);
            }
        }
    }

    Ok(excluded)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
