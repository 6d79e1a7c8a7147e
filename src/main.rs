use std::collections::HashSet;
use std::path::Path;

use clap::Parser;
use tracing::debug;

use portion_planner_rs::calculator::{
    BodyProfile, personal_targets, validate_body_inputs, validate_custom_targets,
};
use portion_planner_rs::catalog::{FoodCatalog, load_catalog};
use portion_planner_rs::cli::{Cli, Command, PlanOptions};
use portion_planner_rs::error::{PlannerError, Result};
use portion_planner_rs::interface::{
    MenuChoice, display_charts, display_comparison, display_daily_plan, display_food_list,
    display_personal_targets, plan_to_json, prompt_activity, prompt_body_profile,
    prompt_custom_targets, prompt_exclusions, prompt_goal, prompt_menu, prompt_preset,
    prompt_tolerance, prompt_yes_no, save_plan_json,
};
use portion_planner_rs::logging;
use portion_planner_rs::models::{Meal, Nutrients, TargetVector};
use portion_planner_rs::planner::{PlanRequest, create_daily_plan};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let command = cli.command.unwrap_or_default();
    let catalog = open_catalog(&cli.catalog)?;

    match command {
        Command::Menu => cmd_menu(&catalog),
        Command::Plan {
            preset,
            calories,
            protein,
            carbs,
            fat,
            options,
        } => {
            let target = match preset {
                Some(goal) => goal.preset(),
                None => {
                    let target = Nutrients::new(
                        calories.unwrap_or_default(),
                        protein.unwrap_or_default(),
                        carbs.unwrap_or_default(),
                        fat.unwrap_or_default(),
                    );
                    validate_custom_targets(&target)?;
                    target
                }
            };
            cmd_plan(&catalog, target, &options)
        }
        Command::Personal {
            weight,
            height,
            age,
            sex,
            activity,
            goal,
            targets_only,
            options,
        } => {
            validate_body_inputs(weight, height, age)?;
            let profile = BodyProfile {
                weight_kg: weight,
                height_cm: height,
                age,
                sex,
            };
            let report = personal_targets(&profile, activity, goal);
            if !options.json {
                display_personal_targets(&report);
            }
            if targets_only {
                return Ok(());
            }
            cmd_plan(&catalog, report.targets, &options)
        }
        Command::Foods { meal, category } => cmd_foods(&catalog, meal.as_deref(), category.as_deref()),
    }
}

fn open_catalog(path: &Path) -> Result<FoodCatalog> {
    if !path.exists() {
        eprintln!("Food catalog not found: {}", path.display());
        eprintln!("Pass --catalog <path> or run from the project directory.");
    }
    let catalog = load_catalog(path)?;
    if catalog.is_empty() {
        return Err(PlannerError::InvalidCatalog(format!(
            "{} contains no foods",
            path.display()
        )));
    }
    Ok(catalog)
}

/// Map `--exclude` entries (ids or names) to food ids.
fn resolve_exclusions(catalog: &FoodCatalog, references: &[String]) -> Result<HashSet<u32>> {
    references
        .iter()
        .filter(|r| !r.trim().is_empty())
        .map(|r| {
            let food = catalog.resolve(r)?;
            debug!(reference = %r, food = %food.name, "excluding food");
            Ok(food.id)
        })
        .collect()
}

/// Plan a day non-interactively and print or export it.
fn cmd_plan(catalog: &FoodCatalog, target: TargetVector, options: &PlanOptions) -> Result<()> {
    let mut request = PlanRequest::new(target)
        .with_tolerance(options.tolerance)
        .excluding(resolve_exclusions(catalog, &options.exclude)?);
    if let Some(split) = &options.split {
        request = request.with_split(split.clone());
    }

    let plan = create_daily_plan(catalog, &request);

    if options.json {
        println!("{}", plan_to_json(&plan)?);
    } else {
        display_daily_plan(&plan, catalog);
        display_comparison(&plan);
        if options.chart {
            display_charts(&plan);
        }
    }

    if let Some(path) = &options.output {
        save_plan_json(path, &plan)?;
        if !options.json {
            println!("Plan saved to {}", path.display());
        }
    }

    if plan.is_failed() {
        return Err(PlannerError::InvalidInput(
            "no meal could be planned for these targets".to_string(),
        ));
    }
    Ok(())
}

fn cmd_foods(catalog: &FoodCatalog, meal: Option<&str>, category: Option<&str>) -> Result<()> {
    let mut foods: Vec<_> = match meal {
        Some(name) => catalog.for_meal(name.parse::<Meal>()?),
        None => catalog.all().iter().collect(),
    };
    if let Some(category) = category {
        foods.retain(|f| f.category.eq_ignore_ascii_case(category));
    }

    let title = match (meal, category) {
        (Some(m), Some(c)) => format!("Foods for {} in {}", m, c),
        (Some(m), None) => format!("Foods for {}", m),
        (None, Some(c)) => format!("Foods in {}", c),
        (None, None) => "Food catalog".to_string(),
    };
    display_food_list(&foods, &title);
    Ok(())
}

/// Targets chosen through the interactive menu; `None` means back to the menu.
fn menu_targets(choice: MenuChoice) -> Result<Option<TargetVector>> {
    match choice {
        MenuChoice::CustomTargets => prompt_custom_targets().map(Some),
        MenuChoice::Preset => Ok(prompt_preset()?.map(|goal| goal.preset())),
        MenuChoice::Personal => {
            let profile = prompt_body_profile()?;
            let activity = prompt_activity()?;
            let goal = prompt_goal()?;
            let report = personal_targets(&profile, activity, goal);
            display_personal_targets(&report);
            Ok(Some(report.targets))
        }
        MenuChoice::BrowseFoods | MenuChoice::Quit => Ok(None),
    }
}

/// Interactive loop: pick targets, plan, review, repeat.
fn cmd_menu(catalog: &FoodCatalog) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("  DAILY PORTION PLANNER");
    println!("  {} foods loaded", catalog.len());
    println!("{}", "=".repeat(60));

    loop {
        let choice = prompt_menu()?;
        match choice {
            MenuChoice::Quit => break,
            MenuChoice::BrowseFoods => {
                display_food_list(&catalog.all().iter().collect::<Vec<_>>(), "Food catalog");
                continue;
            }
            _ => {}
        }

        let target = match menu_targets(choice) {
            Ok(Some(target)) => target,
            Ok(None) => continue,
            Err(PlannerError::InvalidInput(msg)) => {
                println!("Invalid input: {}", msg);
                continue;
            }
            Err(e) => return Err(e),
        };

        let excluded = if prompt_yes_no("Exclude any foods?", false)? {
            prompt_exclusions(catalog)?
        } else {
            HashSet::new()
        };
        let tolerance = prompt_tolerance()?;

        println!();
        println!("Optimizing your meal plan...");
        let request = PlanRequest::new(target)
            .with_tolerance(tolerance)
            .excluding(excluded);
        let plan = create_daily_plan(catalog, &request);

        display_daily_plan(&plan, catalog);
        display_comparison(&plan);

        if plan.is_failed() {
            println!("No meal could be planned. Try a wider tolerance or fewer exclusions.");
        } else {
            if prompt_yes_no("Show charts?", true)? {
                display_charts(&plan);
            }
            if prompt_yes_no("Save plan as JSON?", false)? {
                let path = Path::new("meal_plan.json");
                save_plan_json(path, &plan)?;
                println!("Plan saved to {}", path.display());
            }
        }

        if !prompt_yes_no("Plan another day?", true)? {
            break;
        }
    }

    Ok(())
}
