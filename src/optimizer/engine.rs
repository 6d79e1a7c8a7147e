use std::collections::HashSet;
use std::time::Instant;

use good_lp::ResolutionError;
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};
use crate::models::{
    FoodItem, Metric, Nutrients, OptimizationResult, PortionLine, SolveStatus, TargetVector,
};
use crate::optimizer::bands::out_of_band;
use crate::optimizer::constants::*;
use crate::optimizer::formulation::{BandMode, PortionProgram};

/// Engine knobs. Defaults come from `optimizer::constants`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Serving cap for foods without their own `max_portion_g`.
    pub default_max_portion_g: f64,
    /// Quantities below this are dropped from the reported allocation.
    pub negligible_g: f64,
    /// Relative slack on band checks.
    pub band_epsilon: f64,
    /// Requests with more candidate foods than this are rejected.
    pub max_candidates: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_max_portion_g: DEFAULT_MAX_PORTION_G,
            negligible_g: NEGLIGIBLE_G,
            band_epsilon: BAND_EPSILON,
            max_candidates: MAX_CANDIDATES,
        }
    }
}

/// Optimize portions with the default engine configuration.
pub fn optimize<'a, I>(candidates: I, target: &TargetVector, tolerance: f64) -> OptimizationResult
where
    I: IntoIterator<Item = &'a FoodItem>,
{
    optimize_with(candidates, target, tolerance, &EngineConfig::default())
}

/// Compute per-food quantities that bring the candidates' totals within
/// `tolerance` of `target`.
///
/// Never panics and never returns `Err`: malformed input and solver failures
/// come back as `SolveStatus::Error` with a cause, an unreachable target as
/// `SolveStatus::Infeasible` with the closest allocation found.
pub fn optimize_with<'a, I>(
    candidates: I,
    target: &TargetVector,
    tolerance: f64,
    config: &EngineConfig,
) -> OptimizationResult
where
    I: IntoIterator<Item = &'a FoodItem>,
{
    let mut foods: Vec<&FoodItem> = candidates.into_iter().collect();

    if let Err(e) = validate_request(&foods, target, tolerance, config) {
        warn!("rejected optimization request: {}", e);
        return OptimizationResult::error(e.to_string());
    }

    if target.is_zero() {
        debug!("zero target, empty allocation");
        return OptimizationResult {
            status: SolveStatus::Optimal,
            portions: Vec::new(),
            totals: Nutrients::ZERO,
            cause: None,
        };
    }

    // Stable solver input order for reproducible vertices.
    foods.sort_by_key(|f| f.id);

    let started = Instant::now();
    let mut program = PortionProgram::new(&foods, config.default_max_portion_g, *target, tolerance);

    let result = match program.solve(BandMode::Enforced) {
        Ok(q) => settle_in_band(&mut program, &foods, q, target, tolerance, config),
        Err(ResolutionError::Infeasible) => {
            debug!("tolerance bands unreachable, solving for closest point");
            match program.solve(BandMode::Relaxed) {
                Ok(q) => build_result(&foods, &q, target, tolerance, config),
                Err(e) => return solver_failure(e),
            }
        }
        Err(e) => return solver_failure(e),
    };

    debug!(
        status = %result.status,
        portions = result.portions.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "optimization finished"
    );

    result
}

/// Turn an in-band solution into a reported one whose truncated totals are
/// still in band.
///
/// Foods the solver left under `negligible_g` are first raised to
/// `negligible_g`, then, if that is infeasible, pinned to zero. Each round
/// settles at least one food, so the loop ends. When neither works the
/// in-band solution is reported with its sub-threshold portions kept.
fn settle_in_band(
    program: &mut PortionProgram<'_>,
    foods: &[&FoodItem],
    mut quantities: Vec<f64>,
    target: &TargetVector,
    tolerance: f64,
    config: &EngineConfig,
) -> OptimizationResult {
    for _ in 0..=foods.len() {
        let result = build_result(foods, &quantities, target, tolerance, config);
        if result.status == SolveStatus::Optimal {
            return result;
        }

        let small: Vec<usize> = quantities
            .iter()
            .enumerate()
            .filter(|&(_, &q)| q > 0.0 && q < config.negligible_g)
            .map(|(i, _)| i)
            .collect();
        if small.is_empty() {
            return result;
        }
        debug!(foods = small.len(), "truncation left the bands, re-solving");

        let raised = small
            .iter()
            .all(|&i| program.require_at_least(i, config.negligible_g));

        let next = if raised {
            program.solve(BandMode::Enforced).ok()
        } else {
            None
        };

        quantities = match next {
            Some(q) => q,
            None => {
                for &i in &small {
                    program.pin_to_zero(i);
                }
                match program.solve(BandMode::Enforced) {
                    Ok(q) => q,
                    Err(_) => break,
                }
            }
        };
    }

    warn!("in-band allocation needs sub-threshold portions, keeping them");
    build_result_with_cutoff(foods, &quantities, target, tolerance, config, 0.0)
}

fn solver_failure(e: ResolutionError) -> OptimizationResult {
    let err = PlannerError::from(e);
    warn!("{}", err);
    OptimizationResult::error(err.to_string())
}

/// Reject inputs the program cannot be built from.
pub fn validate_request(
    foods: &[&FoodItem],
    target: &TargetVector,
    tolerance: f64,
    config: &EngineConfig,
) -> Result<()> {
    if foods.is_empty() {
        return Err(PlannerError::NoCandidates);
    }

    if foods.len() > config.max_candidates {
        return Err(PlannerError::InvalidInput(format!(
            "{} candidate foods exceeds the limit of {}",
            foods.len(),
            config.max_candidates
        )));
    }

    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(PlannerError::InvalidInput(format!(
            "tolerance must be positive, got {}",
            tolerance
        )));
    }

    if !target.is_non_negative() {
        return Err(PlannerError::InvalidInput(
            "target components must be non-negative".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for food in foods {
        if !food.is_valid() {
            return Err(PlannerError::InvalidInput(format!(
                "food '{}' has an invalid nutrient profile",
                food.name
            )));
        }
        if !seen.insert(food.id) {
            return Err(PlannerError::InvalidInput(format!(
                "duplicate food id {}",
                food.id
            )));
        }
    }

    Ok(())
}

/// Drop negligible quantities, sum exactly over what remains and decide the status.
fn build_result(
    foods: &[&FoodItem],
    quantities: &[f64],
    target: &TargetVector,
    tolerance: f64,
    config: &EngineConfig,
) -> OptimizationResult {
    build_result_with_cutoff(foods, quantities, target, tolerance, config, config.negligible_g)
}

fn build_result_with_cutoff(
    foods: &[&FoodItem],
    quantities: &[f64],
    target: &TargetVector,
    tolerance: f64,
    config: &EngineConfig,
    cutoff_g: f64,
) -> OptimizationResult {
    let portions: Vec<PortionLine> = foods
        .iter()
        .zip(quantities)
        .filter(|&(_, &q)| q > 0.0 && q >= cutoff_g)
        .map(|(food, &q)| PortionLine {
            food_id: food.id,
            name: food.name.clone(),
            quantity_g: q,
            nutrients: food.nutrients_for(q),
        })
        .collect();

    let totals: Nutrients = portions.iter().map(|p| p.nutrients).sum();

    let missed = out_of_band(target, &totals, tolerance, config.band_epsilon);
    let (status, cause) = if missed.is_empty() {
        (SolveStatus::Optimal, None)
    } else {
        (SolveStatus::Infeasible, Some(describe_miss(&missed, target, &totals)))
    };

    OptimizationResult {
        status,
        portions,
        totals,
        cause,
    }
}

fn describe_miss(missed: &[Metric], target: &TargetVector, totals: &Nutrients) -> String {
    let parts: Vec<String> = missed
        .iter()
        .map(|&m| {
            format!(
                "{} {:.1}{} vs target {:.1}{}",
                m.label().to_lowercase(),
                totals.get(m),
                m.unit(),
                target.get(m),
                m.unit()
            )
        })
        .collect();
    format!("outside tolerance: {}", parts.join(", "))
}
