use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bench::cases::{BenchCase, TargetRanges, standard_cases};
use crate::catalog::FoodCatalog;
use crate::models::{SolveStatus, TargetVector};
use crate::optimizer::{DEFAULT_TOLERANCE, optimize};
use crate::planner::{PlanRequest, create_daily_plan};

/// Configuration for a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Seeded random targets run after the standard cases.
    pub random_cases: usize,
    pub seed: u64,
    pub tolerance: f64,
    pub ranges: TargetRanges,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            random_cases: 0,
            seed: 123,
            tolerance: DEFAULT_TOLERANCE,
            ranges: TargetRanges::default(),
        }
    }
}

/// Timing and outcome of one case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub name: String,
    pub target: TargetVector,
    /// Single engine call over the whole catalog against the daily target.
    pub engine_status: SolveStatus,
    pub engine_ms: f64,
    pub foods_used: usize,
    /// Full three-meal plan.
    pub plan_ms: f64,
    pub meals_optimal: usize,
    pub meals_total: usize,
    /// Largest absolute deviation of the day's totals, in percent.
    pub max_deviation_pct: f64,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

pub fn run_case(case: &BenchCase, catalog: &FoodCatalog, tolerance: f64) -> CaseResult {
    let start = Instant::now();
    let engine = optimize(catalog.all(), &case.target, tolerance);
    let engine_ms = elapsed_ms(start);

    let request = PlanRequest::new(case.target).with_tolerance(tolerance);
    let start = Instant::now();
    let plan = create_daily_plan(catalog, &request);
    let plan_ms = elapsed_ms(start);

    let max_deviation_pct = plan
        .comparison()
        .iter()
        .map(|c| c.deviation_pct.abs())
        .fold(0.0_f64, f64::max);

    CaseResult {
        name: case.name.clone(),
        target: case.target,
        engine_status: engine.status,
        engine_ms,
        foods_used: engine.portions.len(),
        plan_ms,
        meals_optimal: plan.optimal_meals().count(),
        meals_total: plan.meals.len(),
        max_deviation_pct,
    }
}

/// Run the standard cases, then `config.random_cases` seeded random ones.
pub fn run_bench(config: &BenchConfig, catalog: &FoodCatalog) -> Vec<CaseResult> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut cases = standard_cases();
    cases.extend((0..config.random_cases).map(|i| BenchCase::random(&mut rng, &config.ranges, i)));

    let total = cases.len();
    let mut results = Vec::with_capacity(total);

    for (i, case) in cases.iter().enumerate() {
        results.push(run_case(case, catalog, config.tolerance));

        if total > 10 && (i + 1) % (total / 10).max(1) == 0 {
            let pct = ((i + 1) as f64 / total as f64) * 100.0;
            eprint!("\r{:.0}% complete", pct);
        }
    }
    if total > 10 {
        eprintln!();
    }

    results
}
