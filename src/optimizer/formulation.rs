use good_lp::{
    Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
    constraint, default_solver, variable,
};
use tracing::debug;

use crate::models::{FoodItem, Metric, TargetVector};
use crate::optimizer::bands::{Band, deviation_weight};
use crate::optimizer::constants::QUANTITY_REGULARIZER;

/// Whether tolerance bands enter the program as hard constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandMode {
    /// Achieved totals must lie inside every band; the solver may prove this infeasible.
    Enforced,
    /// Deviation objective only: always finds the closest reachable point.
    Relaxed,
}

/// Linear program for one invocation: quantities, deviation pairs and constraints.
///
/// Variables (in insertion order): one quantity per food in `[floor, cap]`, then an
/// over-shoot and under-shoot pair per metric with
/// `achieved − target = over − under`. Floors start at 0.
pub struct PortionProgram<'a> {
    foods: &'a [&'a FoodItem],
    floors: Vec<f64>,
    caps: Vec<f64>,
    target: TargetVector,
    tolerance: f64,
}

impl<'a> PortionProgram<'a> {
    /// `foods` must already be in the deterministic order the caller wants fed to the solver.
    pub fn new(
        foods: &'a [&'a FoodItem],
        default_cap: f64,
        target: TargetVector,
        tolerance: f64,
    ) -> Self {
        let caps: Vec<f64> = foods
            .iter()
            .map(|f| f.max_portion_g.unwrap_or(default_cap))
            .collect();
        Self {
            foods,
            floors: vec![0.0; caps.len()],
            caps,
            target,
            tolerance,
        }
    }

    pub fn caps(&self) -> &[f64] {
        &self.caps
    }

    pub fn floors(&self) -> &[f64] {
        &self.floors
    }

    /// Force food `index` out of the allocation.
    pub fn pin_to_zero(&mut self, index: usize) {
        self.floors[index] = 0.0;
        self.caps[index] = 0.0;
    }

    /// Require at least `grams` of food `index`. Returns false, leaving the
    /// bounds untouched, when the food's cap is below `grams`.
    pub fn require_at_least(&mut self, index: usize, grams: f64) -> bool {
        if self.caps[index] < grams {
            return false;
        }
        self.floors[index] = grams;
        true
    }

    /// Achieved value of `metric` as a linear expression over the quantity variables.
    fn achieved(&self, quantities: &[Variable], metric: Metric) -> Expression {
        self.foods
            .iter()
            .zip(quantities)
            .map(|(food, &q)| (food.per_100g.get(metric) / 100.0) * q)
            .sum()
    }

    /// Solve and return one quantity (grams) per food, clamped to `[floor, cap]`.
    pub fn solve(&self, mode: BandMode) -> Result<Vec<f64>, ResolutionError> {
        let mut vars = ProblemVariables::new();

        let quantities: Vec<Variable> = self
            .floors
            .iter()
            .zip(&self.caps)
            .map(|(&floor, &cap)| vars.add(variable().min(floor).max(cap)))
            .collect();

        let mut constraints: Vec<Constraint> = Vec::new();
        let mut objective_terms: Vec<Expression> = Vec::new();

        for metric in Metric::ALL {
            let target_value = self.target.get(metric);
            let achieved = self.achieved(&quantities, metric);

            let over = vars.add(variable().min(0.0));
            let under = vars.add(variable().min(0.0));
            constraints.push(constraint::eq(achieved.clone() - over + under, target_value));

            let weight = deviation_weight(target_value);
            objective_terms.push(weight * over);
            objective_terms.push(weight * under);

            if mode == BandMode::Enforced && target_value > 0.0 {
                let band = Band::around(metric, target_value, self.tolerance);
                constraints.push(constraint::geq(achieved.clone(), band.lower));
                constraints.push(constraint::leq(achieved, band.upper));
            }
        }

        // Tiny per-gram cost: among equal-deviation allocations prefer the lighter one.
        for &q in &quantities {
            objective_terms.push(QUANTITY_REGULARIZER * q);
        }

        let objective: Expression = objective_terms.into_iter().sum();

        let mut model = vars.minimise(objective).using(default_solver);
        for c in constraints {
            model = model.with(c);
        }

        let solution = model.solve()?;

        let values = quantities
            .iter()
            .zip(self.floors.iter().zip(&self.caps))
            .map(|(&q, (&floor, &cap))| solution.value(q).clamp(floor, cap))
            .collect::<Vec<f64>>();

        debug!(
            mode = ?mode,
            foods = self.foods.len(),
            nonzero = values.iter().filter(|&&v| v > 0.0).count(),
            "solved portion program"
        );

        Ok(values)
    }
}
