use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{DailyPlan, MetricComparison};

/// What a JSON export contains: the plan plus its target-vs-actual rows.
#[derive(Debug, Serialize)]
pub struct PlanExport<'a> {
    #[serde(flatten)]
    pub plan: &'a DailyPlan,
    pub comparison: Vec<MetricComparison>,
}

pub fn plan_to_json(plan: &DailyPlan) -> Result<String> {
    let export = PlanExport {
        plan,
        comparison: plan.comparison(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn save_plan_json(path: &Path, plan: &DailyPlan) -> Result<()> {
    fs::write(path, plan_to_json(plan)?)?;
    Ok(())
}
