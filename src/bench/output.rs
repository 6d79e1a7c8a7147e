use std::path::Path;

use crate::bench::runner::CaseResult;
use crate::error::Result;
use crate::models::SolveStatus;

/// Write all case results to a CSV file.
pub fn write_csv(results: &[CaseResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "case",
        "calories",
        "protein",
        "carbs",
        "fat",
        "engine_status",
        "engine_ms",
        "foods_used",
        "plan_ms",
        "meals_optimal",
        "meals_total",
        "max_deviation_pct",
    ])?;

    for r in results {
        wtr.write_record([
            r.name.clone(),
            format!("{:.0}", r.target.calories),
            format!("{:.0}", r.target.protein_g),
            format!("{:.0}", r.target.carbs_g),
            format!("{:.0}", r.target.fat_g),
            r.engine_status.to_string(),
            format!("{:.3}", r.engine_ms),
            r.foods_used.to_string(),
            format!("{:.3}", r.plan_ms),
            r.meals_optimal.to_string(),
            r.meals_total.to_string(),
            format!("{:.2}", r.max_deviation_pct),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print one line per case plus an aggregate.
pub fn print_summary(results: &[CaseResult]) {
    println!("\n=== Optimization speed ===\n");

    for r in results {
        let mark = if r.engine_status == SolveStatus::Optimal {
            "ok "
        } else {
            "FAIL"
        };
        println!(
            "{} {:<15} engine {:8.2}ms [{}]  day plan {:8.2}ms ({}/{} meals, max dev {:.1}%)",
            mark,
            r.name,
            r.engine_ms,
            r.engine_status,
            r.plan_ms,
            r.meals_optimal,
            r.meals_total,
            r.max_deviation_pct
        );
    }

    if results.is_empty() {
        return;
    }

    let n = results.len() as f64;
    let optimal = results
        .iter()
        .filter(|r| r.engine_status == SolveStatus::Optimal)
        .count();
    let avg_engine = results.iter().map(|r| r.engine_ms).sum::<f64>() / n;
    let avg_plan = results.iter().map(|r| r.plan_ms).sum::<f64>() / n;
    let slowest = results.iter().map(|r| r.plan_ms).fold(0.0_f64, f64::max);

    println!();
    println!("─────────────────────────────────────────────────────────────");
    println!(
        "{}/{} engine runs optimal; avg engine {:.2}ms, avg day plan {:.2}ms, slowest day plan {:.2}ms",
        optimal,
        results.len(),
        avg_engine,
        avg_plan,
        slowest
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrients;
    use tempfile::tempdir;

    #[test]
    fn test_write_csv() {
        let results = vec![CaseResult {
            name: "Maintenance".to_string(),
            target: Nutrients::new(2000.0, 150.0, 200.0, 65.0),
            engine_status: SolveStatus::Optimal,
            engine_ms: 1.5,
            foods_used: 6,
            plan_ms: 4.25,
            meals_optimal: 3,
            meals_total: 3,
            max_deviation_pct: 2.0,
        }];

        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.csv");
        write_csv(&results, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Maintenance");
        assert_eq!(&rows[0][5], "optimal");
        assert_eq!(&rows[0][9], "3");
    }
}
