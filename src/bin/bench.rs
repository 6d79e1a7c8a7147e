use std::path::PathBuf;

use clap::Parser;

use portion_planner_rs::bench::{BenchConfig, print_summary, run_bench, write_csv};
use portion_planner_rs::catalog::load_catalog;
use portion_planner_rs::logging;
use portion_planner_rs::optimizer::DEFAULT_TOLERANCE;

#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(about = "Time the portion optimizer on standard and random daily targets")]
struct Args {
    /// Number of seeded random targets to run after the standard cases
    #[arg(long, default_value = "0")]
    random: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Relative tolerance per metric
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Path to the food catalog CSV
    #[arg(long, default_value = "data/foods.csv")]
    catalog: PathBuf,

    /// Optional CSV report of every case
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log solver details
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    let catalog = match load_catalog(&args.catalog) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog {:?}: {}", args.catalog, e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} foods from {:?}", catalog.len(), args.catalog);

    let config = BenchConfig {
        random_cases: args.random,
        seed: args.seed,
        tolerance: args.tolerance,
        ..BenchConfig::default()
    };

    let results = run_bench(&config, &catalog);
    print_summary(&results);

    if let Some(path) = &args.csv {
        if let Err(e) = write_csv(&results, path) {
            eprintln!("Error writing CSV: {}", e);
        } else {
            println!("Wrote results to {:?}", path);
        }
    }
}
