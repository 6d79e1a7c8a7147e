pub mod cases;
pub mod output;
pub mod runner;

pub use cases::{BenchCase, TargetRanges, standard_cases};
pub use output::{print_summary, write_csv};
pub use runner::{BenchConfig, CaseResult, run_bench, run_case};
