//! Algorithm comparison and best-algorithm selection.
//!
//! [`compare`] runs several algorithms over one workload and turns each run
//! into a [`ComparisonRecord`] (averages plus throughput). The records are
//! then scored with [`ScoringWeights`] and the highest score is reported
//! as the best algorithm.

mod engine;
mod score;

pub use engine::{
    compare, compare_by_name, compare_processes, Comparison, ComparisonConfig, ComparisonOutcome,
    ComparisonRecord, FailedRun,
};
pub use score::{
    find_best, rank, score_records, top_scored, ScoringWeights, RESPONSE_WEIGHT, THROUGHPUT_WEIGHT,
    TURNAROUND_WEIGHT, WAITING_WEIGHT,
};
