//! Multi-algorithm comparison.
//!
//! # Behavior
//!
//! - The workload is validated once, before any run. An invalid workload
//!   fails the whole comparison.
//! - Each algorithm runs on its own copy of the descriptors.
//! - A run that fails (Round-Robin without a valid quantum) becomes a
//!   [`ComparisonOutcome::Failed`] entry; the other runs still complete.
//! - Unrecognized names passed to [`compare_by_name`] are skipped.
//! - Outcomes keep the caller's algorithm order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::score::{rank, score_records, top_scored, ScoringWeights};
use crate::error::{ErrorCategory, SimulationError};
use crate::models::{Algorithm, Process, ScheduleResult, Time, Workload};
use crate::scheduler::{simulate, throughput};

/// Comparison parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Quantum for Round-Robin; ignored by the other algorithms.
    #[serde(default)]
    pub time_quantum: Option<Time>,
    /// Weights used to pick the best record.
    #[serde(default)]
    pub weights: ScoringWeights,
}

impl ComparisonConfig {
    /// Sets the Round-Robin quantum.
    pub fn with_time_quantum(mut self, time_quantum: Time) -> Self {
        self.time_quantum = Some(time_quantum);
        self
    }

    /// Sets the scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Summary of one successful run inside a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Algorithm that was run.
    pub algorithm: Algorithm,
    /// Display name, e.g. `"RoundRobin (TQ=2)"`.
    pub name: String,
    /// Mean turnaround time of the run.
    pub avg_turnaround_time: f64,
    /// Mean waiting time of the run.
    pub avg_waiting_time: f64,
    /// Mean response time of the run.
    pub avg_response_time: f64,
    /// `process count / latest completion time` of this run.
    pub throughput: f64,
    /// Weighted score, set once the record has been scored.
    pub score: Option<f64>,
    /// Full result of the run.
    pub result: ScheduleResult,
}

impl ComparisonRecord {
    /// Builds an unscored record from a finished run.
    pub fn from_result(result: ScheduleResult) -> Self {
        Self {
            algorithm: result.algorithm,
            name: result.display_name(),
            avg_turnaround_time: result.avg_turnaround_time,
            avg_waiting_time: result.avg_waiting_time,
            avg_response_time: result.avg_response_time,
            throughput: throughput(result.processes.len(), result.max_completion_time()),
            score: None,
            result,
        }
    }
}

/// A run that could not be performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRun {
    /// Algorithm that was requested.
    pub algorithm: Algorithm,
    /// Identifier of the algorithm.
    pub name: String,
    /// Error category (e.g. invalid parameter).
    pub category: ErrorCategory,
    /// Rendered error message.
    pub message: String,
}

/// Result of one entry of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    /// The run finished; carries its (scored) record.
    Completed(ComparisonRecord),
    /// The run could not start.
    Failed(FailedRun),
}

impl ComparisonOutcome {
    fn from_run(algorithm: Algorithm, run: Result<ScheduleResult, SimulationError>) -> Self {
        match run {
            Ok(result) => Self::Completed(ComparisonRecord::from_result(result)),
            Err(err) => Self::Failed(FailedRun {
                algorithm,
                name: algorithm.name().to_string(),
                category: err.category(),
                message: err.to_string(),
            }),
        }
    }

    /// The algorithm of this entry.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Completed(r) => r.algorithm,
            Self::Failed(f) => f.algorithm,
        }
    }

    /// The record, if the run completed.
    pub fn record(&self) -> Option<&ComparisonRecord> {
        match self {
            Self::Completed(r) => Some(r),
            Self::Failed(_) => None,
        }
    }

    /// Whether the run finished.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Outcome of a comparison: one entry per requested algorithm, plus the
/// best completed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Entries in request order. Completed records carry their score.
    pub outcomes: Vec<ComparisonOutcome>,
    /// Highest-scoring completed record; `None` if nothing completed.
    pub best: Option<ComparisonRecord>,
}

impl Comparison {
    /// Completed records, in request order.
    pub fn records(&self) -> impl Iterator<Item = &ComparisonRecord> {
        self.outcomes.iter().filter_map(ComparisonOutcome::record)
    }

    /// Failed entries, in request order.
    pub fn failures(&self) -> impl Iterator<Item = &FailedRun> {
        self.outcomes.iter().filter_map(|o| match o {
            ComparisonOutcome::Failed(f) => Some(f),
            ComparisonOutcome::Completed(_) => None,
        })
    }

    /// Completed records, best first.
    pub fn ranking(&self, weights: &ScoringWeights) -> Vec<ComparisonRecord> {
        let records: Vec<ComparisonRecord> = self.records().cloned().collect();
        rank(&records, weights)
    }

    /// Number of entries, failed ones included.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no algorithm was requested (or every name was unknown).
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Runs every algorithm in `algorithms` over `workload` and scores the
/// completed runs against each other.
///
/// # Example
/// ```
/// use cpu_sched_sim::comparison::{compare, ComparisonConfig};
/// use cpu_sched_sim::models::{Algorithm, Process, Workload};
///
/// let workload = Workload::new(vec![
///     Process::new(1, 5),
///     Process::new(2, 3).with_arrival(1),
/// ]).unwrap();
/// let config = ComparisonConfig::default().with_time_quantum(2);
/// let comparison = compare(&workload, &[Algorithm::Fcfs, Algorithm::RoundRobin], &config);
///
/// let names: Vec<_> = comparison.records().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, ["FCFS", "RoundRobin (TQ=2)"]);
/// assert!((comparison.outcomes[0].record().unwrap().throughput - 0.25).abs() < 1e-10);
/// ```
pub fn compare(
    workload: &Workload,
    algorithms: &[Algorithm],
    config: &ComparisonConfig,
) -> Comparison {
    let mut outcomes: Vec<ComparisonOutcome> = algorithms
        .iter()
        .map(|&algorithm| {
            let outcome = ComparisonOutcome::from_run(
                algorithm,
                simulate(algorithm, workload, config.time_quantum),
            );
            if let ComparisonOutcome::Failed(f) = &outcome {
                warn!(algorithm = %f.algorithm, error = %f.message, "comparison entry failed");
            }
            outcome
        })
        .collect();

    let mut records: Vec<ComparisonRecord> = outcomes
        .iter()
        .filter_map(|o| o.record().cloned())
        .collect();
    score_records(&mut records, &config.weights);

    let mut scored = records.iter();
    for outcome in outcomes.iter_mut() {
        if let ComparisonOutcome::Completed(record) = outcome {
            record.score = scored.next().and_then(|r| r.score);
        }
    }

    let best = top_scored(&records).cloned();

    info!(
        processes = workload.len(),
        requested = algorithms.len(),
        completed = records.len(),
        best = best.as_ref().map(|r| r.name.as_str()).unwrap_or("none"),
        "comparison done"
    );

    Comparison { outcomes, best }
}

/// Like [`compare`], but takes algorithm identifiers.
///
/// Unrecognized names are skipped.
pub fn compare_by_name<I>(workload: &Workload, names: I, config: &ComparisonConfig) -> Comparison
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let algorithms: Vec<Algorithm> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let parsed = Algorithm::from_name(name);
            if parsed.is_none() {
                debug!(name, "skipping unknown algorithm");
            }
            parsed
        })
        .collect();
    compare(workload, &algorithms, config)
}

/// Validates raw descriptors, then runs [`compare_by_name`].
///
/// Fails as a whole if the descriptors are invalid; nothing is run.
pub fn compare_processes<I>(
    processes: &[Process],
    names: I,
    config: &ComparisonConfig,
) -> Result<Comparison, SimulationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let workload = Workload::new(processes.to_vec())?;
    Ok(compare_by_name(&workload, names, config))
}
