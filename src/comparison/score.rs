//! Weighted scoring of comparison records.
//!
//! Each metric is normalized against the largest value in the set:
//!
//! | Metric | Direction | Normalized |
//! |--------|-----------|-----------|
//! | Waiting | lower is better | `1 - v / max` |
//! | Turnaround | lower is better | `1 - v / max` |
//! | Response | lower is better | `1 - v / max` |
//! | Throughput | higher is better | `v / max` |
//!
//! A metric whose maximum is not positive carries no signal and scores
//! 1.0 for every record.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::ComparisonRecord;

/// Default weight of the average waiting time.
pub const WAITING_WEIGHT: f64 = 0.35;
/// Default weight of the average turnaround time.
pub const TURNAROUND_WEIGHT: f64 = 0.25;
/// Default weight of the average response time.
pub const RESPONSE_WEIGHT: f64 = 0.20;
/// Default weight of the throughput.
pub const THROUGHPUT_WEIGHT: f64 = 0.20;

/// Weights of the four normalized metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of the average waiting time (lower is better).
    pub waiting_time: f64,
    /// Weight of the average turnaround time (lower is better).
    pub turnaround_time: f64,
    /// Weight of the average response time (lower is better).
    pub response_time: f64,
    /// Weight of the throughput (higher is better).
    pub throughput: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            waiting_time: WAITING_WEIGHT,
            turnaround_time: TURNAROUND_WEIGHT,
            response_time: RESPONSE_WEIGHT,
            throughput: THROUGHPUT_WEIGHT,
        }
    }
}

impl ScoringWeights {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.waiting_time + self.turnaround_time + self.response_time + self.throughput
    }
}

/// Per-metric maxima over a record set.
#[derive(Debug, Clone, Copy, Default)]
struct Maxima {
    turnaround_time: f64,
    waiting_time: f64,
    response_time: f64,
    throughput: f64,
}

impl Maxima {
    fn of(records: &[ComparisonRecord]) -> Self {
        records.iter().fold(Self::default(), |m, r| Self {
            turnaround_time: m.turnaround_time.max(r.avg_turnaround_time),
            waiting_time: m.waiting_time.max(r.avg_waiting_time),
            response_time: m.response_time.max(r.avg_response_time),
            throughput: m.throughput.max(r.throughput),
        })
    }
}

fn lower_is_better(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        1.0 - value / max
    }
}

fn higher_is_better(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        value / max
    }
}

fn weighted_score(record: &ComparisonRecord, maxima: &Maxima, weights: &ScoringWeights) -> f64 {
    weights.waiting_time * lower_is_better(record.avg_waiting_time, maxima.waiting_time)
        + weights.turnaround_time
            * lower_is_better(record.avg_turnaround_time, maxima.turnaround_time)
        + weights.response_time * lower_is_better(record.avg_response_time, maxima.response_time)
        + weights.throughput * higher_is_better(record.throughput, maxima.throughput)
}

/// Sets `score` on every record, normalizing against this set.
pub fn score_records(records: &mut [ComparisonRecord], weights: &ScoringWeights) {
    let maxima = Maxima::of(records);
    for record in records.iter_mut() {
        record.score = Some(weighted_score(record, &maxima, weights));
    }
}

/// Scored copies of `records`, best first.
///
/// The sort is stable: records with equal scores keep their input order.
pub fn rank(records: &[ComparisonRecord], weights: &ScoringWeights) -> Vec<ComparisonRecord> {
    let mut ranked = records.to_vec();
    score_records(&mut ranked, weights);
    ranked.sort_by(by_score_desc);
    ranked
}

fn by_score_desc(a: &ComparisonRecord, b: &ComparisonRecord) -> Ordering {
    let (a, b) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// The highest already-scored record, without rescoring; the first one
/// wins ties. Unscored records count as 0.0.
pub fn top_scored(records: &[ComparisonRecord]) -> Option<&ComparisonRecord> {
    records.iter().fold(None, |best, r| match best {
        Some(b) if by_score_desc(r, b) != Ordering::Less => Some(b),
        _ => Some(r),
    })
}

/// The highest-scoring record; the first one wins ties.
///
/// Returns `None` for an empty slice.
///
/// # Example
/// ```
/// use cpu_sched_sim::comparison::{compare, find_best, ComparisonConfig, ScoringWeights};
/// use cpu_sched_sim::models::{Algorithm, Process, Workload};
///
/// let workload = Workload::new(vec![
///     Process::new(1, 8),
///     Process::new(2, 1).with_arrival(1),
/// ]).unwrap();
/// let comparison = compare(
///     &workload,
///     &[Algorithm::Fcfs, Algorithm::Srtf],
///     &ComparisonConfig::default(),
/// );
/// let records: Vec<_> = comparison.records().cloned().collect();
/// let best = find_best(&records, &ScoringWeights::default()).unwrap();
/// assert_eq!(best.algorithm, Algorithm::Srtf);
/// assert!(find_best(&[], &ScoringWeights::default()).is_none());
/// ```
pub fn find_best(
    records: &[ComparisonRecord],
    weights: &ScoringWeights,
) -> Option<ComparisonRecord> {
    let mut scored = records.to_vec();
    score_records(&mut scored, weights);
    top_scored(&scored).cloned()
}
