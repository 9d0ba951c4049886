//! Workload characteristics and algorithm recommendation.
//!
//! # Characteristics
//!
//! | Flag | Condition |
//! |------|-----------|
//! | Homogeneous | burst and arrival spreads both `< 0.5 × mean` |
//! | Short jobs | some burst `< 0.5 × mean burst` |
//! | Long jobs | some burst `> 1.5 × mean burst` |
//! | Priority variation | priority spread `> 2` |
//! | Mixed | not homogeneous, with both short and long jobs |
//!
//! # Suggestion Rules
//!
//! Evaluated in this order; each triggered rule votes for its algorithms:
//!
//! | Rule | Votes |
//! |------|-------|
//! | Homogeneous | FCFS, RoundRobin |
//! | Short jobs | SJF, SRTF |
//! | Long jobs | LJF, LRTF |
//! | Priority variation | Priority |
//! | Mixed | RoundRobin, SRTF |
//!
//! The suggestion is the algorithm with the most votes. Ties go to the
//! algorithm that received its first vote earliest.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Algorithm, Workload};

/// Homogeneity bound, as a fraction of the mean.
pub const HOMOGENEITY_RATIO: f64 = 0.5;
/// Bursts below this fraction of the mean are short.
pub const SHORT_JOB_RATIO: f64 = 0.5;
/// Bursts above this multiple of the mean are long.
pub const LONG_JOB_RATIO: f64 = 1.5;
/// Priority spreads above this count as variation.
pub const PRIORITY_SPREAD: f64 = 2.0;

/// Analyzer thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisThresholds {
    /// Maximum spread, as a fraction of the mean, for a homogeneous field.
    pub homogeneity_ratio: f64,
    /// Bursts below `short_job_ratio × mean` are short.
    pub short_job_ratio: f64,
    /// Bursts above `long_job_ratio × mean` are long.
    pub long_job_ratio: f64,
    /// Priority spreads above this count as variation.
    pub priority_spread: f64,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            homogeneity_ratio: HOMOGENEITY_RATIO,
            short_job_ratio: SHORT_JOB_RATIO,
            long_job_ratio: LONG_JOB_RATIO,
            priority_spread: PRIORITY_SPREAD,
        }
    }
}

/// Mean, minimum and maximum of one descriptor field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Arithmetic mean.
    pub avg: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl FieldSummary {
    /// Summarizes `values`; all zero when empty.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            avg: sum / count as f64,
            min,
            max,
        }
    }

    /// `max - min`.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Statistical shape of a workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadCharacteristics {
    /// Burst and arrival spreads are both small relative to their means.
    pub is_homogeneous: bool,
    /// Some burst is well below the mean burst.
    pub has_short_jobs: bool,
    /// Some burst is well above the mean burst.
    pub has_long_jobs: bool,
    /// Priorities spread wider than the threshold.
    pub has_priority_variation: bool,
    /// Not homogeneous, with both short and long jobs.
    pub is_mixed: bool,
    /// Burst time statistics.
    pub burst_time: FieldSummary,
    /// Arrival time statistics.
    pub arrival_time: FieldSummary,
    /// Priority statistics.
    pub priority: FieldSummary,
}

impl WorkloadCharacteristics {
    /// Analyzes a workload with the default thresholds.
    pub fn analyze(workload: &Workload) -> Self {
        Self::analyze_with(workload, &AnalysisThresholds::default())
    }

    /// Analyzes a workload with custom thresholds.
    pub fn analyze_with(workload: &Workload, thresholds: &AnalysisThresholds) -> Self {
        let processes = workload.processes();
        let burst_time = FieldSummary::of(processes.iter().map(|p| p.burst_time as f64));
        let arrival_time = FieldSummary::of(processes.iter().map(|p| p.arrival_time as f64));
        let priority = FieldSummary::of(processes.iter().map(|p| f64::from(p.priority)));

        let is_homogeneous = burst_time.spread() < thresholds.homogeneity_ratio * burst_time.avg
            && arrival_time.spread() < thresholds.homogeneity_ratio * arrival_time.avg;
        let has_short_jobs = processes
            .iter()
            .any(|p| (p.burst_time as f64) < thresholds.short_job_ratio * burst_time.avg);
        let has_long_jobs = processes
            .iter()
            .any(|p| (p.burst_time as f64) > thresholds.long_job_ratio * burst_time.avg);
        let has_priority_variation = priority.spread() > thresholds.priority_spread;

        Self {
            is_homogeneous,
            has_short_jobs,
            has_long_jobs,
            has_priority_variation,
            is_mixed: !is_homogeneous && has_short_jobs && has_long_jobs,
            burst_time,
            arrival_time,
            priority,
        }
    }

    /// Votes of every triggered rule, in rule order.
    pub fn votes(&self) -> Vec<Algorithm> {
        let rules: [(bool, &[Algorithm]); 5] = [
            (self.is_homogeneous, &[Algorithm::Fcfs, Algorithm::RoundRobin]),
            (self.has_short_jobs, &[Algorithm::Sjf, Algorithm::Srtf]),
            (self.has_long_jobs, &[Algorithm::Ljf, Algorithm::Lrtf]),
            (self.has_priority_variation, &[Algorithm::Priority]),
            (self.is_mixed, &[Algorithm::RoundRobin, Algorithm::Srtf]),
        ];
        rules
            .into_iter()
            .filter(|(fired, _)| *fired)
            .flat_map(|(_, votes)| votes.iter().copied())
            .collect()
    }
}

/// Analyzer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Most-voted algorithm; `None` when no rule fired.
    pub suggested_algorithm: Option<Algorithm>,
    /// The analyzed shape the votes came from.
    pub characteristics: WorkloadCharacteristics,
    /// Every voted algorithm once, in first-vote order.
    pub all_suggestions: Vec<Algorithm>,
}

/// Recommends an algorithm from the workload's shape alone.
///
/// # Example
/// ```
/// use cpu_sched_sim::analysis::suggest_algorithm;
/// use cpu_sched_sim::models::{Algorithm, Process, Workload};
///
/// let workload = Workload::new(vec![
///     Process::new(1, 1),
///     Process::new(2, 10).with_arrival(1),
///     Process::new(3, 4).with_arrival(2),
/// ]).unwrap();
/// let rec = suggest_algorithm(&workload);
/// assert_eq!(rec.suggested_algorithm, Some(Algorithm::Srtf));
/// assert!(rec.characteristics.is_mixed);
/// ```
pub fn suggest_algorithm(workload: &Workload) -> Recommendation {
    recommend(WorkloadCharacteristics::analyze(workload))
}

/// Builds a recommendation from already-computed characteristics.
pub fn recommend(characteristics: WorkloadCharacteristics) -> Recommendation {
    // (algorithm, votes) in first-vote order
    let mut tally: Vec<(Algorithm, usize)> = Vec::new();
    for vote in characteristics.votes() {
        match tally.iter_mut().find(|(a, _)| *a == vote) {
            Some((_, count)) => *count += 1,
            None => tally.push((vote, 1)),
        }
    }

    let mut suggested: Option<(Algorithm, usize)> = None;
    for &(algorithm, count) in &tally {
        if suggested.map_or(true, |(_, best)| count > best) {
            suggested = Some((algorithm, count));
        }
    }

    let suggested_algorithm = suggested.map(|(a, _)| a);
    debug!(
        suggested = ?suggested_algorithm,
        candidates = tally.len(),
        "workload analyzed"
    );

    Recommendation {
        suggested_algorithm,
        characteristics,
        all_suggestions: tally.into_iter().map(|(a, _)| a).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn workload(specs: &[(i64, i64, i32)]) -> Workload {
        let processes = specs
            .iter()
            .enumerate()
            .map(|(i, &(arrival, burst, priority))| {
                Process::new(i as u32 + 1, burst)
                    .with_arrival(arrival)
                    .with_priority(priority)
            })
            .collect();
        Workload::new(processes).unwrap()
    }

    #[test]
    fn test_field_summary() {
        let s = FieldSummary::of([2.0, 4.0, 9.0]);
        assert!((s.avg - 5.0).abs() < 1e-10);
        assert!((s.spread() - 7.0).abs() < 1e-10);
        assert_eq!(FieldSummary::of(std::iter::empty::<f64>()), FieldSummary::default());
    }

    #[test]
    fn test_homogeneous() {
        // bursts 4,5,5 (spread 1 < 2.33), arrivals 4,5,6 (spread 2 < 2.5)
        let c = WorkloadCharacteristics::analyze(&workload(&[(4, 4, 0), (5, 5, 0), (6, 5, 0)]));
        assert!(c.is_homogeneous);
        assert!(!c.has_short_jobs);
        assert!(!c.has_long_jobs);
        assert!(!c.is_mixed);
        let rec = recommend(c);
        assert_eq!(rec.suggested_algorithm, Some(Algorithm::Fcfs));
        assert_eq!(rec.all_suggestions, vec![Algorithm::Fcfs, Algorithm::RoundRobin]);
    }

    #[test]
    fn test_all_arrive_at_zero_is_not_homogeneous() {
        // Arrival spread 0 is not below 0.5 × 0
        let c = WorkloadCharacteristics::analyze(&workload(&[(0, 5, 0), (0, 5, 0)]));
        assert!(!c.is_homogeneous);
        let rec = recommend(c);
        assert_eq!(rec.suggested_algorithm, None);
        assert!(rec.all_suggestions.is_empty());
    }

    #[test]
    fn test_short_and_long_jobs_mixed() {
        // mean burst 5: 1 is short, 10 is long
        let rec = suggest_algorithm(&workload(&[(0, 1, 0), (1, 10, 0), (2, 4, 0)]));
        let c = &rec.characteristics;
        assert!(c.has_short_jobs && c.has_long_jobs && c.is_mixed);
        // SRTF gets two votes (short + mixed), RoundRobin one
        assert_eq!(rec.suggested_algorithm, Some(Algorithm::Srtf));
        assert_eq!(
            rec.all_suggestions,
            vec![
                Algorithm::Sjf,
                Algorithm::Srtf,
                Algorithm::Ljf,
                Algorithm::Lrtf,
                Algorithm::RoundRobin,
            ]
        );
    }

    #[test]
    fn test_short_jobs_only_tie_goes_to_first_vote() {
        // mean burst 7: 2 < 3.5 is short; 10 > 10.5 is false
        let rec = suggest_algorithm(&workload(&[(0, 2, 0), (0, 9, 0), (0, 10, 0)]));
        assert!(rec.characteristics.has_short_jobs);
        assert!(!rec.characteristics.has_long_jobs);
        assert_eq!(rec.suggested_algorithm, Some(Algorithm::Sjf));
    }

    #[test]
    fn test_priority_variation() {
        let c = WorkloadCharacteristics::analyze(&workload(&[(0, 3, 0), (0, 3, 3)]));
        assert!(c.has_priority_variation);
        let c = WorkloadCharacteristics::analyze(&workload(&[(0, 3, 0), (0, 3, 2)]));
        assert!(!c.has_priority_variation);
    }

    #[test]
    fn test_priority_only() {
        let rec = suggest_algorithm(&workload(&[(0, 3, 0), (0, 3, 4)]));
        assert_eq!(rec.suggested_algorithm, Some(Algorithm::Priority));
        assert_eq!(rec.all_suggestions, vec![Algorithm::Priority]);
    }

    #[test]
    fn test_custom_thresholds() {
        let w = workload(&[(0, 3, 0), (0, 3, 2)]);
        let strict = AnalysisThresholds {
            priority_spread: 1.0,
            ..AnalysisThresholds::default()
        };
        assert!(WorkloadCharacteristics::analyze_with(&w, &strict).has_priority_variation);
    }

    #[test]
    fn test_recommendation_json() {
        let rec = suggest_algorithm(&workload(&[(0, 3, 0), (0, 3, 4)]));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["suggested_algorithm"], "Priority");
        assert_eq!(json["characteristics"]["has_priority_variation"], true);
    }
}
