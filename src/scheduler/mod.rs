//! Scheduling simulations and KPI evaluation.
//!
//! Each algorithm turns a [`Workload`] into a deterministic
//! [`ScheduleResult`]: per-process metrics, a Gantt timeline and averages.
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Selection key (then arrival, then PID) |
//! |-----------|-----------|------------------|
//! | FCFS | No | Arrival |
//! | SJF | No | Shortest burst |
//! | LJF | No | Longest burst |
//! | Priority | No | Lowest priority value |
//! | SRTF | Yes | Shortest remaining time |
//! | LRTF | Yes | Longest remaining time |
//! | RoundRobin | Yes | FIFO queue, fixed quantum |
//!
//! Every run works on its own clone of the descriptors; running one
//! algorithm never affects another.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod kpi;
mod non_preemptive;
mod preemptive;
mod round_robin;
mod timeline;

pub use kpi::{process_record, throughput, Averages, ScheduleKpi};
pub use round_robin::RoundRobin;
pub use timeline::Timeline;

use tracing::debug;

use crate::dispatching::RuleEngine;
use crate::error::SimulationError;
use crate::models::{Algorithm, Process, ScheduleResult, Time, Workload};

/// Runs one algorithm over a workload.
///
/// `time_quantum` is required (and must be positive) for Round-Robin and
/// ignored by every other algorithm.
///
/// # Example
/// ```
/// use cpu_sched_sim::models::{Algorithm, Process, Workload};
/// use cpu_sched_sim::scheduler::simulate;
///
/// let workload = Workload::new(vec![
///     Process::new(1, 8),
///     Process::new(2, 4).with_arrival(1),
/// ]).unwrap();
///
/// let sjf = simulate(Algorithm::Sjf, &workload, None).unwrap();
/// let srtf = simulate(Algorithm::Srtf, &workload, None).unwrap();
/// assert_eq!(sjf.completion_times()[&2], 12);
/// assert_eq!(srtf.completion_times()[&2], 5);
/// ```
pub fn simulate(
    algorithm: Algorithm,
    workload: &Workload,
    time_quantum: Option<Time>,
) -> Result<ScheduleResult, SimulationError> {
    debug!(%algorithm, processes = workload.len(), "simulation start");
    let result = match RuleEngine::for_algorithm(algorithm) {
        Some(engine) if algorithm.is_preemptive() => preemptive::run(algorithm, &engine, workload),
        Some(engine) => non_preemptive::run(algorithm, &engine, workload),
        None => RoundRobin::from_option(time_quantum)?.schedule(workload),
    };
    debug!(
        %algorithm,
        makespan = result.max_completion_time(),
        avg_waiting = result.avg_waiting_time,
        "simulation done"
    );
    Ok(result)
}

/// Validates raw descriptors, then runs one algorithm.
pub fn simulate_processes(
    algorithm: Algorithm,
    processes: &[Process],
    time_quantum: Option<Time>,
) -> Result<ScheduleResult, SimulationError> {
    let workload = Workload::new(processes.to_vec())?;
    simulate(algorithm, &workload, time_quantum)
}

/// First-Come-First-Served.
pub fn fcfs(workload: &Workload) -> ScheduleResult {
    non_preemptive::run(Algorithm::Fcfs, &RuleEngine::fcfs(), workload)
}

/// Shortest Job First (non-preemptive).
pub fn sjf(workload: &Workload) -> ScheduleResult {
    non_preemptive::run(Algorithm::Sjf, &RuleEngine::sjf(), workload)
}

/// Shortest Remaining Time First (preemptive SJF).
pub fn srtf(workload: &Workload) -> ScheduleResult {
    preemptive::run(Algorithm::Srtf, &RuleEngine::srtf(), workload)
}

/// Longest Job First (non-preemptive).
pub fn ljf(workload: &Workload) -> ScheduleResult {
    non_preemptive::run(Algorithm::Ljf, &RuleEngine::ljf(), workload)
}

/// Longest Remaining Time First (preemptive LJF).
pub fn lrtf(workload: &Workload) -> ScheduleResult {
    preemptive::run(Algorithm::Lrtf, &RuleEngine::lrtf(), workload)
}

/// Non-preemptive priority scheduling (lower value first).
pub fn priority(workload: &Workload) -> ScheduleResult {
    non_preemptive::run(Algorithm::Priority, &RuleEngine::priority(), workload)
}

/// Round-Robin with the given quantum.
pub fn round_robin(
    workload: &Workload,
    time_quantum: Time,
) -> Result<ScheduleResult, SimulationError> {
    Ok(RoundRobin::new(time_quantum)?.schedule(workload))
}
