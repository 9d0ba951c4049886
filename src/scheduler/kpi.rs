//! Process metrics and schedule quality indicators (KPIs).
//!
//! # Per-process Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//!
//! # Schedule KPIs
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion time |
//! | Busy / Idle time | Sum of non-idle / idle Gantt entries |
//! | CPU Utilization | busy / makespan |
//! | Throughput | processes / makespan |
//! | Context Switches | Dispatches of a different process than the previous one |

use serde::{Deserialize, Serialize};

use crate::models::{Algorithm, GanttEntry, Job, Process, ProcessRecord, ScheduleResult, Time};

/// Computes the metrics record for one process.
///
/// `start_time` is the first dispatch, `completion_time` the end of the
/// last allocated slice.
pub fn process_record(process: &Process, start_time: Time, completion_time: Time) -> ProcessRecord {
    let turnaround_time = completion_time - process.arrival_time;
    ProcessRecord {
        pid: process.pid,
        arrival_time: process.arrival_time,
        burst_time: process.burst_time,
        priority: process.priority,
        completion_time,
        turnaround_time,
        waiting_time: turnaround_time - process.burst_time,
        response_time: start_time - process.arrival_time,
    }
}

/// Mean turnaround, waiting and response times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Mean turnaround time.
    pub turnaround_time: f64,
    /// Mean waiting time.
    pub waiting_time: f64,
    /// Mean response time.
    pub response_time: f64,
}

impl Averages {
    /// Arithmetic means over `records`. All zero for an empty slice.
    pub fn of(records: &[ProcessRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let n = records.len() as f64;
        // Summed as f64: n near-limit times would overflow Time
        let sum = |f: fn(&ProcessRecord) -> Time| records.iter().map(|r| f(r) as f64).sum::<f64>();
        Self {
            turnaround_time: sum(|r| r.turnaround_time) / n,
            waiting_time: sum(|r| r.waiting_time) / n,
            response_time: sum(|r| r.response_time) / n,
        }
    }
}

/// Assembles a [`ScheduleResult`] from finished jobs and their timeline.
///
/// Records keep the job order, which is the workload input order.
pub(crate) fn build_result(
    algorithm: Algorithm,
    time_quantum: Option<Time>,
    jobs: &[Job],
    gantt: Vec<GanttEntry>,
) -> ScheduleResult {
    let processes: Vec<ProcessRecord> = jobs
        .iter()
        .map(|job| {
            debug_assert!(job.is_finished(), "job {} left unfinished", job.pid());
            let start = job.start_time.unwrap_or(job.arrival_time());
            let completion = job.completion_time.unwrap_or(start);
            process_record(&job.process, start, completion)
        })
        .collect();

    let averages = Averages::of(&processes);

    ScheduleResult {
        algorithm,
        time_quantum,
        processes,
        gantt,
        avg_turnaround_time: averages.turnaround_time,
        avg_waiting_time: averages.waiting_time,
        avg_response_time: averages.response_time,
    }
}

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Latest completion time.
    pub makespan: Time,
    /// Time the CPU spent running processes.
    pub busy_time: Time,
    /// Time the CPU spent idle.
    pub idle_time: Time,
    /// Fraction of the makespan spent busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per unit time.
    pub throughput: f64,
    /// Number of switches between different processes.
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a finished schedule.
    pub fn calculate(result: &ScheduleResult) -> Self {
        let makespan = result.max_completion_time();
        let busy_time = result.busy_time();

        let dispatches = result.dispatch_order();
        let context_switches = dispatches.windows(2).filter(|w| w[0] != w[1]).count();

        let (cpu_utilization, throughput) = if makespan <= 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                throughput(result.processes.len(), makespan),
            )
        };

        Self {
            makespan,
            busy_time,
            idle_time: result.idle_time(),
            cpu_utilization,
            throughput,
            context_switches,
        }
    }
}

/// `process_count / makespan`; 0.0 when the makespan is not positive.
pub fn throughput(process_count: usize, makespan: Time) -> f64 {
    if makespan <= 0 {
        0.0
    } else {
        process_count as f64 / makespan as f64
    }
}
