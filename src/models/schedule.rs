//! Schedule (simulation output) model.
//!
//! A [`ScheduleResult`] is everything one algorithm run produces: a metrics
//! record per process (in workload input order), the Gantt timeline and the
//! averaged metrics.
//!
//! # Timeline Invariants
//! - Entries are time-ordered and contiguous from t=0 to the last completion.
//! - Every entry has `start < end`.
//! - Idle CPU appears as its own entry with `pid: None`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Algorithm, Pid, Time};

/// One contiguous allocation of the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// Process holding the CPU; `None` = idle.
    pub pid: Option<Pid>,
    /// Start time (inclusive).
    pub start: Time,
    /// End time (exclusive).
    pub end: Time,
}

impl GanttEntry {
    /// Creates an entry for a running process.
    pub fn running(pid: Pid, start: Time, end: Time) -> Self {
        Self {
            pid: Some(pid),
            start,
            end,
        }
    }

    /// Creates an idle entry.
    pub fn idle(start: Time, end: Time) -> Self {
        Self {
            pid: None,
            start,
            end,
        }
    }

    /// Whether the CPU is idle during this entry.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }

    /// Length of the entry.
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Per-process outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process identifier.
    pub pid: Pid,
    /// Arrival time.
    pub arrival_time: Time,
    /// Burst time.
    pub burst_time: Time,
    /// Priority (lower = more urgent).
    pub priority: i32,
    /// Time the last unit of work finished.
    pub completion_time: Time,
    /// `completion - arrival`.
    pub turnaround_time: Time,
    /// `turnaround - burst`.
    pub waiting_time: Time,
    /// `first dispatch - arrival`.
    pub response_time: Time,
}

/// Output of one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Algorithm that produced this result.
    pub algorithm: Algorithm,
    /// Quantum used (Round-Robin only).
    pub time_quantum: Option<Time>,
    /// Per-process records, in workload input order.
    pub processes: Vec<ProcessRecord>,
    /// Time-ordered CPU allocations, idle gaps included.
    pub gantt: Vec<GanttEntry>,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
}

impl ScheduleResult {
    /// Display name, annotated with the quantum for Round-Robin.
    pub fn display_name(&self) -> String {
        self.algorithm.display_name(self.time_quantum)
    }

    /// Finds the record for a PID.
    pub fn record_for(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|r| r.pid == pid)
    }

    /// Completion time per PID.
    pub fn completion_times(&self) -> BTreeMap<Pid, Time> {
        self.processes
            .iter()
            .map(|r| (r.pid, r.completion_time))
            .collect()
    }

    /// Latest completion time (the makespan).
    pub fn max_completion_time(&self) -> Time {
        self.processes
            .iter()
            .map(|r| r.completion_time)
            .max()
            .unwrap_or(0)
    }

    /// Sum of burst times across all records.
    pub fn total_burst_time(&self) -> Time {
        self.processes.iter().map(|r| r.burst_time).sum()
    }

    /// CPU time allocated to `pid` across the timeline.
    pub fn allocated_time(&self, pid: Pid) -> Time {
        self.gantt
            .iter()
            .filter(|e| e.pid == Some(pid))
            .map(|e| e.duration())
            .sum()
    }

    /// Total non-idle time on the timeline.
    pub fn busy_time(&self) -> Time {
        self.gantt
            .iter()
            .filter(|e| !e.is_idle())
            .map(|e| e.duration())
            .sum()
    }

    /// Total idle time on the timeline.
    pub fn idle_time(&self) -> Time {
        self.gantt
            .iter()
            .filter(|e| e.is_idle())
            .map(|e| e.duration())
            .sum()
    }

    /// PIDs in the order they were dispatched (one per Gantt entry).
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.gantt.iter().filter_map(|e| e.pid).collect()
    }
}
