//! Validated workload.

use serde::{Deserialize, Serialize};

use super::{Pid, Process, Time};
use crate::error::SimulationError;
use crate::validation::validate_workload;

/// A non-empty list of well-formed process descriptors.
///
/// Construction runs [`validate_workload`], so every algorithm can assume
/// unique positive PIDs, non-negative arrivals and positive bursts.
/// Input order is preserved; it is the order of per-process records in
/// every [`ScheduleResult`](super::ScheduleResult).
///
/// # Example
/// ```
/// use cpu_sched_sim::models::{Process, Workload};
///
/// let workload = Workload::new(vec![
///     Process::new(1, 5),
///     Process::new(2, 3).with_arrival(1),
/// ]).unwrap();
/// assert_eq!(workload.len(), 2);
/// assert_eq!(workload.total_burst_time(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Process>", into = "Vec<Process>")]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Validates and wraps a descriptor list.
    pub fn new(processes: Vec<Process>) -> Result<Self, SimulationError> {
        validate_workload(&processes)?;
        Ok(Self { processes })
    }

    /// The descriptors, in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of processes (always at least one).
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of all burst times.
    pub fn total_burst_time(&self) -> Time {
        self.processes.iter().map(|p| p.burst_time).sum()
    }

    /// Earliest arrival time.
    pub fn first_arrival(&self) -> Time {
        self.processes
            .iter()
            .map(|p| p.arrival_time)
            .min()
            .unwrap_or(0)
    }

    /// Finds a descriptor by PID.
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

impl TryFrom<Vec<Process>> for Workload {
    type Error = SimulationError;

    fn try_from(processes: Vec<Process>) -> Result<Self, Self::Error> {
        Self::new(processes)
    }
}

impl From<Workload> for Vec<Process> {
    fn from(workload: Workload) -> Self {
        workload.processes
    }
}
