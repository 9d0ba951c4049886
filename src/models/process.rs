//! Process descriptor and its per-run working copy.
//!
//! A [`Process`] is what the caller supplies: an identifier, an arrival
//! time, a CPU burst and a priority. It is never mutated by a simulation.
//! Each algorithm run clones the descriptors into [`Job`]s, which carry the
//! mutable bookkeeping (remaining time, first dispatch, completion).
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Simulation time in integer units.
pub type Time = i64;

/// Process identifier.
pub type Pid = u32;

/// A process to be scheduled.
///
/// # Priority Convention
/// **Lower value = more urgent.** The Priority algorithm dispatches the
/// admitted process with the smallest `priority` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique positive identifier.
    pub pid: Pid,
    /// Time the process becomes eligible to run.
    pub arrival_time: Time,
    /// Total CPU time required.
    pub burst_time: Time,
    /// Scheduling priority (lower = more urgent).
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    /// Creates a process arriving at t=0 with priority 0.
    pub fn new(pid: Pid, burst_time: Time) -> Self {
        Self {
            pid,
            arrival_time: 0,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: Time) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: Time) -> bool {
        self.arrival_time <= now
    }
}

/// Working copy of a [`Process`] owned by a single simulation run.
///
/// `remaining_time` starts at `burst_time` and is decremented as CPU time
/// is allocated. `start_time` is set on the first dispatch only.
#[derive(Debug, Clone)]
pub struct Job {
    /// The descriptor this job was cloned from.
    pub process: Process,
    /// CPU time still owed.
    pub remaining_time: Time,
    /// Time of first dispatch.
    pub start_time: Option<Time>,
    /// Time the last unit of work finished.
    pub completion_time: Option<Time>,
}

impl Job {
    /// Clones a descriptor into a fresh job.
    pub fn new(process: &Process) -> Self {
        Self {
            process: process.clone(),
            remaining_time: process.burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    /// Process identifier.
    #[inline]
    pub fn pid(&self) -> Pid {
        self.process.pid
    }

    /// Arrival time.
    #[inline]
    pub fn arrival_time(&self) -> Time {
        self.process.arrival_time
    }

    /// Full burst time.
    #[inline]
    pub fn burst_time(&self) -> Time {
        self.process.burst_time
    }

    /// Whether all work has been allocated.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time <= 0
    }

    /// Allocates `[now, now + amount)` to this job.
    ///
    /// Records the first dispatch time and, when the remaining time reaches
    /// zero, the completion time. `amount` is clamped to the remaining time.
    /// Returns the amount actually run.
    pub fn run(&mut self, now: Time, amount: Time) -> Time {
        let slice = amount.min(self.remaining_time).max(0);
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.remaining_time -= slice;
        if self.remaining_time == 0 {
            self.completion_time = Some(now + slice);
        }
        slice
    }
}

/// Clones descriptors into working jobs (one independent copy per run).
pub fn jobs_from(processes: &[Process]) -> Vec<Job> {
    processes.iter().map(Job::new).collect()
}
