//! Round-Robin scheduler.
//!
//! # Algorithm
//!
//! 1. Admit every job arriving at t=0 into a FIFO ready queue, by PID.
//! 2. Dequeue the head and run it for `min(remaining, quantum)`.
//! 3. Append every job that arrived during that slice, including at its
//!    final tick, in (arrival, pid) order.
//! 4. Re-enqueue the dispatched job at the tail if it still has work.
//!    Arrivals at the exact expiry tick are therefore queued ahead of it.
//! 5. If the queue is empty, idle until the next arrival.
//!
//! Every dispatch is its own Gantt entry; quantum boundaries stay visible
//! even when the same job is dispatched twice in a row.

use std::collections::VecDeque;

use tracing::debug;

use super::kpi::build_result;
use super::timeline::Timeline;
use crate::error::SimulationError;
use crate::models::{jobs_from, Algorithm, Job, ScheduleResult, Time, Workload};

/// Round-Robin scheduler with a fixed time quantum.
///
/// # Example
/// ```
/// use cpu_sched_sim::scheduler::RoundRobin;
/// use cpu_sched_sim::models::{Process, Workload};
///
/// let workload = Workload::new(vec![Process::new(1, 5), Process::new(2, 3)]).unwrap();
/// let result = RoundRobin::new(2).unwrap().schedule(&workload);
/// assert_eq!(result.dispatch_order(), vec![1, 2, 1, 2, 1]);
/// assert_eq!(result.completion_times()[&2], 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    time_quantum: Time,
}

impl RoundRobin {
    /// Creates a scheduler. Fails unless `time_quantum > 0`.
    pub fn new(time_quantum: Time) -> Result<Self, SimulationError> {
        if time_quantum <= 0 {
            return Err(SimulationError::invalid_parameter(
                "time_quantum",
                format!("must be a positive integer, got {time_quantum}"),
            ));
        }
        Ok(Self { time_quantum })
    }

    /// Creates a scheduler from an optional quantum; `None` is an error.
    pub fn from_option(time_quantum: Option<Time>) -> Result<Self, SimulationError> {
        match time_quantum {
            Some(q) => Self::new(q),
            None => Err(SimulationError::invalid_parameter(
                "time_quantum",
                "required for RoundRobin",
            )),
        }
    }

    /// The configured quantum.
    pub fn time_quantum(&self) -> Time {
        self.time_quantum
    }

    /// Runs the simulation.
    pub fn schedule(&self, workload: &Workload) -> ScheduleResult {
        let mut jobs = jobs_from(workload.processes());
        let mut arrivals = ArrivalQueue::new(&jobs);
        let mut ready: VecDeque<usize> = VecDeque::with_capacity(jobs.len());
        let mut timeline = Timeline::new();
        let mut remaining = jobs.len();

        arrivals.admit_until(&jobs, 0, &mut ready);

        while remaining > 0 {
            let Some(i) = ready.pop_front() else {
                let Some(next) = arrivals.peek_arrival(&jobs) else {
                    break;
                };
                debug!(from = timeline.now(), until = next, "cpu idle");
                timeline.idle_until(next);
                arrivals.admit_until(&jobs, next, &mut ready);
                continue;
            };

            let now = timeline.now();
            let job = &mut jobs[i];
            let ran = job.run(now, self.time_quantum);
            let pid = job.pid();
            let finished = job.is_finished();
            timeline.run(pid, ran);
            debug!(pid, start = now, end = now + ran, finished, "dispatch");

            // Arrivals up to and including the expiry tick go first.
            arrivals.admit_until(&jobs, timeline.now(), &mut ready);

            if finished {
                remaining -= 1;
            } else {
                ready.push_back(i);
            }
        }

        build_result(
            Algorithm::RoundRobin,
            Some(self.time_quantum),
            &jobs,
            timeline.into_entries(),
        )
    }
}

/// Jobs not yet admitted, in (arrival, pid) order.
struct ArrivalQueue {
    pending: Vec<usize>,
    next: usize,
}

impl ArrivalQueue {
    fn new(jobs: &[Job]) -> Self {
        let mut pending: Vec<usize> = (0..jobs.len()).collect();
        pending.sort_by_key(|&i| (jobs[i].arrival_time(), jobs[i].pid()));
        Self { pending, next: 0 }
    }

    /// Moves every job with `arrival <= now` to the ready queue.
    fn admit_until(&mut self, jobs: &[Job], now: Time, ready: &mut VecDeque<usize>) {
        while let Some(&i) = self.pending.get(self.next) {
            if jobs[i].arrival_time() > now {
                break;
            }
            ready.push_back(i);
            self.next += 1;
        }
    }

    fn peek_arrival(&self, jobs: &[Job]) -> Option<Time> {
        self.pending.get(self.next).map(|&i| jobs[i].arrival_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GanttEntry, Process};

    fn simulate(quantum: Time, processes: Vec<Process>) -> ScheduleResult {
        let workload = Workload::new(processes).unwrap();
        RoundRobin::new(quantum).unwrap().schedule(&workload)
    }

    #[test]
    fn test_rr_quantum_two() {
        let r = simulate(2, vec![Process::new(1, 5), Process::new(2, 3)]);
        assert_eq!(
            r.gantt,
            vec![
                GanttEntry::running(1, 0, 2),
                GanttEntry::running(2, 2, 4),
                GanttEntry::running(1, 4, 6),
                GanttEntry::running(2, 6, 7),
                GanttEntry::running(1, 7, 8),
            ]
        );
        assert_eq!(r.completion_times()[&1], 8);
        assert_eq!(r.completion_times()[&2], 7);
        assert_eq!(r.time_quantum, Some(2));
        assert_eq!(r.display_name(), "RoundRobin (TQ=2)");
    }

    #[test]
    fn test_rr_initial_queue_by_pid() {
        let r = simulate(1, vec![Process::new(3, 1), Process::new(1, 1), Process::new(2, 1)]);
        assert_eq!(r.dispatch_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_rr_arrival_at_expiry_goes_before_preempted() {
        // P2 arrives exactly when P1's first quantum expires
        let r = simulate(2, vec![Process::new(1, 4), Process::new(2, 2).with_arrival(2)]);
        assert_eq!(r.dispatch_order(), vec![1, 2, 1]);
        assert_eq!(r.completion_times()[&2], 4);
        assert_eq!(r.completion_times()[&1], 6);
    }

    #[test]
    fn test_rr_arrivals_during_slice_ordered() {
        let r = simulate(
            3,
            vec![
                Process::new(1, 4),
                Process::new(3, 1).with_arrival(2),
                Process::new(2, 1).with_arrival(2),
                Process::new(4, 1).with_arrival(1),
            ],
        );
        // During [0,3): 4 (t=1), then 2 and 3 (t=2, by pid); P1 goes last
        assert_eq!(r.dispatch_order(), vec![1, 4, 2, 3, 1]);
        assert_eq!(r.completion_times()[&1], 7);
    }

    #[test]
    fn test_rr_idle_until_first_arrival() {
        let r = simulate(2, vec![Process::new(1, 3).with_arrival(4)]);
        assert_eq!(
            r.gantt,
            vec![
                GanttEntry::idle(0, 4),
                GanttEntry::running(1, 4, 6),
                GanttEntry::running(1, 6, 7),
            ]
        );
        assert_eq!(r.record_for(1).map(|p| p.response_time), Some(0));
    }

    #[test]
    fn test_rr_idle_gap_mid_run() {
        let r = simulate(4, vec![Process::new(1, 2), Process::new(2, 2).with_arrival(5)]);
        assert_eq!(r.gantt[1], GanttEntry::idle(2, 5));
        assert_eq!(r.completion_times()[&2], 7);
    }

    #[test]
    fn test_rr_response_time_is_first_dispatch() {
        let r = simulate(
            1,
            vec![Process::new(1, 3), Process::new(2, 3), Process::new(3, 3)],
        );
        assert_eq!(r.record_for(3).map(|p| p.response_time), Some(2));
        assert_eq!(r.record_for(3).map(|p| p.completion_time), Some(9));
    }

    #[test]
    fn test_rr_large_quantum_is_fcfs() {
        let r = simulate(100, vec![Process::new(1, 5), Process::new(2, 3).with_arrival(1)]);
        assert_eq!(r.completion_times()[&1], 5);
        assert_eq!(r.completion_times()[&2], 8);
    }

    #[test]
    fn test_rr_rejects_bad_quantum() {
        assert!(matches!(
            RoundRobin::new(0),
            Err(SimulationError::InvalidParameter { parameter: "time_quantum", .. })
        ));
        assert!(RoundRobin::new(-3).is_err());
        assert!(RoundRobin::from_option(None).is_err());
        assert_eq!(RoundRobin::from_option(Some(3)).unwrap().time_quantum(), 3);
    }
}
