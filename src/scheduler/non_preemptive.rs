//! Non-preemptive dispatcher (FCFS, SJF, LJF, Priority).
//!
//! # Algorithm
//!
//! 1. Whenever the CPU is free, collect the admitted jobs (arrival <= now).
//! 2. Pick the best one with the algorithm's [`RuleEngine`] chain.
//! 3. Run it to completion.
//! 4. If nothing is admitted, idle until the next arrival.
//!
//! FCFS falls out of the same loop: with the FIFO rule, the best admitted
//! job is always the next one in (arrival, pid) order.
//!
//! # Complexity
//! O(n^2) selections for n processes.

use tracing::debug;

use super::kpi::build_result;
use super::timeline::{next_arrival, Timeline};
use crate::dispatching::RuleEngine;
use crate::models::{jobs_from, Algorithm, ScheduleResult, Workload};

/// Runs a non-preemptive simulation.
pub(crate) fn run(algorithm: Algorithm, engine: &RuleEngine, workload: &Workload) -> ScheduleResult {
    let mut jobs = jobs_from(workload.processes());
    let mut timeline = Timeline::new();
    let mut remaining = jobs.len();

    while remaining > 0 {
        let now = timeline.now();
        let admitted = (0..jobs.len())
            .filter(|&i| !jobs[i].is_finished() && jobs[i].process.has_arrived(now));

        match engine.select_best(&jobs, admitted) {
            Some(i) => {
                let job = &mut jobs[i];
                let amount = job.remaining_time;
                let ran = job.run(now, amount);
                timeline.run(job.pid(), ran);
                remaining -= 1;
                debug!(%algorithm, pid = job.pid(), start = now, end = now + ran, "dispatch");
            }
            None => {
                let Some(next) = next_arrival(&jobs, now) else {
                    break;
                };
                debug!(%algorithm, from = now, until = next, "cpu idle");
                timeline.idle_until(next);
            }
        }
    }

    build_result(algorithm, None, &jobs, timeline.into_entries())
}
