//! Preemptive remaining-time dispatcher (SRTF, LRTF).
//!
//! # Algorithm
//!
//! Event-driven: the clock jumps from event to event, where an event is
//! an arrival or a completion. At each event:
//!
//! 1. Select the best admitted job with the [`RuleEngine`] chain.
//! 2. Keep the running job unless the candidate strictly beats it on the
//!    primary rule (equal remaining time never preempts).
//! 3. Run the chosen job until the next arrival or its completion,
//!    whichever comes first.
//! 4. If nothing is admitted, idle until the next arrival.
//!
//! Uninterrupted slices of the same job are merged on the timeline.
//!
//! # Complexity
//! O(n) events, O(n) per selection → O(n^2).

use tracing::debug;

use super::kpi::build_result;
use super::timeline::{next_arrival, Timeline};
use crate::dispatching::RuleEngine;
use crate::models::{jobs_from, Algorithm, ScheduleResult, Workload};

/// Runs a preemptive remaining-time simulation.
pub(crate) fn run(algorithm: Algorithm, engine: &RuleEngine, workload: &Workload) -> ScheduleResult {
    let mut jobs = jobs_from(workload.processes());
    let mut timeline = Timeline::new().with_merging();
    let mut remaining = jobs.len();
    let mut running: Option<usize> = None;

    while remaining > 0 {
        let now = timeline.now();
        let admitted = (0..jobs.len())
            .filter(|&i| !jobs[i].is_finished() && jobs[i].process.has_arrived(now));

        let Some(best) = engine.select_best(&jobs, admitted) else {
            let Some(next) = next_arrival(&jobs, now) else {
                break;
            };
            debug!(%algorithm, from = now, until = next, "cpu idle");
            timeline.idle_until(next);
            running = None;
            continue;
        };

        let chosen = match running {
            Some(cur) if cur != best && !engine.dominates(&jobs[best], &jobs[cur]) => cur,
            Some(cur) if cur != best => {
                debug!(
                    %algorithm,
                    at = now,
                    preempted = jobs[cur].pid(),
                    by = jobs[best].pid(),
                    "preempt"
                );
                best
            }
            _ => best,
        };

        let horizon = next_arrival(&jobs, now);
        let job = &mut jobs[chosen];
        let slice = match horizon {
            Some(t) => job.remaining_time.min(t - now),
            None => job.remaining_time,
        };
        let ran = job.run(now, slice);
        timeline.run(job.pid(), ran);

        if job.is_finished() {
            debug!(%algorithm, pid = job.pid(), at = now + ran, "complete");
            remaining -= 1;
            running = None;
        } else {
            running = Some(chosen);
        }
    }

    build_result(algorithm, None, &jobs, timeline.into_entries())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GanttEntry, Process};

    fn simulate(algorithm: Algorithm, processes: Vec<Process>) -> ScheduleResult {
        let workload = Workload::new(processes).unwrap();
        let engine = RuleEngine::for_algorithm(algorithm).unwrap();
        run(algorithm, &engine, &workload)
    }

    #[test]
    fn test_srtf_preempts_on_shorter_arrival() {
        let r = simulate(
            Algorithm::Srtf,
            vec![Process::new(1, 8), Process::new(2, 4).with_arrival(1)],
        );
        assert_eq!(r.completion_times()[&1], 12);
        assert_eq!(r.completion_times()[&2], 5);
        assert_eq!(
            r.gantt,
            vec![
                GanttEntry::running(1, 0, 1),
                GanttEntry::running(2, 1, 5),
                GanttEntry::running(1, 5, 12),
            ]
        );
    }

    #[test]
    fn test_srtf_textbook() {
        let r = simulate(
            Algorithm::Srtf,
            vec![
                Process::new(1, 8),
                Process::new(2, 4).with_arrival(1),
                Process::new(3, 9).with_arrival(2),
                Process::new(4, 5).with_arrival(3),
            ],
        );
        assert_eq!(r.dispatch_order(), vec![1, 2, 4, 1, 3]);
        assert_eq!(r.completion_times()[&3], 26);
        // waiting: 9, 0, 15, 2
        assert!((r.avg_waiting_time - 6.5).abs() < 1e-10);
        // response: 0, 0, 15, 2
        assert!((r.avg_response_time - 4.25).abs() < 1e-10);
    }

    #[test]
    fn test_srtf_equal_remaining_does_not_preempt() {
        let r = simulate(
            Algorithm::Srtf,
            vec![Process::new(1, 4), Process::new(2, 2).with_arrival(2)],
        );
        assert_eq!(r.completion_times()[&1], 4);
        assert_eq!(r.completion_times()[&2], 6);
    }

    #[test]
    fn test_srtf_equal_remaining_after_completion_uses_arrival_then_pid() {
        let r = simulate(
            Algorithm::Srtf,
            vec![
                Process::new(1, 4),
                Process::new(5, 3).with_arrival(1),
                Process::new(2, 3).with_arrival(2),
                Process::new(3, 3).with_arrival(1),
            ],
        );
        // t=4: P1 done, nothing running; 3 and 5 (arrived t=1) beat 2, pid 3 first
        assert_eq!(r.dispatch_order(), vec![1, 3, 5, 2]);
        assert_eq!(r.completion_times()[&3], 7);
        assert_eq!(r.completion_times()[&5], 10);
        assert_eq!(r.completion_times()[&2], 13);
    }

    #[test]
    fn test_srtf_merges_uninterrupted_slices() {
        let r = simulate(
            Algorithm::Srtf,
            vec![
                Process::new(1, 3),
                Process::new(2, 20).with_arrival(1),
                Process::new(3, 30).with_arrival(2),
            ],
        );
        // P1 is re-evaluated at t=1 and t=2 but never interrupted
        assert_eq!(r.gantt[0], GanttEntry::running(1, 0, 3));
        assert_eq!(r.gantt.len(), 3);
    }

    #[test]
    fn test_srtf_idle_between_arrivals() {
        let r = simulate(
            Algorithm::Srtf,
            vec![Process::new(1, 2), Process::new(2, 3).with_arrival(5)],
        );
        assert_eq!(
            r.gantt,
            vec![
                GanttEntry::running(1, 0, 2),
                GanttEntry::idle(2, 5),
                GanttEntry::running(2, 5, 8),
            ]
        );
    }

    #[test]
    fn test_lrtf_preempts_on_longer_arrival() {
        let r = simulate(
            Algorithm::Lrtf,
            vec![Process::new(1, 2), Process::new(2, 6).with_arrival(1)],
        );
        assert_eq!(r.completion_times()[&1], 8);
        assert_eq!(r.completion_times()[&2], 7);
        assert_eq!(r.record_for(1).map(|p| p.response_time), Some(0));
    }

    #[test]
    fn test_lrtf_equal_remaining_does_not_preempt() {
        let r = simulate(
            Algorithm::Lrtf,
            vec![
                Process::new(1, 3),
                Process::new(2, 4).with_arrival(1),
                Process::new(3, 1).with_arrival(3),
            ],
        );
        // t=3: P1 and P2 both have 2 left; P2 is running and keeps the CPU
        assert_eq!(
            r.gantt,
            vec![
                GanttEntry::running(1, 0, 1),
                GanttEntry::running(2, 1, 5),
                GanttEntry::running(1, 5, 7),
                GanttEntry::running(3, 7, 8),
            ]
        );
    }

    #[test]
    fn test_lrtf_tie_on_simultaneous_arrival_uses_pid() {
        let r = simulate(
            Algorithm::Lrtf,
            vec![Process::new(2, 3), Process::new(1, 3)],
        );
        // No further arrivals, so the first pick runs to completion
        assert_eq!(r.dispatch_order(), vec![1, 2]);
        assert_eq!(r.completion_times()[&1], 3);
    }
}
