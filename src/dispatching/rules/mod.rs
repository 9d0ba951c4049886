//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival**: FIFO
//! - **Burst-based**: SPT, LPT (static, use the full burst)
//! - **Remaining-work**: LWKR, MWKR (dynamic, use the remaining time)
//! - **Priority**: PRIORITY (lower value first)
//!
//! # Score Convention
//! All rules return lower scores for higher priority jobs.

use super::{DispatchingRule, RuleScore};
use crate::models::Job;

// ======================== Arrival rules ========================

/// First In First Out.
///
/// Prioritizes jobs by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.arrival_time() as f64
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

// ======================== Burst-based rules ========================

/// Shortest Processing Time.
///
/// Prioritizes jobs with the shorter total burst. Minimizes average
/// waiting time among non-preemptive disciplines.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.burst_time() as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        -(job.burst_time() as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

// ======================== Remaining-work rules ========================

/// Least Work Remaining.
///
/// Prioritizes jobs closest to completion. Re-evaluated at every event,
/// this is the SRTF selection key.
#[derive(Debug, Clone, Copy)]
pub struct Lwkr;

impl DispatchingRule for Lwkr {
    fn name(&self) -> &'static str {
        "LWKR"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.remaining_time as f64
    }

    fn description(&self) -> &'static str {
        "Least Work Remaining"
    }
}

/// Most Work Remaining.
///
/// Prioritizes jobs with the most remaining work (LRTF selection key).
#[derive(Debug, Clone, Copy)]
pub struct Mwkr;

impl DispatchingRule for Mwkr {
    fn name(&self) -> &'static str {
        "MWKR"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        -(job.remaining_time as f64)
    }

    fn description(&self) -> &'static str {
        "Most Work Remaining"
    }
}

// ======================== Priority-based rule ========================

/// Simple priority rule.
///
/// Prioritizes jobs with lower `priority` values (textbook convention:
/// priority 0 is the most urgent).
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.process.priority as f64
    }

    fn description(&self) -> &'static str {
        "Process Priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn make_job(pid: u32, arrival: i64, burst: i64, priority: i32) -> Job {
        Job::new(
            &Process::new(pid, burst)
                .with_arrival(arrival)
                .with_priority(priority),
        )
    }

    #[test]
    fn test_fifo() {
        let early = make_job(1, 0, 5, 0);
        let late = make_job(2, 3, 5, 0);
        assert!(Fifo.evaluate(&early) < Fifo.evaluate(&late));
    }

    #[test]
    fn test_spt() {
        let short = make_job(1, 0, 2, 0);
        let long = make_job(2, 0, 9, 0);
        assert!(Spt.evaluate(&short) < Spt.evaluate(&long));
    }

    #[test]
    fn test_lpt() {
        let short = make_job(1, 0, 2, 0);
        let long = make_job(2, 0, 9, 0);
        assert!(Lpt.evaluate(&long) < Lpt.evaluate(&short));
    }

    #[test]
    fn test_lwkr_uses_remaining_time() {
        let mut partly_done = make_job(1, 0, 10, 0);
        partly_done.run(0, 8); // 2 left
        let fresh = make_job(2, 0, 5, 0);
        assert!(Lwkr.evaluate(&partly_done) < Lwkr.evaluate(&fresh));
        // Burst-based SPT still sees the full burst
        assert!(Spt.evaluate(&fresh) < Spt.evaluate(&partly_done));
    }

    #[test]
    fn test_mwkr() {
        let mut partly_done = make_job(1, 0, 10, 0);
        partly_done.run(0, 8);
        let fresh = make_job(2, 0, 5, 0);
        assert!(Mwkr.evaluate(&fresh) < Mwkr.evaluate(&partly_done));
    }

    #[test]
    fn test_priority_lower_value_first() {
        let urgent = make_job(1, 0, 5, 0);
        let relaxed = make_job(2, 0, 5, 4);
        assert!(Priority.evaluate(&urgent) < Priority.evaluate(&relaxed));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Spt.description(), "Shortest Processing Time");
        assert_eq!(Mwkr.name(), "MWKR");
    }
}
