//! Gantt timeline builder.
//!
//! Tracks the simulation clock and appends contiguous CPU allocations.
//! Idle gaps become explicit `pid: None` entries. With merging enabled,
//! back-to-back slices of the same process collapse into one entry.

use crate::models::{GanttEntry, Job, Pid, Time};

/// Append-only Gantt timeline starting at t=0.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<GanttEntry>,
    now: Time,
    merge_slices: bool,
}

impl Timeline {
    /// Creates an empty timeline that records one entry per dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges uninterrupted consecutive slices of the same process.
    pub fn with_merging(mut self) -> Self {
        self.merge_slices = true;
        self
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> Time {
        self.now
    }

    /// Advances the clock to `until`, recording the gap as idle.
    ///
    /// No-op if `until` is not in the future.
    pub fn idle_until(&mut self, until: Time) {
        if until <= self.now {
            return;
        }
        match self.entries.last_mut() {
            Some(last) if last.is_idle() && last.end == self.now => last.end = until,
            _ => self.entries.push(GanttEntry::idle(self.now, until)),
        }
        self.now = until;
    }

    /// Records `pid` on the CPU for `duration` starting now.
    ///
    /// No-op for non-positive durations, so every entry keeps `start < end`.
    pub fn run(&mut self, pid: Pid, duration: Time) {
        if duration <= 0 {
            return;
        }
        let end = self.now + duration;
        match self.entries.last_mut() {
            Some(last) if self.merge_slices && last.pid == Some(pid) && last.end == self.now => {
                last.end = end;
            }
            _ => self.entries.push(GanttEntry::running(pid, self.now, end)),
        }
        self.now = end;
    }

    /// Recorded entries so far.
    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    /// Consumes the timeline.
    pub fn into_entries(self) -> Vec<GanttEntry> {
        self.entries
    }
}

/// Earliest arrival strictly after `now` among unfinished jobs.
pub(crate) fn next_arrival(jobs: &[Job], now: Time) -> Option<Time> {
    jobs.iter()
        .filter(|j| !j.is_finished() && j.arrival_time() > now)
        .map(|j| j.arrival_time())
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    #[test]
    fn test_leading_idle() {
        let mut t = Timeline::new();
        t.idle_until(3);
        t.run(1, 2);
        assert_eq!(
            t.entries(),
            &[GanttEntry::idle(0, 3), GanttEntry::running(1, 3, 5)]
        );
        assert_eq!(t.now(), 5);
    }

    #[test]
    fn test_idle_in_past_is_ignored() {
        let mut t = Timeline::new();
        t.run(1, 4);
        t.idle_until(2);
        t.idle_until(4);
        assert_eq!(t.entries().len(), 1);
    }

    #[test]
    fn test_no_merge_by_default() {
        let mut t = Timeline::new();
        t.run(1, 2);
        t.run(1, 2);
        assert_eq!(t.entries().len(), 2);
    }

    #[test]
    fn test_merging() {
        let mut t = Timeline::new().with_merging();
        t.run(1, 2);
        t.run(1, 3);
        t.run(2, 1);
        t.run(1, 1);
        assert_eq!(
            t.into_entries(),
            vec![
                GanttEntry::running(1, 0, 5),
                GanttEntry::running(2, 5, 6),
                GanttEntry::running(1, 6, 7),
            ]
        );
    }

    #[test]
    fn test_merging_does_not_cross_idle() {
        let mut t = Timeline::new().with_merging();
        t.run(1, 2);
        t.idle_until(4);
        t.run(1, 2);
        assert_eq!(t.entries().len(), 3);
    }

    #[test]
    fn test_zero_duration_ignored() {
        let mut t = Timeline::new();
        t.run(1, 0);
        assert!(t.entries().is_empty());
        assert_eq!(t.now(), 0);
    }

    #[test]
    fn test_next_arrival() {
        let mut jobs = vec![
            Job::new(&Process::new(1, 2)),
            Job::new(&Process::new(2, 2).with_arrival(4)),
            Job::new(&Process::new(3, 2).with_arrival(9)),
        ];
        assert_eq!(next_arrival(&jobs, 0), Some(4));
        assert_eq!(next_arrival(&jobs, 4), Some(9));
        jobs[2].run(9, 2);
        assert_eq!(next_arrival(&jobs, 4), None);
    }
}
