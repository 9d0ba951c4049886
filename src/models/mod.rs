//! CPU scheduling domain models.
//!
//! Provides the data types shared by every algorithm: the caller's
//! process descriptors, the validated workload, the per-run working copy,
//! and the simulation output.
//!
//! # Lifecycle
//!
//! | Type | Created by | Mutated? |
//! |------|-----------|----------|
//! | Process | Caller | Never |
//! | Workload | [`Workload::new`] (validates) | Never |
//! | Job | Each algorithm run (clone) | Yes, during that run only |
//! | ScheduleResult | Each algorithm run | Never after return |

mod algorithm;
mod process;
mod schedule;
mod workload;

pub use algorithm::Algorithm;
pub use process::{jobs_from, Job, Pid, Process, Time};
pub use schedule::{GanttEntry, ProcessRecord, ScheduleResult};
pub use workload::Workload;
