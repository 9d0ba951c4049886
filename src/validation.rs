//! Input validation for scheduling workloads.
//!
//! Checks structural integrity of process descriptors before any
//! simulation runs. Detects:
//! - Empty workloads
//! - Non-positive PIDs
//! - Duplicate PIDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Workloads whose latest possible completion (last arrival plus total
//!   burst) does not fit in [`Time`]
//!
//! All problems are collected and returned together; nothing is simulated
//! when validation fails.

use crate::models::{Process, Time};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The workload has no processes.
    EmptyWorkload,
    /// A PID is zero.
    NonPositivePid,
    /// Two processes share the same PID.
    DuplicatePid,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time (or negative time).
    NonPositiveBurst,
    /// Last arrival plus total burst exceeds the time range.
    TimeOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a workload.
///
/// Checks:
/// 1. At least one process
/// 2. Every PID is positive
/// 3. No duplicate PIDs
/// 4. Every arrival time is `>= 0`
/// 5. Every burst time is `> 0`
/// 6. `max(arrival) + sum(burst)` fits in [`Time`], bounding every
///    simulated instant
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(processes: &[Process]) -> ValidationResult {
    if processes.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Workload contains no processes",
        )]);
    }

    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for p in processes {
        if p.pid == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositivePid,
                "Process PID must be positive, got 0",
            ));
        }

        if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate process PID: {}", p.pid),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process {} has negative arrival time {}",
                    p.pid, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process {} has non-positive burst time {}",
                    p.pid, p.burst_time
                ),
            ));
        }
    }

    if let Some(error) = check_time_horizon(processes) {
        errors.push(error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// No run can end later than the last arrival plus the total burst.
fn check_time_horizon(processes: &[Process]) -> Option<ValidationError> {
    let last_arrival = processes.iter().map(|p| p.arrival_time.max(0)).max()?;
    let horizon = processes
        .iter()
        .map(|p| p.burst_time.max(0))
        .try_fold(last_arrival, Time::checked_add);
    match horizon {
        Some(_) => None,
        None => Some(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!(
                "Latest arrival {last_arrival} plus total burst time exceeds {}",
                Time::MAX
            ),
        )),
    }
}
