//! Scheduling algorithm identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Time;

/// The seven simulated disciplines.
///
/// Identifiers match the names accepted by
/// [`compare_by_name`](crate::comparison::compare_by_name):
/// `FCFS`, `SJF`, `SRTF`, `LJF`, `LRTF`, `Priority`, `RoundRobin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served (non-preemptive).
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest Remaining Time First (preemptive).
    #[serde(rename = "SRTF")]
    Srtf,
    /// Longest Job First (non-preemptive).
    #[serde(rename = "LJF")]
    Ljf,
    /// Longest Remaining Time First (preemptive).
    #[serde(rename = "LRTF")]
    Lrtf,
    /// Priority, lower value first (non-preemptive).
    Priority,
    /// Round-Robin with a fixed quantum (preemptive).
    RoundRobin,
}

impl Algorithm {
    /// All algorithms, in canonical order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Ljf,
        Algorithm::Lrtf,
        Algorithm::Priority,
        Algorithm::RoundRobin,
    ];

    /// Identifier string.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::Ljf => "LJF",
            Algorithm::Lrtf => "LRTF",
            Algorithm::Priority => "Priority",
            Algorithm::RoundRobin => "RoundRobin",
        }
    }

    /// Parses an identifier. Matching is exact; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Long-form description.
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First-Come-First-Served",
            Algorithm::Sjf => "Shortest Job First",
            Algorithm::Srtf => "Shortest Remaining Time First",
            Algorithm::Ljf => "Longest Job First",
            Algorithm::Lrtf => "Longest Remaining Time First",
            Algorithm::Priority => "Priority Scheduling",
            Algorithm::RoundRobin => "Round-Robin",
        }
    }

    /// Whether a running process can be interrupted.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Algorithm::Srtf | Algorithm::Lrtf | Algorithm::RoundRobin
        )
    }

    /// Whether a time quantum must be supplied.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }

    /// Display name: `"RoundRobin (TQ=2)"` for Round-Robin with a quantum,
    /// the identifier otherwise.
    pub fn display_name(&self, time_quantum: Option<Time>) -> String {
        match (self, time_quantum) {
            (Algorithm::RoundRobin, Some(q)) => format!("{} (TQ={q})", self.name()),
            _ => self.name().to_string(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
