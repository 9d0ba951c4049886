//! Dispatching rules and rule engine for CPU scheduling.
//!
//! Every algorithm except Round-Robin is "pick the best admitted job by
//! some key, break ties by arrival, then by PID". The key is a
//! [`DispatchingRule`]; the chain of keys is a [`RuleEngine`].
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::dispatching::{RuleEngine, TieBreaker};
//! use cpu_sched_sim::dispatching::rules;
//!
//! // Shortest Job First
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Spt)
//!     .with_tie_breaker(rules::Fifo)
//!     .with_final_tie_breaker(TieBreaker::ByPid);
//! assert_eq!(engine.rule_names(), vec!["SPT", "FIFO"]);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::Job;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates job priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for jobs that should be dispatched first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a job in its current state.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, job: &Job) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
