//! Rule engine for multi-key dispatching.
//!
//! Composes a primary rule with tie-breaking rules and a final,
//! deterministic tie-break by PID.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore};
use crate::models::{Algorithm, Job};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Leave the tie unresolved (stable order of the candidates).
    #[default]
    None,
    /// Smallest PID first.
    ByPid,
}

#[derive(Clone)]
struct LayeredRule {
    rule: Arc<dyn DispatchingRule>,
    /// Primary rules decide preemption; tie-breakers only order.
    primary: bool,
}

/// A composable rule engine for job selection.
///
/// Rules are applied in sequence; the next rule is consulted only when
/// the previous one ties.
///
/// # Example
/// ```
/// use cpu_sched_sim::dispatching::RuleEngine;
/// use cpu_sched_sim::models::{Algorithm, Job, Process};
///
/// let engine = RuleEngine::for_algorithm(Algorithm::Sjf).unwrap();
/// let jobs = vec![
///     Job::new(&Process::new(1, 8)),
///     Job::new(&Process::new(2, 3)),
/// ];
/// assert_eq!(engine.select_best(&jobs, 0..jobs.len()), Some(1));
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<LayeredRule>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::None,
            epsilon: 1e-9,
        }
    }

    /// The selection chain used by an algorithm.
    ///
    /// Every chain ends with earliest arrival, then smallest PID.
    /// Returns `None` for Round-Robin, which dispatches from a FIFO queue.
    pub fn for_algorithm(algorithm: Algorithm) -> Option<Self> {
        match algorithm {
            Algorithm::Fcfs => Some(Self::fcfs()),
            Algorithm::Sjf => Some(Self::sjf()),
            Algorithm::Srtf => Some(Self::srtf()),
            Algorithm::Ljf => Some(Self::ljf()),
            Algorithm::Lrtf => Some(Self::lrtf()),
            Algorithm::Priority => Some(Self::priority()),
            Algorithm::RoundRobin => None,
        }
    }

    /// FCFS: earliest arrival, then PID.
    pub fn fcfs() -> Self {
        Self::new()
            .with_rule(rules::Fifo)
            .with_final_tie_breaker(TieBreaker::ByPid)
    }

    /// SJF: shortest burst, then arrival, then PID.
    pub fn sjf() -> Self {
        Self::keyed(rules::Spt)
    }

    /// SRTF: least remaining time, then arrival, then PID.
    pub fn srtf() -> Self {
        Self::keyed(rules::Lwkr)
    }

    /// LJF: longest burst, then arrival, then PID.
    pub fn ljf() -> Self {
        Self::keyed(rules::Lpt)
    }

    /// LRTF: most remaining time, then arrival, then PID.
    pub fn lrtf() -> Self {
        Self::keyed(rules::Mwkr)
    }

    /// Priority: lowest priority value, then arrival, then PID.
    pub fn priority() -> Self {
        Self::keyed(rules::Priority)
    }

    fn keyed<R: DispatchingRule + 'static>(rule: R) -> Self {
        Self::new()
            .with_rule(rule)
            .with_tie_breaker(rules::Fifo)
            .with_final_tie_breaker(TieBreaker::ByPid)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(LayeredRule {
            rule: Arc::new(rule),
            primary: true,
        });
        self
    }

    /// Adds a tie-breaking rule (orders candidates, never triggers preemption).
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(LayeredRule {
            rule: Arc::new(rule),
            primary: false,
        });
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.name()).collect()
    }

    /// Total order between two jobs: `Less` means `a` is dispatched first.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        for layer in &self.rules {
            let ord = self.compare_scores(layer.rule.evaluate(a), layer.rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::None => Ordering::Equal,
            TieBreaker::ByPid => a.pid().cmp(&b.pid()),
        }
    }

    /// Whether `challenger` beats `incumbent` on the primary rules alone.
    ///
    /// Used for preemption: equal primary scores never preempt, whatever
    /// the tie-breakers say.
    pub fn dominates(&self, challenger: &Job, incumbent: &Job) -> bool {
        for layer in self.rules.iter().filter(|l| l.primary) {
            match self.compare_scores(
                layer.rule.evaluate(challenger),
                layer.rule.evaluate(incumbent),
            ) {
                Ordering::Less => return true,
                Ordering::Greater => return false,
                Ordering::Equal => {}
            }
        }
        false
    }

    /// Returns the index of the highest-priority job among `candidates`.
    pub fn select_best<I>(&self, jobs: &[Job], candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        candidates
            .into_iter()
            .min_by(|&a, &b| self.compare(&jobs[a], &jobs[b]))
    }

    /// Sorts job indices by priority (highest priority first).
    pub fn sort_indices(&self, jobs: &[Job]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..jobs.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&jobs[a], &jobs[b]));
        indices
    }

    /// Scores of a single job under each rule.
    pub fn evaluate(&self, job: &Job) -> Vec<RuleScore> {
        self.rules.iter().map(|l| l.rule.evaluate(job)).collect()
    }

    fn compare_scores(&self, a: RuleScore, b: RuleScore) -> Ordering {
        if (a - b).abs() > self.epsilon {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        } else {
            Ordering::Equal
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|l| {
                        if l.primary {
                            l.rule.name().to_string()
                        } else {
                            format!("{}(tie)", l.rule.name())
                        }
                    })
                    .collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
