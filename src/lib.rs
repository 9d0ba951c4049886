//! CPU scheduling simulator.
//!
//! Simulates classic uniprocessor scheduling disciplines over a list of
//! process descriptors and reports per-process metrics, a Gantt timeline
//! and averaged metrics for each run. Runs can be compared and scored, and
//! a workload's statistical shape can be turned into a recommendation.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Workload`, `Algorithm`,
//!   `GanttEntry`, `ProcessRecord`, `ScheduleResult`
//! - **`validation`**: Input integrity checks (empty input, duplicate or
//!   zero PIDs, negative arrivals, non-positive bursts)
//! - **`dispatching`**: Selection rules and the rule engine that orders
//!   ready processes
//! - **`scheduler`**: FCFS, SJF, SRTF, LJF, LRTF, Priority and Round-Robin
//!   simulations, plus KPIs
//! - **`comparison`**: Multi-algorithm comparison and weighted scoring
//! - **`analysis`**: Workload characteristics and algorithm suggestion
//!
//! # Example
//!
//! ```
//! use cpu_sched_sim::comparison::{compare_by_name, ComparisonConfig};
//! use cpu_sched_sim::models::{Process, Workload};
//!
//! let workload = Workload::new(vec![
//!     Process::new(1, 8),
//!     Process::new(2, 4).with_arrival(1),
//!     Process::new(3, 9).with_arrival(2),
//! ]).unwrap();
//!
//! let config = ComparisonConfig::default().with_time_quantum(3);
//! let comparison = compare_by_name(&workload, ["FCFS", "SRTF", "RoundRobin"], &config);
//! assert_eq!(comparison.records().count(), 3);
//! assert!(comparison.best.is_some());
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod analysis;
pub mod comparison;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
