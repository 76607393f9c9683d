//! # Taskweave
//!
//! A dependency-graph planning engine for agent-orchestration workflows.
//! Given a list of task descriptors with declared dependencies and
//! concurrency-safety flags, taskweave validates the dependency graph and
//! computes an execution plan that maximizes legal parallelism.
//!
//! ## Architecture Overview
//!
//! The system consists of several components organized into modules:
//!
//! - **[`plan`]**: The planning engine — dependency graph, cycle detection,
//!   topological ordering, parallel phase grouping, critical-path analysis,
//!   dependency optimization, and advisory review
//! - **[`cli`]**: Command-line surface — argument parsing, task list
//!   loading, plan output, and configuration discovery
//! - **[`env`]**: Centralized path constants and helpers
//!
//! ## Features
//!
//! ### 🗺️ Planning
//! - **Validated Graphs**: Unknown references and cycles (including
//!   self-loops) fail fast before any scheduling runs
//! - **Deterministic Ordering**: Kahn's algorithm over insertion-stable
//!   indices yields a reproducible topological order
//! - **Parallel Phases**: Tasks at one dependency level batch into a
//!   concurrent phase; exclusive tasks serialize into singleton phases
//! - **Critical Path**: Duration-weighted longest chain and the minimum
//!   completion time it implies
//!
//! ### 🔎 Analysis
//! - **Dependency Optimization**: Transitive-reduction pass that trims
//!   redundant declared dependencies without changing the schedule
//! - **Advisories**: Bottleneck, long-chain, and low-efficiency findings
//!   under configurable thresholds
//!
//! ## Quick Start
//!
//! ```rust
//! use taskweave::{Planner, TaskDescriptor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tasks = vec![
//!         TaskDescriptor::new("research", "Survey the design space"),
//!         TaskDescriptor::new("implement", "Build the feature")
//!             .with_dependencies(vec!["research".to_string()]),
//!     ];
//!
//!     let plan = Planner::default().plan(&tasks)?;
//!     println!("{} phases, {} min minimum", plan.phase_count(), plan.minimum_time);
//!     Ok(())
//! }
//! ```

/// Planning engine: graph construction, validation, ordering, phase
/// grouping, critical-path analysis, dependency optimization, advisories.
pub mod plan;

/// Command-line interface: argument parsing, task list loading, plan
/// output, configuration discovery.
pub mod cli;

/// Environment constants and path utilities.
///
/// Centralizes hardcoded paths and directory names used throughout the
/// application for easier maintenance and consistency.
pub mod env;

// Re-export main planning types
pub use plan::{
    Advisor, Advisory, AdvisoryConfig, DependencyGraph, DependencyOptimizer, ExecutionPlan,
    Phase, PlanError, Planner, PlannerConfig, TaskDescriptor, TaskSummary,
};

// Re-export CLI configuration types
pub use cli::{ConfigDiscovery, TaskweaveConfig};
