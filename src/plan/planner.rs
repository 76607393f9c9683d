use crate::plan::graph::DependencyGraph;
use crate::plan::optimizer::DependencyOptimizer;
use crate::plan::types::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Configuration for the planning entry point
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Run the dependency-reduction pass before building the graph
    pub optimize_dependencies: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            optimize_dependencies: false,
        }
    }
}

/// Synchronous planning entry point.
///
/// Builds a fresh [`DependencyGraph`] per call, validates it, and composes
/// the derived orderings into an [`ExecutionPlan`]. All failures surface as
/// [`PlanError`] before any partial plan exists; nothing is retried or
/// suppressed here.
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Create a planner with the given configuration
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Compute an execution plan for the supplied tasks.
    ///
    /// # Errors
    ///
    /// - [`PlanError::MalformedTask`] when a task record has no id
    /// - [`PlanError::UnknownDependency`] when a dependency id names no
    ///   supplied task
    /// - [`PlanError::CyclicDependency`] when the dependency relation
    ///   contains a loop (including a self-loop)
    pub fn plan(&self, tasks: &[TaskDescriptor]) -> Result<ExecutionPlan, PlanError> {
        let reduced;
        let tasks = if self.config.optimize_dependencies {
            reduced = DependencyOptimizer::reduce(tasks);
            reduced.as_slice()
        } else {
            tasks
        };

        let graph = DependencyGraph::from_tasks(tasks)?;
        graph.validate_references()?;
        if graph.has_cycle() {
            return Err(PlanError::CyclicDependency);
        }

        let execution_order = graph.topological_sort()?;
        let levels = graph.assign_levels();
        let groups = graph.parallel_groups(&levels);
        let (critical_path, minimum_time) = graph.critical_path(&execution_order);

        let phases = groups
            .iter()
            .enumerate()
            .map(|(i, group)| Phase {
                index: i + 1,
                parallel: group.len() > 1,
                tasks: group
                    .iter()
                    .filter_map(|id| graph.task(id))
                    .map(|task| TaskSummary::from_descriptor(task, graph.dependencies_of(&task.id)))
                    .collect(),
            })
            .collect();

        let parallel_efficiency = parallel_efficiency(&groups, graph.len());

        let plan = ExecutionPlan {
            plan_id: Uuid::new_v4(),
            created_at: Utc::now(),
            total_tasks: graph.len(),
            execution_order,
            phases,
            critical_path,
            minimum_time,
            parallel_efficiency,
        };

        info!(
            "planned {} tasks into {} phases, critical path {} min, efficiency {:.1}%",
            plan.total_tasks,
            plan.phases.len(),
            plan.minimum_time,
            plan.parallel_efficiency
        );
        Ok(plan)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

/// Percentage of tasks that are members of a multi-task phase
fn parallel_efficiency(groups: &[Vec<String>], total_tasks: usize) -> f64 {
    if groups.is_empty() || total_tasks == 0 {
        return 0.0;
    }

    let batched: usize = groups
        .iter()
        .filter(|group| group.len() > 1)
        .map(Vec::len)
        .sum();

    batched as f64 / total_tasks as f64 * 100.0
}

/// Complete execution plan for one planning request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub plan_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub total_tasks: usize,
    /// One dependency-respecting linear order over all task ids
    pub execution_order: Vec<String>,
    /// Ordered phases; everything within a phase may run concurrently
    pub phases: Vec<Phase>,
    /// Longest duration-weighted dependency chain
    pub critical_path: Vec<String>,
    /// Total duration (minutes) along the critical path; lower bound on
    /// completion time
    pub minimum_time: u64,
    /// Percentage of tasks scheduled into multi-task phases, 0–100
    pub parallel_efficiency: f64,
}

/// One step of the execution plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// 1-based position in the plan
    pub index: usize,
    /// Whether this phase holds more than one task
    pub parallel: bool,
    pub tasks: Vec<TaskSummary>,
}

/// Task details echoed into a phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub description: String,
    pub agent_type: String,
    /// Estimated duration in minutes, fallback applied
    pub estimated_duration: u32,
    pub dependencies: Vec<String>,
}

impl TaskSummary {
    fn from_descriptor(task: &TaskDescriptor, dependencies: &[String]) -> Self {
        Self {
            id: task.id.clone(),
            description: task.description.clone(),
            agent_type: task
                .agent_type
                .clone()
                .unwrap_or_else(|| "generic".to_string()),
            estimated_duration: task.duration_minutes(),
            dependencies: dependencies.to_vec(),
        }
    }
}

impl ExecutionPlan {
    /// Number of phases in the plan
    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Short human-readable description of the plan shape
    pub fn summary(&self) -> String {
        match (self.total_tasks, self.phases.len()) {
            (0, _) => "empty plan".to_string(),
            (1, _) => "1 task in 1 phase".to_string(),
            (t, 1) => format!("{} tasks in 1 phase", t),
            (t, p) => format!("{} tasks in {} phases", t, p),
        }
    }
}
