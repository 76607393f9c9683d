use crate::plan::graph::DependencyGraph;
use crate::plan::types::TaskDescriptor;
use std::collections::HashSet;
use tracing::{debug, info};

/// Transitive-reduction pass over a task list.
///
/// Drops every declared dependency that is already reachable through another
/// declared dependency of the same task. Redundant edges never change
/// levels, ordering, or the critical path, so the scheduler does not require
/// this pass — it exists to keep recorded dependency metadata minimal and
/// readable. The pass is idempotent and must be invoked explicitly.
///
/// No validation happens here; unknown or cyclic references are the
/// planner's job to reject.
pub struct DependencyOptimizer;

impl DependencyOptimizer {
    /// Return an equivalent task list with each task's dependency set
    /// reduced to its direct, non-redundant dependencies. Declaration order
    /// of the surviving dependencies is preserved.
    pub fn reduce(tasks: &[TaskDescriptor]) -> Vec<TaskDescriptor> {
        let mut graph = DependencyGraph::new();
        for task in tasks {
            graph.add_task(task.clone());
        }
        for task in tasks {
            for dep in &task.dependencies {
                graph.add_dependency(&task.id, dep);
            }
        }

        let mut optimized = Vec::with_capacity(tasks.len());
        let mut removed_total = 0usize;

        for task in tasks {
            let declared = graph.dependencies_of(&task.id);

            // Anything reachable through a declared dependency is redundant
            // as a direct edge
            let mut covered: HashSet<String> = HashSet::new();
            for dep in declared {
                covered.extend(graph.transitive_dependencies(dep));
            }

            let necessary: Vec<String> = declared
                .iter()
                .filter(|dep| !covered.contains(dep.as_str()))
                .cloned()
                .collect();

            if necessary.len() < declared.len() {
                debug!(
                    "task '{}': reduced {} declared dependencies to {}",
                    task.id,
                    declared.len(),
                    necessary.len()
                );
                removed_total += declared.len() - necessary.len();
            }

            let mut reduced = task.clone();
            reduced.dependencies = necessary;
            optimized.push(reduced);
        }

        if removed_total > 0 {
            info!("removed {} redundant dependency edges", removed_total);
        }

        optimized
    }
}
