use crate::plan::planner::ExecutionPlan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Thresholds for advisory analysis. These are reporting knobs, not engine
/// invariants; a plan is valid regardless of what gets flagged.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Flag tasks with more direct dependents than this
    pub bottleneck_dependents_threshold: usize,
    /// Flag critical paths longer than this many tasks
    pub critical_path_length_threshold: usize,
    /// Flag plans whose parallel efficiency falls below this percentage
    pub min_parallel_efficiency_pct: f64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            bottleneck_dependents_threshold: 3,
            critical_path_length_threshold: 5,
            min_parallel_efficiency_pct: 50.0,
        }
    }
}

/// A scheduling concern surfaced by reviewing a finished plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Advisory {
    /// Too few tasks run in multi-task phases
    LowParallelEfficiency { efficiency: f64 },
    /// The critical path is a long sequential chain
    LongCriticalPath { length: usize, path: Vec<String> },
    /// One task blocks many others
    Bottleneck {
        task_id: String,
        blocked_tasks: Vec<String>,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LowParallelEfficiency { efficiency } => {
                write!(f, "low parallel efficiency ({:.1}%)", efficiency)
            }
            Advisory::LongCriticalPath { length, .. } => {
                write!(f, "long critical path with {} sequential tasks", length)
            }
            Advisory::Bottleneck {
                task_id,
                blocked_tasks,
            } => {
                write!(
                    f,
                    "task {} is blocking {} other tasks",
                    task_id,
                    blocked_tasks.len()
                )
            }
        }
    }
}

/// Reviews finished plans against [`AdvisoryConfig`] thresholds.
///
/// Consumed by reporting collaborators; the scheduler itself never reads
/// advisories.
pub struct Advisor {
    config: AdvisoryConfig,
}

impl Advisor {
    /// Create an advisor with the given thresholds
    pub fn new(config: AdvisoryConfig) -> Self {
        Self { config }
    }

    /// Inspect a plan and return every advisory it triggers
    pub fn review(&self, plan: &ExecutionPlan) -> Vec<Advisory> {
        let mut advisories = Vec::new();

        if plan.parallel_efficiency < self.config.min_parallel_efficiency_pct {
            advisories.push(Advisory::LowParallelEfficiency {
                efficiency: plan.parallel_efficiency,
            });
        }

        if plan.critical_path.len() > self.config.critical_path_length_threshold {
            advisories.push(Advisory::LongCriticalPath {
                length: plan.critical_path.len(),
                path: plan.critical_path.clone(),
            });
        }

        // Rebuild the direct-dependent index from the phase summaries so a
        // plan alone is enough to review
        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
        for phase in &plan.phases {
            for task in &phase.tasks {
                for dep in &task.dependencies {
                    dependents.entry(dep.as_str()).or_default().push(&task.id);
                }
            }
        }

        for phase in &plan.phases {
            for task in &phase.tasks {
                if let Some(blocked) = dependents.get(task.id.as_str()) {
                    if blocked.len() > self.config.bottleneck_dependents_threshold {
                        advisories.push(Advisory::Bottleneck {
                            task_id: task.id.clone(),
                            blocked_tasks: blocked.iter().map(|s| s.to_string()).collect(),
                        });
                    }
                }
            }
        }

        advisories
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(AdvisoryConfig::default())
    }
}
