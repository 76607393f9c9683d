use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Fallback duration (minutes) for tasks with a missing or unparseable estimate
pub const DEFAULT_DURATION_MINUTES: u32 = 5;

/// A unit of work supplied by the caller.
///
/// The engine interprets `id`, `dependencies`, `estimated_duration` and
/// `parallel_safe`; everything else (`description`, `agent_type`, `extra`)
/// is opaque and echoed back in the plan.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TaskDescriptor {
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Estimated duration in minutes. Accepts an integer or a string with a
    /// leading integer (e.g. `"15 min"`); anything else falls back to the
    /// default at query time.
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub estimated_duration: Option<u32>,
    /// Ids of tasks that must complete before this one starts
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// When false, the task must occupy its own execution phase
    #[serde(default = "default_parallel_safe")]
    pub parallel_safe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    /// Arbitrary caller metadata, passed through untouched
    #[serde(default, flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

fn default_parallel_safe() -> bool {
    true
}

impl TaskDescriptor {
    /// Create a task with no dependencies and default metadata
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            estimated_duration: None,
            dependencies: Vec::new(),
            parallel_safe: true,
            agent_type: None,
            extra: HashMap::new(),
        }
    }

    /// Set the declared dependencies
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Set the duration estimate in minutes
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }

    /// Set the agent type hint
    pub fn with_agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = Some(agent_type.into());
        self
    }

    /// Mark the task as unsafe to co-schedule with others
    pub fn exclusive(mut self) -> Self {
        self.parallel_safe = false;
        self
    }

    /// Duration estimate in minutes, applying the documented fallback
    pub fn duration_minutes(&self) -> u32 {
        self.estimated_duration.unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

/// Lenient duration parsing: integers pass through, strings contribute their
/// leading integer token, everything else becomes `None` so scheduling
/// degrades to the fallback instead of failing.
fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DurationVisitor;

    impl<'de> Visitor<'de> for DurationVisitor {
        type Value = Option<u32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a minute count or a string like \"15 min\"")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(u32::try_from(value).ok())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(u32::try_from(value).ok())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if value.is_finite() && value >= 0.0 && value <= u32::MAX as f64 {
                Ok(Some(value as u32))
            } else {
                Ok(None)
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value
                .split_whitespace()
                .next()
                .and_then(|token| token.parse::<u32>().ok()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, deserializer: D2) -> Result<Self::Value, D2::Error> {
            deserializer.deserialize_any(DurationVisitor)
        }
    }

    deserializer.deserialize_any(DurationVisitor)
}

/// Errors raised by the planning entry point
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The dependency relation contains a loop; no partial plan is produced
    #[error("cyclic dependency detected in task graph")]
    CyclicDependency,

    /// A task declares a dependency id absent from the supplied task list
    #[error("task '{task_id}' depends on unknown task '{dependency}'")]
    UnknownDependency { task_id: String, dependency: String },

    /// A task record is missing its required id
    #[error("task at position {index} has no id")]
    MalformedTask { index: usize },
}
