//! Task list loading and plan output
//!
//! This module handles the file formats the CLI understands:
//! - Task lists: JSON (a bare array or `{"tasks": [...]}`) or TOML
//!   (`[[tasks]]` tables), selected by file extension
//! - Plan / task-list output: JSON or TOML by extension of the target path

use crate::plan::{ExecutionPlan, TaskDescriptor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("file '{path}' not found")]
    NotFound { path: PathBuf },

    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported format '{extension}' for '{path}' (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to parse '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("failed to serialize: {reason}")]
    Serialize { reason: String },
}

/// Task list in document form, shared by JSON `{"tasks": [...]}` and TOML
/// `[[tasks]]` representations
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListDocument {
    pub tasks: Vec<TaskDescriptor>,
}

/// Loads task lists from disk
pub struct TaskListLoader;

impl TaskListLoader {
    /// Load a task list, picking the parser by file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<TaskDescriptor>, InputError> {
        let path = path.as_ref().to_path_buf();
        debug!("loading task list from {:?}", path);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(InputError::NotFound { path });
            }
            Err(e) => return Err(InputError::Io { path, source: e }),
        };

        match extension_of(&path).as_str() {
            "json" => Self::parse_json(&path, &content),
            "toml" => Self::parse_toml(&path, &content),
            extension => Err(InputError::UnsupportedFormat {
                path,
                extension: extension.to_string(),
            }),
        }
    }

    fn parse_json(path: &Path, content: &str) -> Result<Vec<TaskDescriptor>, InputError> {
        // A bare array is accepted alongside the document form
        if let Ok(tasks) = serde_json::from_str::<Vec<TaskDescriptor>>(content) {
            debug!("parsed {} tasks from bare JSON array", tasks.len());
            return Ok(tasks);
        }

        serde_json::from_str::<TaskListDocument>(content)
            .map(|document| document.tasks)
            .map_err(|e| InputError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    fn parse_toml(path: &Path, content: &str) -> Result<Vec<TaskDescriptor>, InputError> {
        toml::from_str::<TaskListDocument>(content)
            .map(|document| document.tasks)
            .map_err(|e| InputError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

/// Write an execution plan to `path`, picking JSON or TOML by extension
pub fn write_plan_file(path: &Path, plan: &ExecutionPlan, pretty: bool) -> Result<(), InputError> {
    let content = serialize_by_extension(path, plan, pretty)?;
    fs::write(path, content).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a task list to `path` in document form, format by extension
pub fn write_task_list_file(
    path: &Path,
    tasks: &[TaskDescriptor],
    pretty: bool,
) -> Result<(), InputError> {
    let document = TaskListDocument {
        tasks: tasks.to_vec(),
    };
    let content = serialize_by_extension(path, &document, pretty)?;
    fs::write(path, content).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize a value as JSON for stdout
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, InputError> {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.map_err(|e| InputError::Serialize {
        reason: e.to_string(),
    })
}

fn serialize_by_extension<T: Serialize>(
    path: &Path,
    value: &T,
    pretty: bool,
) -> Result<String, InputError> {
    match extension_of(path).as_str() {
        "json" => render_json(value, pretty),
        "toml" => toml::to_string_pretty(value).map_err(|e| InputError::Serialize {
            reason: e.to_string(),
        }),
        extension => Err(InputError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: extension.to_string(),
        }),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}
