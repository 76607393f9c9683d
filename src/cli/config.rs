//! Configuration discovery and loading
//!
//! This module handles the configuration discovery hierarchy:
//! 1. Current directory: ./taskweave.toml or ./.taskweave/config.toml
//! 2. User config: ~/.taskweave/config.toml
//! 3. System config: /etc/taskweave/config.toml
//! 4. Built-in defaults

use crate::env;
use crate::plan::{AdvisoryConfig, PlannerConfig};
use serde::{Deserialize, Serialize};
use std::env as std_env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskweaveConfig {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

impl TaskweaveConfig {
    /// Load from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: TaskweaveConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Configuration discovery system
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover and load configuration using the hierarchy
    pub fn discover_config() -> Result<TaskweaveConfig, Box<dyn std::error::Error>> {
        if let Some(config_path) = Self::find_config_file() {
            info!("Loading configuration from: {:?}", config_path);
            return TaskweaveConfig::from_toml_file(config_path);
        }

        info!("No configuration file found, using defaults");
        Ok(TaskweaveConfig::default())
    }

    /// Find a configuration file using the discovery hierarchy
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = Self::get_config_candidates();

        for candidate in candidates {
            debug!("Checking for config file: {:?}", candidate);
            if candidate.exists() && candidate.is_file() {
                debug!("Found config file: {:?}", candidate);
                return Some(candidate);
            }
        }

        debug!("No config file found in discovery hierarchy");
        None
    }

    /// List configuration file candidates in priority order
    fn get_config_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // 1. Current directory: ./taskweave.toml and ./.taskweave/config.toml
        if let Ok(current_dir) = std_env::current_dir() {
            candidates.push(current_dir.join(env::LOCAL_CONFIG_FILE_NAME));
            candidates.push(env::local_config_file_path(&current_dir));
        }

        // 2. User config: ~/.taskweave/config.toml
        if let Some(home_dir) = Self::get_home_dir() {
            candidates.push(env::user_config_file_path(&home_dir));
        }

        // 3. System config
        #[cfg(unix)]
        candidates.push(PathBuf::from("/etc/taskweave/config.toml"));

        #[cfg(windows)]
        candidates.push(PathBuf::from("C:\\ProgramData\\taskweave\\config.toml"));

        candidates
    }

    fn get_home_dir() -> Option<PathBuf> {
        let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
        std_env::var(var).ok().map(PathBuf::from)
    }

    /// Print the discovery hierarchy and which candidates exist
    pub fn show_discovery_info() {
        println!("Configuration discovery hierarchy:");
        for (i, candidate) in Self::get_config_candidates().iter().enumerate() {
            let marker = if candidate.exists() && candidate.is_file() {
                "found"
            } else {
                "missing"
            };
            println!("  {}. {:?} ({})", i + 1, candidate, marker);
        }

        match Self::find_config_file() {
            Some(path) => println!("\nActive configuration: {:?}", path),
            None => println!("\nActive configuration: built-in defaults"),
        }
    }
}
