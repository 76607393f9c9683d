//! Environment constants and path utilities for taskweave.
//!
//! This module centralizes the hardcoded paths and directory names used
//! throughout the application, making them easier to maintain and modify.

/// Main application directory name (hidden directory like .git, .vscode)
pub const TASKWEAVE_DIR_NAME: &str = ".taskweave";

/// Configuration file name inside the application directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Plain configuration file name checked in the working directory
pub const LOCAL_CONFIG_FILE_NAME: &str = "taskweave.toml";

use std::path::{Path, PathBuf};

/// Build the .taskweave directory path from a root directory
pub fn taskweave_dir_path(root: &Path) -> PathBuf {
    root.join(TASKWEAVE_DIR_NAME)
}

/// Build the config file path inside a directory's .taskweave folder
pub fn local_config_file_path(current_dir: &Path) -> PathBuf {
    taskweave_dir_path(current_dir).join(CONFIG_FILE_NAME)
}

/// Build the config directory path in the user's home directory
pub fn user_config_dir_path(home_dir: &Path) -> PathBuf {
    home_dir.join(TASKWEAVE_DIR_NAME)
}

/// Build the config file path in the user's home directory
pub fn user_config_file_path(home_dir: &Path) -> PathBuf {
    user_config_dir_path(home_dir).join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_path_construction() {
        let root = Path::new("/test/workspace");

        assert_eq!(
            taskweave_dir_path(root),
            Path::new("/test/workspace/.taskweave")
        );

        assert_eq!(
            local_config_file_path(root),
            Path::new("/test/workspace/.taskweave/config.toml")
        );
    }

    #[test]
    fn test_config_paths() {
        let home_dir = Path::new("/home/user");

        assert_eq!(
            user_config_file_path(home_dir),
            Path::new("/home/user/.taskweave/config.toml")
        );
    }
}
