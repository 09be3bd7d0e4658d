//! Unified path management for taskdeck files.
//!
//! ```text
//! ~/.config/taskdeck/          # Config directory (platform equivalent on macOS/Windows)
//! ├── config.toml              # Client configuration
//! └── session.json             # Stored session token
//! ```

use std::path::PathBuf;
use taskdeck_core::error::{Result, TaskdeckError};

const APP_DIR: &str = "taskdeck";

pub struct TaskdeckPaths;

impl TaskdeckPaths {
    /// Returns the taskdeck configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/taskdeck/`
    /// - `Err(TaskdeckError::Config)`: The platform has no config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| TaskdeckError::config("Cannot determine the user config directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the stored session token.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer credential and is written with mode 600 on Unix.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_app_dir() {
        if let (Ok(dir), Ok(config), Ok(session)) = (
            TaskdeckPaths::config_dir(),
            TaskdeckPaths::config_file(),
            TaskdeckPaths::session_file(),
        ) {
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(config.parent(), Some(dir.as_path()));
            assert_eq!(session.file_name().and_then(|n| n.to_str()), Some("session.json"));
        }
    }
}
