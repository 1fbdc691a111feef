//! Path management for cascade-cli
//!
//! ## Path Resolution Order
//!
//! 1. `CASCADE_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory via the `directories` crate
//!    (`~/.config/cascade-cli` on Linux, the equivalent elsewhere)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CascadeError;

/// Manages all paths used by cascade-cli
#[derive(Debug, Clone)]
pub struct CascadePaths {
    /// Base directory for all cascade-cli data
    base_dir: PathBuf,
}

impl CascadePaths {
    /// Create a new CascadePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CascadeError> {
        let base_dir = if let Ok(custom) = std::env::var("CASCADE_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "cascade-cli")
                .ok_or_else(|| {
                    CascadeError::Config("Could not determine a config directory".into())
                })?
                .config_dir()
                .to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create CascadePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the directory plan exports are written to
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), CascadeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CascadeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| CascadeError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CascadePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        std::env::set_var("CASCADE_CLI_DATA_DIR", custom_path);
        let paths = CascadePaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
        std::env::remove_var("CASCADE_CLI_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CascadePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.export_dir().exists());
    }
}
