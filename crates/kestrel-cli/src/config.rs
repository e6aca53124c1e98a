//! CLI configuration via environment variables
//!
//! Kestrel uses environment variables for optional configuration.
//! This keeps the CLI simple while allowing customization.

use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Disable colored output (KESTREL_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Custom history file path (KESTREL_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable history by default (KESTREL_NO_HISTORY=1)
    pub no_history: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            no_color: env::var("KESTREL_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
            history_file: env::var("KESTREL_HISTORY_FILE").ok().map(PathBuf::from),
            no_history: env::var("KESTREL_NO_HISTORY").is_ok(),
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. KESTREL_HISTORY_FILE if set
    /// 2. ~/.kestrel/history if home directory exists
    /// 3. None otherwise
    pub fn get_history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        dirs::home_dir().map(|home| home.join(".kestrel").join("history"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
