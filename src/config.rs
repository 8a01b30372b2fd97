//! Configuration management for ahkfmt.
//!
//! This module provides the [`Config`] struct which controls all formatting behavior.
//! Configuration can be loaded from:
//! - TOML files (`ahkfmt.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`; ahkfmt: --tab-width 2`)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::format::IndentOptions;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["ahkfmt.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_tab_width() -> usize {
    4
}
fn default_max_blank_lines() -> i32 {
    1
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for ahkfmt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Width of one indentation level in spaces (default: 4)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Indent with spaces rather than tabs (default: true)
    #[serde(default = "default_true")]
    pub use_spaces: bool,

    /// Maximum consecutive blank lines, -1 for unlimited (default: 1)
    #[serde(default = "default_max_blank_lines")]
    pub max_blank_lines: i32,

    /// Collapse runs of interior spaces (default: true)
    #[serde(default = "default_true")]
    pub trim_extra_spaces: bool,

    /// Re-indent lines (default: true)
    #[serde(default = "default_true")]
    pub impose_indent: bool,

    /// Keep the original leading whitespace of continuation lines (default: false)
    #[serde(default)]
    pub preserve_continuation_indent: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub tab_width: Option<usize>,
    pub use_spaces: Option<bool>,
    pub max_blank_lines: Option<i32>,
    pub trim_extra_spaces: Option<bool>,
    pub impose_indent: Option<bool>,
    pub preserve_continuation_indent: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tab_width: 4,
            use_spaces: true,
            max_blank_lines: 1,
            trim_extra_spaces: true,
            impose_indent: true,
            preserve_continuation_indent: false,
        }
    }
}

impl Config {
    /// Maximum reasonable tab width
    const MAX_TAB_WIDTH: usize = 16;
    /// Maximum blank-line limit
    const MAX_BLANK_LINES: i32 = 100;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.tab_width == 0 {
            return Some("tab_width must be at least 1".to_string());
        }
        if self.tab_width > Self::MAX_TAB_WIDTH {
            return Some(format!(
                "tab_width {} exceeds maximum of {}",
                self.tab_width,
                Self::MAX_TAB_WIDTH
            ));
        }
        if self.max_blank_lines < -1 {
            return Some(format!(
                "max_blank_lines {} is invalid (use -1 for unlimited)",
                self.max_blank_lines
            ));
        }
        if self.max_blank_lines > Self::MAX_BLANK_LINES {
            return Some(format!(
                "max_blank_lines {} exceeds maximum of {}",
                self.max_blank_lines,
                Self::MAX_BLANK_LINES
            ));
        }
        None
    }

    /// Indentation options for the reflow pass
    #[must_use]
    pub fn indent_options(&self) -> IndentOptions {
        IndentOptions {
            use_spaces: self.use_spaces,
            tab_width: self.tab_width,
            preserve_continuation_indent: self.preserve_continuation_indent,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = partial.use_spaces {
            self.use_spaces = v;
        }
        if let Some(v) = partial.max_blank_lines {
            self.max_blank_lines = v;
        }
        if let Some(v) = partial.trim_extra_spaces {
            self.trim_extra_spaces = v;
        }
        if let Some(v) = partial.impose_indent {
            self.impose_indent = v;
        }
        if let Some(v) = partial.preserve_continuation_indent {
            self.preserve_continuation_indent = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Returns the home directory config first, then ancestors from the root
    /// down to the file's directory (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Unreadable or malformed files are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => warn!(path = %path.display(), "failed to parse config: {e}"),
                },
                Err(e) => warn!(path = %path.display(), "failed to read config: {e}"),
            }
        }
        config
    }
}
