use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::ui::theme::ColorChoice;
use crate::walker::OnError;

/// Project config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".dirtree.toml";

// ---------------------------------------------------------------------------
// Project config (.dirtree.toml)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    pub display: Option<DisplayConfig>,
    pub traversal: Option<TraversalConfig>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// "auto", "always" or "never". Default: "auto".
    pub color: Option<ColorChoice>,
}

#[derive(Debug, Deserialize)]
pub struct TraversalConfig {
    /// Treat links to directories as directories. Default: true.
    pub follow_links: Option<bool>,
    /// "abort" or "skip" when a directory cannot be listed. Default: "abort".
    pub on_error: Option<OnError>,
}

/// Effective settings after defaults, config file and CLI flags are layered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub color: ColorChoice,
    pub follow_links: bool,
    pub on_error: OnError,
}

impl ProjectConfig {
    pub fn color(&self) -> ColorChoice {
        self.display
            .as_ref()
            .and_then(|d| d.color)
            .unwrap_or_default()
    }

    pub fn follow_links(&self) -> bool {
        self.traversal
            .as_ref()
            .and_then(|t| t.follow_links)
            .unwrap_or(true)
    }

    pub fn on_error(&self) -> OnError {
        self.traversal
            .as_ref()
            .and_then(|t| t.on_error)
            .unwrap_or_default()
    }

    pub fn settings(&self) -> Settings {
        Settings {
            color: self.color(),
            follow_links: self.follow_links(),
            on_error: self.on_error(),
        }
    }
}

/// Load `.dirtree.toml` from the given directory.
/// Returns default config if the file doesn't exist or can't be parsed.
pub fn load_project_config(cwd: &Path) -> ProjectConfig {
    let path = cwd.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return ProjectConfig::default();
    }
    match load_config_file(&path) {
        Ok(config) => {
            debug!(path = %path.display(), "loaded project config");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %format!("{err:#}"), "ignoring project config");
            ProjectConfig::default()
        }
    }
}

/// Load a config file the user named explicitly; any failure is an error.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config '{}'", path.display()))
}
