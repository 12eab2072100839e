//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;

/// Tracing filter used when neither `PLOTLYST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "plotlyst_engine=info";

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Workspace directory holding `project.plotlyst` and the novels
    pub workspace: PathBuf,
    /// Tracing filter directive
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let workspace = match lookup("PLOTLYST_WORKSPACE") {
            Some(path) if path.trim().is_empty() => {
                bail!("PLOTLYST_WORKSPACE is set but empty")
            }
            Some(path) => PathBuf::from(path),
            None => default_workspace().context("Could not determine a default workspace")?,
        };

        let log_filter = lookup("PLOTLYST_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            workspace,
            log_filter,
        })
    }

    pub fn with_workspace(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Platform data directory, e.g. `~/.local/share/plotlyst/workspace`.
fn default_workspace() -> Result<PathBuf> {
    if let Some(dirs) = ProjectDirs::from("", "", "plotlyst") {
        return Ok(dirs.data_dir().join("workspace"));
    }
    // Fallback to current directory if project dirs unavailable
    let cwd = env::current_dir().context("Current directory is not accessible")?;
    Ok(cwd.join("plotlyst-workspace"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn workspace_comes_from_environment() {
        let config =
            AppConfig::from_lookup(lookup(&[("PLOTLYST_WORKSPACE", "/data/novels")])).unwrap();
        assert_eq!(config.workspace, PathBuf::from("/data/novels"));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn log_filter_prefers_plotlyst_log() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PLOTLYST_WORKSPACE", "/w"),
            ("PLOTLYST_LOG", "plotlyst_engine=debug"),
            ("RUST_LOG", "warn"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "plotlyst_engine=debug");

        let config =
            AppConfig::from_lookup(lookup(&[("PLOTLYST_WORKSPACE", "/w"), ("RUST_LOG", "warn")]))
                .unwrap();
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn empty_workspace_is_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("PLOTLYST_WORKSPACE", "  ")])).is_err());
    }
}
