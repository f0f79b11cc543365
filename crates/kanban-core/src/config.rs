use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Board file used when nothing else is configured.
pub const DEFAULT_STORE_FILE: &str = "kanban_com_subtarefas.csv";

/// Environment variable overriding the board file path.
pub const STORE_ENV: &str = "KANBAN_STORE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    /// Absolute or root-relative board file after all overrides.
    pub store_path: PathBuf,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".kanban/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("kanban/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(project_root: &Path, cli_store: Option<&Path>) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_store = env::var_os(STORE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let store_path = resolve_store_path(
        project_root,
        cli_store,
        env_store.as_deref(),
        &project.store.path,
    );

    Ok(EffectiveConfig {
        project,
        user,
        store_path,
    })
}

/// Precedence: `--store` flag, then `KANBAN_STORE`, then project config.
/// Relative paths are taken from `project_root`.
fn resolve_store_path(
    project_root: &Path,
    cli_store: Option<&Path>,
    env_store: Option<&Path>,
    configured: &Path,
) -> PathBuf {
    let chosen = cli_store.or(env_store).unwrap_or(configured);
    if chosen.is_absolute() {
        chosen.to_path_buf()
    } else {
        project_root.join(chosen)
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

const fn default_lock_timeout_ms() -> u64 {
    2_000
}
