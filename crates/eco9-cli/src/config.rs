// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use eco9_core::{resolve_eco9_config_path, ConfigPathScope, Error, Result};
use eco9_impact::NegativeValuePolicy;
use eco9_store::{BackendKind, StoreConfig};
use serde::{Deserialize, Serialize};

pub const ENV_ECO9_STORE_BACKEND: &str = "ECO9_STORE_BACKEND";
pub const ENV_ECO9_SQLITE_PATH: &str = "ECO9_SQLITE_PATH";
pub const ENV_ECO9_MULTIPLIERS: &str = "ECO9_MULTIPLIERS";
pub const ENV_ECO9_NEGATIVE_VALUES: &str = "ECO9_NEGATIVE_VALUES";

const SQLITE_FILE_NAME: &str = "activities.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpactConfig {
    /// JSON or TOML multiplier table replacing the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multipliers: Option<PathBuf>,
    #[serde(default)]
    pub negative_values: NegativeValuePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub impact: ImpactConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Effective configuration plus the file it was read from, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path.display(), e))?;
        Self::from_toml_str(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Defaults, then the discovered TOML file, then process environment.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let lookup = |key: &str| std::env::var(key).ok();
        let source = discover_config_path(explicit, &lookup)?;
        let mut config = match source.as_deref() {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.fill_data_paths(&eco9_core::resolve_eco9_data_dir());
        tracing::debug!(source = ?source, backend = config.store.backend.as_str(), "configuration loaded");
        Ok(LoadedConfig { config, source })
    }

    /// Applies `ECO9_*` overrides. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(raw) = get(ENV_ECO9_STORE_BACKEND) {
            self.store.backend = raw
                .parse::<BackendKind>()
                .map_err(|e| Error::Config(format!("{ENV_ECO9_STORE_BACKEND}: {}", e.message)))?;
        }
        if let Some(raw) = get(ENV_ECO9_SQLITE_PATH) {
            self.store.sqlite_path = Some(PathBuf::from(raw));
        }
        if let Some(raw) = get(ENV_ECO9_MULTIPLIERS) {
            self.impact.multipliers = Some(PathBuf::from(raw));
        }
        if let Some(raw) = get(ENV_ECO9_NEGATIVE_VALUES) {
            self.impact.negative_values = raw
                .parse::<NegativeValuePolicy>()
                .map_err(|e| Error::Config(format!("{ENV_ECO9_NEGATIVE_VALUES}: {e}")))?;
        }
        if let Some(raw) = get(eco9_core::ENV_ECO9_LOG_LEVEL) {
            self.log.level = Some(raw);
        }
        if let Some(raw) = get(eco9_core::ENV_ECO9_LOG_JSON) {
            self.log.json = parse_bool(&raw).ok_or_else(|| {
                Error::Config(format!(
                    "{}: expected a boolean, got `{raw}`",
                    eco9_core::ENV_ECO9_LOG_JSON
                ))
            })?;
        }
        Ok(())
    }

    /// Points the SQLite backend at `data_dir` when no path was configured.
    pub fn fill_data_paths(&mut self, data_dir: &Path) {
        if self.store.backend == BackendKind::Sqlite && self.store.sqlite_path.is_none() {
            self.store.sqlite_path = Some(data_dir.join(SQLITE_FILE_NAME));
        }
    }
}

/// `explicit`, else `ECO9_CONFIG`, else the first existing of the workspace
/// and user config files. An explicitly named file must exist.
pub fn discover_config_path<F>(explicit: Option<&Path>, lookup: F) -> Result<Option<PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    let named = explicit.map(Path::to_path_buf).or_else(|| {
        lookup(eco9_core::ENV_ECO9_CONFIG)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });
    if let Some(path) = named {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path));
    }
    Ok([ConfigPathScope::Workspace, ConfigPathScope::User]
        .into_iter()
        .map(resolve_eco9_config_path)
        .find(|p| p.is_file()))
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
