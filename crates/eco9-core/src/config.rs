use std::path::PathBuf;

use crate::errors::ConfigPathScope;

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Directory holding the SQLite activity store and other local data.
#[must_use]
pub fn resolve_eco9_data_dir() -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_ECO9_DATA_DIR) {
        return PathBuf::from(explicit);
    }
    if let Some(xdg_data_home) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("eco9");
    }
    if let Some(home) = non_empty_env("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("eco9");
    }
    PathBuf::from(".eco9").join("data")
}

#[must_use]
pub fn resolve_eco9_config_path(scope: ConfigPathScope) -> PathBuf {
    match scope {
        ConfigPathScope::User => {
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg_config_home)
                    .join("eco9")
                    .join("config.toml");
            }
            if let Some(home) = non_empty_env("HOME") {
                return PathBuf::from(home)
                    .join(".config")
                    .join("eco9")
                    .join("config.toml");
            }
            PathBuf::from(".eco9").join("config.toml")
        }
        ConfigPathScope::Workspace => PathBuf::from(".eco9").join("config.toml"),
    }
}
