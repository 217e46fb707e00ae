use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable holding the proxy base path/URL. Wins over the
/// config file when set and non-empty.
pub const PROXY_ENV: &str = "STACVIEW_PROXY";

/// Global configuration loaded from `~/.config/stacview/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Proxy base path/URL for resource fetches. Absent means the built-in
    /// default origin (`http://localhost:8000/`).
    #[serde(default)]
    pub proxy: Option<String>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("stacview")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ViewerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ViewerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ViewerConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Proxy value from the environment, with empty treated as absent.
pub fn proxy_from_env() -> Option<String> {
    std::env::var(PROXY_ENV).ok().filter(|v| !v.trim().is_empty())
}

/// Precedence for the configured proxy value: environment over config file,
/// whitespace-trimmed, empty treated as absent. Pure so the precedence is
/// testable without touching the process environment.
pub fn effective_proxy(env: Option<String>, file: Option<String>) -> Option<String> {
    let clean = |v: Option<String>| {
        v.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    };
    clean(env).or_else(|| clean(file))
}
