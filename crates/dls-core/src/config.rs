use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Driver tuning loaded from `~/.config/dls/config.toml`.
///
/// The defaults reproduce the service's stock pacing: 1% per half-second
/// tick, a few seconds per post-download phase, and a 76 GiB fallback size
/// when the source probe cannot determine one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Percent of `total_size` simulated per tick.
    pub step_percent: f64,
    /// Delay between downloading ticks, in milliseconds.
    pub tick_ms: u64,
    /// Simulated checksum calculation time.
    pub verify_delay_ms: u64,
    /// Pause between verification and the extraction phase.
    pub post_verify_delay_ms: u64,
    /// Simulated archive extraction time.
    pub extract_delay_ms: u64,
    /// Simulated installation time on the automatic path.
    pub install_delay_ms: u64,
    /// Simulated installation time when triggered via the install endpoint.
    pub finalize_delay_ms: u64,
    /// Fallback total size in bytes when the metadata probe fails.
    pub default_total_size: i64,
    /// Default bound for list queries.
    pub list_limit: i64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            step_percent: 1.0,
            tick_ms: 500,
            verify_delay_ms: 3000,
            post_verify_delay_ms: 1000,
            extract_delay_ms: 4000,
            install_delay_ms: 2000,
            finalize_delay_ms: 5000,
            default_total_size: 81_604_378_624,
            list_limit: 100,
        }
    }
}

impl DriverConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }

    pub fn post_verify_delay(&self) -> Duration {
        Duration::from_millis(self.post_verify_delay_ms)
    }

    pub fn extract_delay(&self) -> Duration {
        Duration::from_millis(self.extract_delay_ms)
    }

    pub fn install_delay(&self) -> Duration {
        Duration::from_millis(self.install_delay_ms)
    }

    pub fn finalize_delay(&self) -> Duration {
        Duration::from_millis(self.finalize_delay_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dls")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DriverConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DriverConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DriverConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Deployment settings read from the environment.
///
/// `DLS_DB_PATH` plays the role of the store connection string (path of the
/// SQLite registry; unset means the XDG default), `DLS_BIND_ADDR` the listen
/// address, and `DLS_CORS_ORIGINS` the comma-separated allowed origins
/// (`*` for any).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: Option<PathBuf>,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("DLS_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
        let db_path = std::env::var("DLS_DB_PATH").ok().map(PathBuf::from);
        let cors_origins = std::env::var("DLS_CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec!["*".to_string()]);
        Self {
            bind_addr,
            db_path,
            cors_origins,
        }
    }

    /// True when any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Split a comma-separated origin list, dropping empty entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}
