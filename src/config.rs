use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.dsgvo-scanner/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Network and check tuning.
    #[serde(default)]
    pub scan: ScanSettings,
}

/// Knobs for the network side of a scan.
///
/// Penalties, keyword lists and risk thresholds are fixed and not configurable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Bound on each page fetch and on each TLS connection, in seconds.
    pub timeout_secs: u64,
    /// Port probed by the certificate check.
    pub tls_port: u16,
    /// `User-Agent` header sent with page fetches.
    pub user_agent: String,
    /// Certificates expiring within this many days trigger a renewal recommendation.
    pub expiry_warning_days: i64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        ScanSettings {
            timeout_secs: 10,
            tls_port: 443,
            user_agent: format!("dsgvo-scanner/{}", env!("CARGO_PKG_VERSION")),
            expiry_warning_days: 30,
        }
    }
}

impl ScanSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.dsgvo-scanner/config.toml`
/// 3. `~/.config/dsgvo-scanner/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = working_dir.join(".dsgvo-scanner").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("dsgvo-scanner")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
