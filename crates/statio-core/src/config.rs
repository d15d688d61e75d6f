use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatioConfig {
    /// Watch-mode refresh period in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Number of drm `card<N>` slots scanned for GPUs
    #[serde(default = "default_gpu_scan_slots")]
    pub gpu_scan_slots: usize,

    /// Root of the procfs text sources
    #[serde(default = "default_proc_root")]
    pub proc_root: PathBuf,

    /// Root of the sysfs text sources
    #[serde(default = "default_sys_root")]
    pub sys_root: PathBuf,

    /// Directory holding os-release
    #[serde(default = "default_etc_root")]
    pub etc_root: PathBuf,
}

fn default_refresh_interval() -> u64 {
    5
}
fn default_gpu_scan_slots() -> usize {
    8
}
fn default_proc_root() -> PathBuf {
    PathBuf::from("/proc")
}
fn default_sys_root() -> PathBuf {
    PathBuf::from("/sys")
}
fn default_etc_root() -> PathBuf {
    PathBuf::from("/etc")
}

impl Default for StatioConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            gpu_scan_slots: default_gpu_scan_slots(),
            proc_root: default_proc_root(),
            sys_root: default_sys_root(),
            etc_root: default_etc_root(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl StatioConfig {
    /// Default config file path for this platform
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("org", "statio", "statio") {
            dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("statio-config.json")
        }
    }

    /// Load config from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config JSON in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to a file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh_interval_secs must be >= 1".to_string(),
            ));
        }
        if self.gpu_scan_slots == 0 {
            return Err(ConfigError::Validation(
                "gpu_scan_slots must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
