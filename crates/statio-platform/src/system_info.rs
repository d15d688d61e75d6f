use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub model: String,
    pub logical_threads: u32,
    pub physical_cores: u32,
    pub current_mhz: f64,
}

/// All fields are in MiB, derived from one byte-unit multiplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_mb: u64,
    pub free_mb: u64,
    pub available_mb: u64,
    pub swap_total_mb: u64,
    pub swap_free_mb: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
    pub distro: String,
    pub version: String,
    pub kernel: String,
    pub architecture: String,
    pub hostname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub mount_point: String,
    pub filesystem: String,
    pub total_gb: u64,
    pub free_gb: u64,
}

impl DiskInfo {
    /// Used capacity, clamped at zero when free exceeds total.
    pub fn used_gb(&self) -> u64 {
        self.total_gb.saturating_sub(self.free_gb)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub name: String,
    pub ipv4: String,
    pub mac: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl NetworkInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub adapter: String,
    pub detected: bool,
}

/// One point-in-time collection. Disks are sorted by mount point, network
/// interfaces by name, GPUs are kept in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub os: OsInfo,
    pub disks: Vec<DiskInfo>,
    pub network: Vec<NetworkInfo>,
    pub gpus: Vec<GpuInfo>,
}

/// The six independent collectors. Every method is total: degraded sources
/// yield defaulted fields, never an error.
pub trait SystemInfo: Send + Sync {
    fn cpu_info(&self) -> CpuInfo;
    fn memory_info(&self) -> MemoryInfo;
    fn os_info(&self) -> OsInfo;
    fn disk_info(&self) -> Vec<DiskInfo>;
    fn network_interfaces(&self) -> Vec<NetworkInfo>;
    fn gpu_info(&self) -> Vec<GpuInfo>;

    /// Seconds since boot, where the platform exposes it.
    fn uptime_seconds(&self) -> Option<u64> {
        None
    }
}
