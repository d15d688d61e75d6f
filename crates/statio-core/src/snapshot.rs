use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::debug;

use statio_platform::system_info::{SystemInfo, SystemSnapshot};

/// Snapshot plus the moment it was taken, for machine-readable output.
/// The text renderers never see these fields.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotEnvelope {
    /// Unix time in seconds
    pub collected_at: u64,
    pub uptime_seconds: Option<u64>,
    pub snapshot: SystemSnapshot,
}

/// Runs every collector once per call. Nothing is cached between calls.
pub struct SnapshotCollector {
    sys_info: Box<dyn SystemInfo>,
}

impl SnapshotCollector {
    pub fn new(sys_info: Box<dyn SystemInfo>) -> Self {
        Self { sys_info }
    }

    /// Collect a fresh snapshot. Collectors are independent and total, so the
    /// order below is irrelevant and no collector can abort the others.
    pub fn collect(&self) -> SystemSnapshot {
        let started = Instant::now();

        let snapshot = SystemSnapshot {
            cpu: self.sys_info.cpu_info(),
            memory: self.sys_info.memory_info(),
            os: self.sys_info.os_info(),
            disks: self.sys_info.disk_info(),
            network: self.sys_info.network_interfaces(),
            gpus: self.sys_info.gpu_info(),
        };

        debug!(
            "snapshot collected in {:?} (disks={}, interfaces={}, gpus={})",
            started.elapsed(),
            snapshot.disks.len(),
            snapshot.network.len(),
            snapshot.gpus.len(),
        );
        snapshot
    }

    pub fn collect_envelope(&self) -> SnapshotEnvelope {
        SnapshotEnvelope {
            collected_at: unix_now(),
            uptime_seconds: self.sys_info.uptime_seconds(),
            snapshot: self.collect(),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
