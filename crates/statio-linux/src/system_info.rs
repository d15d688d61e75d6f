use std::path::{Path, PathBuf};

use statio_platform::system_info::{
    CpuInfo, DiskInfo, GpuInfo, MemoryInfo, NetworkInfo, OsInfo, SystemInfo,
};

use crate::cpu::collect_cpu_info;
use crate::disk::collect_disk_info;
use crate::gpu::{collect_gpu_info, DEFAULT_GPU_SCAN_SLOTS};
use crate::memory::collect_memory_info;
use crate::network::collect_network_info;
use crate::os::collect_os_info;
use crate::text::read_source;

/// Where the text sources live. System calls (sysinfo, uname, statvfs,
/// getifaddrs) always query the running kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoots {
    pub proc: PathBuf,
    pub sys: PathBuf,
    pub etc: PathBuf,
}

impl Default for SourceRoots {
    fn default() -> Self {
        Self {
            proc: PathBuf::from("/proc"),
            sys: PathBuf::from("/sys"),
            etc: PathBuf::from("/etc"),
        }
    }
}

pub struct LinuxSystemInfo {
    roots: SourceRoots,
    gpu_scan_slots: usize,
}

impl LinuxSystemInfo {
    pub fn new() -> Self {
        Self::with_roots(SourceRoots::default())
    }

    pub fn with_roots(roots: SourceRoots) -> Self {
        Self {
            roots,
            gpu_scan_slots: DEFAULT_GPU_SCAN_SLOTS,
        }
    }

    pub fn gpu_scan_slots(mut self, slots: usize) -> Self {
        self.gpu_scan_slots = slots;
        self
    }
}

impl Default for LinuxSystemInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemInfo for LinuxSystemInfo {
    fn cpu_info(&self) -> CpuInfo {
        collect_cpu_info(&self.roots.proc)
    }

    fn memory_info(&self) -> MemoryInfo {
        collect_memory_info(&self.roots.proc)
    }

    fn os_info(&self) -> OsInfo {
        collect_os_info(&self.roots.etc)
    }

    fn disk_info(&self) -> Vec<DiskInfo> {
        collect_disk_info(&self.roots.proc)
    }

    fn network_interfaces(&self) -> Vec<NetworkInfo> {
        collect_network_info(&self.roots.sys)
    }

    fn gpu_info(&self) -> Vec<GpuInfo> {
        collect_gpu_info(&self.roots.sys, self.gpu_scan_slots)
    }

    fn uptime_seconds(&self) -> Option<u64> {
        read_uptime_seconds(&self.roots.proc)
    }
}

fn read_uptime_seconds(proc_root: &Path) -> Option<u64> {
    let content = read_source(&proc_root.join("uptime")).ok()?;
    let secs: f64 = content.split_whitespace().next()?.parse().ok()?;
    Some(secs as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn empty_roots(dir: &TempDir) -> SourceRoots {
        SourceRoots {
            proc: dir.path().join("proc"),
            sys: dir.path().join("sys"),
            etc: dir.path().join("etc"),
        }
    }

    #[test]
    fn test_every_collector_is_total_on_empty_tree() {
        let dir = TempDir::new().unwrap();
        let info = LinuxSystemInfo::with_roots(empty_roots(&dir));

        let cpu = info.cpu_info();
        assert!(cpu.model.is_empty());
        assert_eq!(cpu.physical_cores, 0);

        let os = info.os_info();
        assert!(os.distro.is_empty());
        assert!(os.version.is_empty());

        assert!(info.disk_info().is_empty());

        for net in info.network_interfaces() {
            assert!(net.mac.is_empty());
            assert_eq!(net.rx_bytes, 0);
            assert_eq!(net.tx_bytes, 0);
        }

        let gpus = info.gpu_info();
        assert_eq!(gpus.len(), 1);
        assert!(!gpus[0].detected);

        let _ = info.memory_info();
        assert_eq!(info.uptime_seconds(), None);
    }

    #[test]
    fn test_uptime_truncates_fraction() {
        let dir = TempDir::new().unwrap();
        let roots = empty_roots(&dir);
        fs::create_dir_all(&roots.proc).unwrap();
        fs::write(roots.proc.join("uptime"), "12345.67 54321.00\n").unwrap();

        let info = LinuxSystemInfo::with_roots(roots);
        assert_eq!(info.uptime_seconds(), Some(12345));
    }

    #[test]
    fn test_gpu_scan_slots_is_configurable() {
        let dir = TempDir::new().unwrap();
        let roots = empty_roots(&dir);
        let card = roots.sys.join("class/drm/card2/device");
        fs::create_dir_all(&card).unwrap();
        fs::write(card.join("vendor"), "0x8086\n").unwrap();

        let narrow = LinuxSystemInfo::with_roots(roots.clone()).gpu_scan_slots(2);
        assert!(!narrow.gpu_info()[0].detected);

        let wide = LinuxSystemInfo::with_roots(roots).gpu_scan_slots(3);
        assert!(wide.gpu_info()[0].detected);
    }
}
