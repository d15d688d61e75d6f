//! Text renderers over a [`SystemSnapshot`].
//!
//! Both renderers are pure: the same snapshot always produces the same
//! text. Anything time-dependent belongs to the caller.

use std::fmt;

use statio_platform::system_info::SystemSnapshot;

const NOT_AVAILABLE: &str = "N/A";

const REPORT_TITLE: &str = concat!(
    "Statio v",
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR"),
    " - Hardware/OS Diagnostic Report"
);

pub const AVAILABLE_RAM_FOOTNOTE: &str =
    "*Available RAM approximation uses free + buffer memory.";

/// Full sectioned report: OS, CPU, Memory, Disks, Network, GPU.
pub fn render_report(snapshot: &SystemSnapshot) -> String {
    Report(snapshot).to_string()
}

/// Compact overview with human-readable traffic counters.
pub fn render_summary(snapshot: &SystemSnapshot) -> String {
    Summary(snapshot).to_string()
}

pub struct Report<'a>(pub &'a SystemSnapshot);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;

        writeln!(f, "{}", REPORT_TITLE)?;
        writeln!(f, "==========================================")?;
        writeln!(f)?;

        writeln!(f, "[OS]")?;
        writeln!(f, "Distro: {}", or_na(&s.os.distro))?;
        writeln!(f, "Version: {}", or_na(&s.os.version))?;
        writeln!(f, "Kernel: {}", or_na(&s.os.kernel))?;
        writeln!(f, "Arch: {}", or_na(&s.os.architecture))?;
        writeln!(f, "Host: {}", or_na(&s.os.hostname))?;
        writeln!(f)?;

        writeln!(f, "[CPU]")?;
        writeln!(f, "Model: {}", or_na(&s.cpu.model))?;
        writeln!(f, "Physical cores: {}", s.cpu.physical_cores)?;
        writeln!(f, "Logical threads: {}", s.cpu.logical_threads)?;
        writeln!(f, "Current MHz: {:.2}", s.cpu.current_mhz)?;
        writeln!(f)?;

        writeln!(f, "[Memory]")?;
        writeln!(f, "Total RAM: {} MB", s.memory.total_mb)?;
        writeln!(f, "Free RAM: {} MB", s.memory.free_mb)?;
        writeln!(f, "Available RAM*: {} MB", s.memory.available_mb)?;
        writeln!(f, "Total Swap: {} MB", s.memory.swap_total_mb)?;
        writeln!(f, "Free Swap: {} MB", s.memory.swap_free_mb)?;
        writeln!(f)?;

        writeln!(f, "[Disks]")?;
        for d in &s.disks {
            writeln!(
                f,
                "{} ({}) total={}GB free={}GB",
                d.mount_point, d.filesystem, d.total_gb, d.free_gb
            )?;
        }
        if s.disks.is_empty() {
            writeln!(f, "No mounted disks detected")?;
        }
        writeln!(f)?;

        writeln!(f, "[Network]")?;
        for n in &s.network {
            writeln!(
                f,
                "{} ipv4={} mac={} rx={} tx={}",
                n.name,
                or_na(&n.ipv4),
                or_na(&n.mac),
                n.rx_bytes,
                n.tx_bytes
            )?;
        }
        if s.network.is_empty() {
            writeln!(f, "No network interfaces detected")?;
        }
        writeln!(f)?;

        writeln!(f, "[GPU]")?;
        for g in &s.gpus {
            writeln!(f, "{}", g.adapter)?;
        }
        if s.gpus.is_empty() {
            writeln!(f, "No GPUs detected")?;
        }

        writeln!(f)?;
        writeln!(f, "{}", AVAILABLE_RAM_FOOTNOTE)
    }
}

pub struct Summary<'a>(pub &'a SystemSnapshot);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;

        writeln!(f, "Statio Snapshot")?;
        writeln!(f, "===============")?;
        writeln!(f, "Host: {}", or_na(&s.os.hostname))?;
        writeln!(f, "OS: {}", or_na(&s.os.distro))?;
        writeln!(f, "Kernel: {}", or_na(&s.os.kernel))?;
        writeln!(f, "CPU: {}", or_na(&s.cpu.model))?;
        writeln!(
            f,
            "RAM: total={}MB free={}MB available={}MB swap={}/{}MB",
            s.memory.total_mb,
            s.memory.free_mb,
            s.memory.available_mb,
            s.memory.swap_free_mb,
            s.memory.swap_total_mb
        )?;
        writeln!(
            f,
            "Disks: {} | Network IFs: {} | GPUs: {}",
            s.disks.len(),
            s.network.len(),
            s.gpus.len()
        )?;

        if !s.disks.is_empty() {
            writeln!(f)?;
            writeln!(f, "Storage:")?;
            for d in &s.disks {
                writeln!(
                    f,
                    "- {}: {}/{} GB used",
                    d.mount_point,
                    d.used_gb(),
                    d.total_gb
                )?;
            }
        }

        if !s.network.is_empty() {
            writeln!(f)?;
            writeln!(f, "Traffic:")?;
            for n in &s.network {
                writeln!(
                    f,
                    "- {}: rx {} / tx {}",
                    n.name,
                    format_bytes(n.rx_bytes),
                    format_bytes(n.tx_bytes)
                )?;
            }
        }

        Ok(())
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let units = ["B", "KB", "MB", "GB", "TB"];
    let i = (bytes as f64).log(1024.0).floor() as usize;
    let i = i.min(units.len() - 1);
    let val = bytes as f64 / 1024f64.powi(i as i32);
    if i == 0 {
        format!("{} {}", val as u64, units[i])
    } else {
        format!("{:.1} {}", val, units[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statio_platform::system_info::{
        CpuInfo, DiskInfo, GpuInfo, MemoryInfo, NetworkInfo, OsInfo,
    };

    fn populated() -> SystemSnapshot {
        SystemSnapshot {
            cpu: CpuInfo {
                model: "AMD Ryzen 7 5800X".to_string(),
                logical_threads: 16,
                physical_cores: 8,
                current_mhz: 3792.5,
            },
            memory: MemoryInfo {
                total_mb: 32000,
                free_mb: 1000,
                available_mb: 20000,
                swap_total_mb: 2048,
                swap_free_mb: 2048,
            },
            os: OsInfo {
                distro: "Fedora Linux 40".to_string(),
                version: "40".to_string(),
                kernel: "6.8.5".to_string(),
                architecture: "x86_64".to_string(),
                hostname: "box".to_string(),
            },
            disks: vec![DiskInfo {
                mount_point: "/".to_string(),
                filesystem: "btrfs".to_string(),
                total_gb: 930,
                free_gb: 400,
            }],
            network: vec![NetworkInfo {
                name: "enp5s0".to_string(),
                ipv4: "192.168.0.5".to_string(),
                mac: String::new(),
                rx_bytes: 1536,
                tx_bytes: 10,
            }],
            gpus: vec![GpuInfo {
                adapter: "card0 vendor=0x1002".to_string(),
                detected: true,
            }],
        }
    }

    #[test]
    fn test_title_carries_major_minor_version() {
        let text = render_report(&SystemSnapshot::default());
        assert!(text.starts_with("Statio v0.1 - Hardware/OS Diagnostic Report\n"));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let text = render_report(&populated());
        let positions: Vec<usize> = ["[OS]", "[CPU]", "[Memory]", "[Disks]", "[Network]", "[GPU]"]
            .iter()
            .map(|h| text.find(h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with(&format!("\n{}\n", AVAILABLE_RAM_FOOTNOTE)));
    }

    #[test]
    fn test_populated_fields() {
        let text = render_report(&populated());
        assert!(text.contains("Model: AMD Ryzen 7 5800X\n"));
        assert!(text.contains("Physical cores: 8\n"));
        assert!(text.contains("Logical threads: 16\n"));
        assert!(text.contains("Current MHz: 3792.50\n"));
        assert!(text.contains("Available RAM*: 20000 MB\n"));
        assert!(text.contains("/ (btrfs) total=930GB free=400GB\n"));
        assert!(text.contains("enp5s0 ipv4=192.168.0.5 mac=N/A rx=1536 tx=10\n"));
        assert!(text.contains("card0 vendor=0x1002\n"));
    }

    #[test]
    fn test_empty_os_fields_render_na_once_each() {
        let text = render_report(&SystemSnapshot::default());
        for label in ["Distro", "Version", "Kernel", "Arch", "Host"] {
            let line = format!("{}: N/A\n", label);
            assert_eq!(text.matches(&line).count(), 1, "{}", label);
        }
        assert!(text.contains("Model: N/A\n"));
        assert!(text.contains("Current MHz: 0.00\n"));
    }

    #[test]
    fn test_empty_sequences_render_placeholders() {
        let text = render_report(&SystemSnapshot::default());
        assert!(text.contains("No mounted disks detected"));
        assert!(text.contains("No network interfaces detected"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let snapshot = populated();
        assert_eq!(render_report(&snapshot), render_report(&snapshot));
        assert_eq!(render_summary(&snapshot), render_summary(&snapshot));
    }

    #[test]
    fn test_summary() {
        let text = render_summary(&populated());
        assert!(text.contains("RAM: total=32000MB free=1000MB available=20000MB swap=2048/2048MB\n"));
        assert!(text.contains("Disks: 1 | Network IFs: 1 | GPUs: 1\n"));
        assert!(text.contains("- /: 530/930 GB used\n"));
        assert!(text.contains("- enp5s0: rx 1.5 KB / tx 10 B\n"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0 GB");
        assert_eq!(format_bytes(u64::MAX), "16777216.0 TB");
    }
}
