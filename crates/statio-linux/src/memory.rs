// RAM and swap from sysinfo(2), refined from <proc>/meminfo

use std::path::Path;

use nix::errno::Errno;
use statio_platform::system_info::MemoryInfo;
use statio_platform::units::{bytes_to_mb, kb_to_mb};

use crate::error::{SourceError, SourceResult};
use crate::text::read_source;

/// Counters as reported by sysinfo(2), each in units of `unit` bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawMemory {
    pub total: u64,
    pub free: u64,
    pub buffer: u64,
    pub swap_total: u64,
    pub swap_free: u64,
    pub unit: u64,
}

pub fn collect_memory_info(proc_root: &Path) -> MemoryInfo {
    let raw = match query_sysinfo() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("memory statistics unavailable: {}", e);
            return MemoryInfo::default();
        }
    };

    let mut info = memory_from_raw(&raw);

    match read_source(&proc_root.join("meminfo")) {
        Ok(content) => {
            if let Some(kb) = parse_mem_available(&content) {
                info.available_mb = kb_to_mb(kb);
            }
        }
        Err(e) => tracing::debug!("keeping free+buffer estimate: {}", e),
    }

    info
}

fn query_sysinfo() -> SourceResult<RawMemory> {
    // SAFETY: sysinfo only writes into the zeroed struct we own.
    let mut data: libc::sysinfo = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::sysinfo(&mut data) };
    if ret != 0 {
        return Err(SourceError::Query {
            call: "sysinfo",
            source: Errno::last(),
        });
    }

    Ok(RawMemory {
        total: data.totalram as u64,
        free: data.freeram as u64,
        buffer: data.bufferram as u64,
        swap_total: data.totalswap as u64,
        swap_free: data.freeswap as u64,
        unit: data.mem_unit as u64,
    })
}

/// Available memory starts as free + buffer; `MemAvailable` replaces it
/// when the kernel exports one.
pub fn memory_from_raw(raw: &RawMemory) -> MemoryInfo {
    let scaled = |count: u64| bytes_to_mb(count.saturating_mul(raw.unit));

    MemoryInfo {
        total_mb: scaled(raw.total),
        free_mb: scaled(raw.free),
        available_mb: scaled(raw.free.saturating_add(raw.buffer)),
        swap_total_mb: scaled(raw.swap_total),
        swap_free_mb: scaled(raw.swap_free),
    }
}

/// `MemAvailable:` in kB. Scanning stops at the first line that parses.
pub fn parse_mem_available(content: &str) -> Option<u64> {
    content
        .lines()
        .filter(|line| line.starts_with("MemAvailable:"))
        .find_map(|line| {
            line.split_whitespace()
                .find_map(|token| token.parse::<u64>().ok())
        })
}
