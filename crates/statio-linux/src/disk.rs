//! Disk inventory from the live mount table.
//!
//! The mount table is a dump of everything the kernel has mounted; this
//! module narrows it to disk-backed, user-relevant mounts. Pseudo
//! filesystems, duplicates, virtual sources, bind mounts, hidden paths and
//! deep paths are pre-filtered, then the allow-list decides. Capacity comes
//! from statvfs(3) on each surviving mount point.

use std::collections::HashSet;
use std::path::Path;

use nix::sys::statvfs::statvfs;
use statio_platform::system_info::DiskInfo;
use statio_platform::units::bytes_to_gb;

use crate::error::{SourceError, SourceResult};
use crate::text::read_source;

/// Kernel and virtual filesystems that carry no persistent storage.
pub const PSEUDO_FILESYSTEMS: &[&str] = &[
    "proc",
    "sysfs",
    "tmpfs",
    "devtmpfs",
    "cgroup",
    "cgroup2",
    "overlay",
    "squashfs",
    "devpts",
    "securityfs",
    "pstore",
    "mqueue",
    "tracefs",
    "fusectl",
];

/// Conventional top-level mount points worth reporting.
pub const ALLOWED_MOUNT_POINTS: &[&str] = &[
    "/", "/home", "/boot", "/boot/efi", "/var", "/opt", "/mnt", "/media", "/srv",
];

const BOOT_EFI: &str = "/boot/efi";
const DEVICE_PREFIX: &str = "/dev/";
const BIND_MARKER: &str = "bind";
const MAX_MOUNT_DEPTH: usize = 2;

/// statvfs(3) fields needed for capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsCapacity {
    pub block_size: u64,
    pub blocks: u64,
    pub blocks_available: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MountEntry<'a> {
    source: &'a str,
    mount_point: &'a str,
    fs_type: &'a str,
    options: &'a str,
}

impl<'a> MountEntry<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        Some(Self {
            source: fields.next()?,
            mount_point: fields.next()?,
            fs_type: fields.next()?,
            options: fields.next()?,
        })
    }
}

pub fn collect_disk_info(proc_root: &Path) -> Vec<DiskInfo> {
    match read_source(&proc_root.join("mounts")) {
        Ok(content) => parse_mounts(&content, stat_mount),
        Err(e) => {
            tracing::debug!("mount table unavailable: {}", e);
            Vec::new()
        }
    }
}

fn stat_mount(mount_point: &str) -> SourceResult<FsCapacity> {
    let stat = statvfs(mount_point).map_err(|source| SourceError::Query {
        call: "statvfs",
        source,
    })?;

    Ok(FsCapacity {
        block_size: stat.fragment_size() as u64,
        blocks: stat.blocks() as u64,
        blocks_available: stat.blocks_available() as u64,
    })
}

/// Filter `content` (mount table format) down to reportable disks, sorted
/// by mount point. `stat` is queried only for entries that pass every
/// filter; an entry whose stat fails is dropped and its mount point stays
/// eligible for a later line.
pub fn parse_mounts<F>(content: &str, mut stat: F) -> Vec<DiskInfo>
where
    F: FnMut(&str) -> SourceResult<FsCapacity>,
{
    let mut disks = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for line in content.lines() {
        let Some(entry) = MountEntry::parse(line) else {
            continue;
        };

        if let Some(reason) = skip_reason(&entry, &seen) {
            tracing::trace!("skipping mount {}: {}", entry.mount_point, reason);
            continue;
        }

        let capacity = match stat(entry.mount_point) {
            Ok(capacity) => capacity,
            Err(e) => {
                tracing::debug!("skipping mount {}: {}", entry.mount_point, e);
                continue;
            }
        };

        seen.insert(entry.mount_point);
        disks.push(DiskInfo {
            mount_point: entry.mount_point.to_string(),
            filesystem: entry.fs_type.to_string(),
            total_gb: bytes_to_gb(capacity.blocks.saturating_mul(capacity.block_size)),
            free_gb: bytes_to_gb(capacity.blocks_available.saturating_mul(capacity.block_size)),
        });
    }

    disks.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
    disks
}

fn skip_reason(entry: &MountEntry<'_>, seen: &HashSet<&str>) -> Option<&'static str> {
    if PSEUDO_FILESYSTEMS.contains(&entry.fs_type) {
        return Some("pseudo filesystem");
    }
    if seen.contains(entry.mount_point) {
        return Some("duplicate mount point");
    }
    if !entry.source.starts_with(DEVICE_PREFIX) {
        return Some("not a device");
    }
    if entry.options.contains(BIND_MARKER) {
        return Some("bind mount");
    }
    if entry.mount_point.contains("/.") {
        return Some("hidden path");
    }
    if mount_depth(entry.mount_point) > MAX_MOUNT_DEPTH && entry.mount_point != BOOT_EFI {
        return Some("too deep");
    }
    if !ALLOWED_MOUNT_POINTS.contains(&entry.mount_point) {
        return Some("not in allow-list");
    }
    None
}

/// Number of path segments below `/`.
fn mount_depth(mount_point: &str) -> usize {
    if mount_point == "/" {
        0
    } else {
        mount_point.matches('/').count()
    }
}
