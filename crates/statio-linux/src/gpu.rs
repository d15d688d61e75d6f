// GPU vendor ids from a bounded scan of <sys>/class/drm/card<N>

use std::path::Path;

use statio_platform::system_info::GpuInfo;

use crate::text::read_source;

/// Number of `card<N>` slots scanned when no limit is configured. This is a
/// fixed bound, not something read from the hardware; adapters above it
/// are not reported.
pub const DEFAULT_GPU_SCAN_SLOTS: usize = 8;

pub const NO_GPU_MESSAGE: &str = "No GPU details (platform-specific collector needed)";

/// Never empty: with no adapters found a single undetected placeholder is
/// returned.
pub fn collect_gpu_info(sys_root: &Path, slots: usize) -> Vec<GpuInfo> {
    let drm = sys_root.join("class").join("drm");

    let mut gpus: Vec<GpuInfo> = (0..slots)
        .filter_map(|index| {
            let vendor_path = drm.join(format!("card{}", index)).join("device/vendor");
            let content = read_source(&vendor_path).ok()?;
            let vendor = content.lines().next().unwrap_or("").trim();
            Some(GpuInfo {
                adapter: format!("card{} vendor={}", index, vendor),
                detected: true,
            })
        })
        .collect();

    if gpus.is_empty() {
        tracing::debug!("no drm adapters in {} slots", slots);
        gpus.push(GpuInfo {
            adapter: NO_GPU_MESSAGE.to_string(),
            detected: false,
        });
    }

    gpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn add_card(root: &Path, index: usize, vendor: &str) {
        let dir = root.join(format!("class/drm/card{}/device", index));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("vendor"), vendor).unwrap();
    }

    #[test]
    fn test_placeholder_when_nothing_found() {
        let dir = TempDir::new().unwrap();
        let gpus = collect_gpu_info(dir.path(), DEFAULT_GPU_SCAN_SLOTS);
        assert_eq!(gpus.len(), 1);
        assert!(!gpus[0].detected);
        assert_eq!(gpus[0].adapter, NO_GPU_MESSAGE);
    }

    #[test]
    fn test_adapters_in_discovery_order() {
        let dir = TempDir::new().unwrap();
        add_card(dir.path(), 3, " 0x1002\n");
        add_card(dir.path(), 0, "0x8086\n");

        let gpus = collect_gpu_info(dir.path(), DEFAULT_GPU_SCAN_SLOTS);
        assert_eq!(gpus.len(), 2);
        assert_eq!(gpus[0].adapter, "card0 vendor=0x8086");
        assert_eq!(gpus[1].adapter, "card3 vendor=0x1002");
        assert!(gpus.iter().all(|g| g.detected));
    }

    #[test]
    fn test_scan_stops_at_slot_limit() {
        let dir = TempDir::new().unwrap();
        add_card(dir.path(), 8, "0x10de\n");

        let gpus = collect_gpu_info(dir.path(), DEFAULT_GPU_SCAN_SLOTS);
        assert_eq!(gpus.len(), 1);
        assert!(!gpus[0].detected);

        let gpus = collect_gpu_info(dir.path(), 9);
        assert_eq!(gpus[0].adapter, "card8 vendor=0x10de");
    }

    #[test]
    fn test_empty_vendor_file_still_counts() {
        let dir = TempDir::new().unwrap();
        add_card(dir.path(), 1, "");
        let gpus = collect_gpu_info(dir.path(), DEFAULT_GPU_SCAN_SLOTS);
        assert_eq!(gpus[0].adapter, "card1 vendor=");
        assert!(gpus[0].detected);
    }
}
