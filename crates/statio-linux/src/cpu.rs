// CPU model and clock from <proc>/cpuinfo, thread count from available parallelism

use std::path::Path;
use std::thread;

use statio_platform::system_info::CpuInfo;

use crate::text::{read_source, split_key_value};

pub fn collect_cpu_info(proc_root: &Path) -> CpuInfo {
    let logical_threads = thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(0);

    let mut info = match read_source(&proc_root.join("cpuinfo")) {
        Ok(content) => parse_cpuinfo(&content),
        Err(e) => {
            tracing::debug!("cpu model unavailable: {}", e);
            CpuInfo::default()
        }
    };
    info.logical_threads = logical_threads;
    info
}

/// First non-empty `model name` and first positive `cpu cores` /
/// `cpu MHz` win; later processors repeat the same keys. A zero reading
/// (offline or idle core) counts as unset.
pub fn parse_cpuinfo(content: &str) -> CpuInfo {
    let mut model: Option<String> = None;
    let mut physical_cores: Option<u32> = None;
    let mut current_mhz: Option<f64> = None;

    for line in content.lines() {
        let Some((key, value)) = split_key_value(line, ':') else {
            continue;
        };

        match key {
            "model name" if model.is_none() && !value.is_empty() => {
                model = Some(value.to_string());
            }
            "cpu cores" if physical_cores.is_none() => {
                physical_cores = value.parse().ok().filter(|&cores: &u32| cores > 0);
            }
            "cpu MHz" if current_mhz.is_none() => {
                current_mhz = value.parse().ok().filter(|&mhz: &f64| mhz > 0.0);
            }
            _ => {}
        }
    }

    CpuInfo {
        model: model.unwrap_or_default(),
        logical_threads: 0,
        physical_cores: physical_cores.unwrap_or(0),
        current_mhz: current_mhz.unwrap_or(0.0),
    }
}
