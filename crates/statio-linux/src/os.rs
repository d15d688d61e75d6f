// Kernel identity from uname(2), distribution from <etc>/os-release

use std::path::Path;

use nix::sys::utsname::uname;
use statio_platform::system_info::OsInfo;

use crate::error::{SourceError, SourceResult};
use crate::text::{read_source, unquote};

pub fn collect_os_info(etc_root: &Path) -> OsInfo {
    let mut info = OsInfo::default();

    match kernel_identity() {
        Ok((kernel, architecture, hostname)) => {
            info.kernel = kernel;
            info.architecture = architecture;
            info.hostname = hostname;
        }
        Err(e) => tracing::warn!("kernel identification unavailable: {}", e),
    }

    match read_source(&etc_root.join("os-release")) {
        Ok(content) => apply_os_release(&content, &mut info),
        Err(e) => tracing::debug!("no release descriptor: {}", e),
    }

    info
}

fn kernel_identity() -> SourceResult<(String, String, String)> {
    let uts = uname().map_err(|source| SourceError::Query {
        call: "uname",
        source,
    })?;

    Ok((
        uts.release().to_string_lossy().into_owned(),
        uts.machine().to_string_lossy().into_owned(),
        uts.nodename().to_string_lossy().into_owned(),
    ))
}

/// `PRETTY_NAME` and `VERSION_ID` from an os-release file. A repeated key
/// overwrites the earlier value.
pub fn apply_os_release(content: &str, info: &mut OsInfo) {
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value);

        match key {
            "PRETTY_NAME" => info.distro = value.to_string(),
            "VERSION_ID" => info.version = value.to_string(),
            _ => {}
        }
    }
}
