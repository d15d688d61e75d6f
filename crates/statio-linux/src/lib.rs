// Linux collectors over procfs, sysfs and a handful of system calls

#[cfg(target_os = "linux")]
pub mod error;

#[cfg(target_os = "linux")]
pub mod text;

#[cfg(target_os = "linux")]
pub mod cpu;

#[cfg(target_os = "linux")]
pub mod memory;

#[cfg(target_os = "linux")]
pub mod os;

#[cfg(target_os = "linux")]
pub mod disk;

#[cfg(target_os = "linux")]
pub mod network;

#[cfg(target_os = "linux")]
pub mod gpu;

#[cfg(target_os = "linux")]
pub mod system_info;
