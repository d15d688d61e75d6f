// Platform-neutral snapshot model shared by the collectors and the renderers

pub mod system_info;
pub mod units;
