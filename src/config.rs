use crate::platform::{self, Platform};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://downloads.rclone.org/";
pub const DEFAULT_DEST_DIR: &str = "./binaries";
pub const USER_AGENT: &str = concat!("rclone-fetch/", env!("CARGO_PKG_VERSION"));

/// Settings for one fetch run. Nothing is persisted between runs.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub dest_dir: PathBuf,
    pub os: Option<String>,
    pub arch: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            os: None,
            arch: None,
        }
    }
}

impl FetchConfig {
    /// Detected host platform, with either half replaced by an override.
    pub fn platform(&self) -> Platform {
        let os = self
            .os
            .as_deref()
            .map_or_else(platform::get_os_name, str::to_lowercase);
        let arch = self
            .arch
            .clone()
            .unwrap_or_else(|| platform::get_cpu_arch(&os));
        Platform::new(os, arch)
    }
}
