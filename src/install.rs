use crate::archive;
use crate::config::FetchConfig;
use crate::download::Downloader;
use crate::error::Result;
use crate::fs;
use crate::platform::Platform;
use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of a successful install.
#[derive(Debug, Clone)]
pub struct Installed {
    pub url: String,
    pub path: PathBuf,
}

pub struct Installer {
    config: FetchConfig,
    platform: Platform,
    downloader: Downloader,
}

impl Installer {
    pub fn new(config: FetchConfig, downloader: Downloader) -> Self {
        let platform = config.platform();
        Self {
            config,
            platform,
            downloader,
        }
    }

    pub fn resolve_url(&self) -> Result<String> {
        let url = self.platform.download_url(&self.config.base_url)?;
        debug!(platform = %self.platform, %url, "resolved download url");
        Ok(url)
    }

    pub async fn install(&self) -> Result<Installed> {
        let url = self.resolve_url()?;
        println!("Downloading from: {url}");

        let path = self.download_and_extract(&url).await?;
        Ok(Installed { url, path })
    }

    /// Fetches the archive at `url` and leaves the executable in the destination directory.
    pub async fn download_and_extract(&self, url: &str) -> Result<PathBuf> {
        fs::ensure_dir_exists(&self.config.dest_dir)?;

        let binary_name = self.platform.binary_name();
        let local_path = self.config.dest_dir.join(binary_name);

        let bytes = self.downloader.fetch_bytes(url).await?;
        archive::extract_binary(&bytes, binary_name, &local_path)?;

        if !self.platform.is_windows() {
            fs::make_executable(&local_path)?;
        }

        info!(path = %local_path.display(), "extracted binary");
        Ok(local_path)
    }
}
