use crate::config::USER_AGENT;
use crate::error::{FetchError, Result};
use crate::fs;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {bytes} {msg}";

/// Upper bound on how much of an advertised `Content-Length` is reserved up front.
const MAX_PREALLOC: u64 = 64 * 1024 * 1024;

pub struct Downloader {
    client: reqwest::Client,
    show_progress: bool,
}

impl Downloader {
    pub fn new(show_progress: bool) -> Self {
        Self {
            client: reqwest::Client::new(),
            show_progress,
        }
    }

    /// Streams the response body into memory.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        let total_size = response.content_length();
        let pb = self.progress_bar(total_size, "")?;

        let mut buffer = Vec::with_capacity(prealloc_hint(total_size));
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.extend_from_slice(&chunk);
            pb.inc(chunk.len() as u64);
        }
        pb.finish_and_clear();

        info!(url, bytes = buffer.len(), "fetched archive");
        Ok(buffer)
    }

    /// Streams `url` to `dest_folder/<last URL segment>` and returns that path.
    pub async fn download_file(&self, url: &str, dest_folder: &Path) -> Result<PathBuf> {
        let file_name = file_name_from_url(url).ok_or_else(|| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;
        fs::ensure_dir_exists(dest_folder)?;
        let local_path = dest_folder.join(file_name);

        let response = self.get(url).await?;
        let pb = self.progress_bar(response.content_length(), &local_path.display().to_string())?;

        let downloaded = match write_body(response, &local_path, &pb).await {
            Ok(downloaded) => downloaded,
            Err(e) => {
                pb.abandon();
                // a partial file must not look like a finished download
                match tokio::fs::remove_file(&local_path).await {
                    Err(remove_err) if remove_err.kind() != std::io::ErrorKind::NotFound => {
                        warn!(
                            path = %local_path.display(),
                            error = %remove_err,
                            "could not remove partial download"
                        );
                    }
                    _ => {}
                }
                return Err(e);
            }
        };
        pb.finish();

        info!(url, path = %local_path.display(), bytes = downloaded, "download completed");
        Ok(local_path)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url, "sending request");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status,
            });
        }
        debug!(url, %status, content_length = ?response.content_length(), "response received");
        Ok(response)
    }

    fn progress_bar(&self, total_size: Option<u64>, message: &str) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }

        let pb = match total_size {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(BAR_TEMPLATE)?
                        .progress_chars("#>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(ProgressStyle::default_spinner().template(SPINNER_TEMPLATE)?);
                pb
            }
        };
        pb.set_message(message.to_string());
        Ok(pb)
    }
}

async fn write_body(response: reqwest::Response, path: &Path, pb: &ProgressBar) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded = downloaded.saturating_add(chunk.len() as u64);
        pb.set_position(downloaded);
    }
    file.flush().await?;
    Ok(downloaded)
}

fn prealloc_hint(content_length: Option<u64>) -> usize {
    content_length
        .map(|len| len.min(MAX_PREALLOC))
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(0)
}

/// Last `/`-separated segment of the URL path, kept percent-encoded.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let (_, name) = path.rsplit_once('/')?;
    (!name.is_empty()).then_some(name)
}
