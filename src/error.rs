use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No binary available for {os} on {arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("HTTP {status} while fetching {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("No binary named '{name}' found in the archive")]
    BinaryNotFound { name: String },

    #[error("Invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Cannot derive a file name from URL: {url}")]
    InvalidUrl { url: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Progress bar template error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub fn unsupported_platform<S: Into<String>>(os: S, arch: S) -> Self {
        FetchError::UnsupportedPlatform {
            os: os.into(),
            arch: arch.into(),
        }
    }
}
