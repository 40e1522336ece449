//! Download the prebuilt rclone binary that matches the host platform.
//!
//! The library backs the `rclone-fetch` CLI: platform detection, archive
//! lookup, streamed HTTP downloads with progress, and single-file zip
//! extraction.

pub mod archive;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod install;
pub mod platform;
