//! Interactive downloader built on [`piratetube_dl`].
//!
//! Paste a URL, pick a quality from the numbered menu, and the video is
//! downloaded to the configured folder while a progress bar animates in place.
//!
//! Two variants share the same loop:
//!
//! - **pro** - resolution menu, best video + best audio merged into MP4 with
//!   AAC 192 kbps audio; requires FFmpeg
//! - **simple** - progressive streams only, downloaded as is; no FFmpeg

pub mod cli;
pub mod config;
pub mod dl;
pub mod error;
pub mod lister;
pub mod logger;
pub mod preflight;
pub mod progress;
pub mod selector;
pub mod session;
pub mod term;
