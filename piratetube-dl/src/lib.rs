//! Type-safe Rust bindings to [yt-dlp](https://github.com/yt-dlp/yt-dlp) Python library.
//!
//! ## Modules
//!
//! - [`dl`] - Core yt-dlp API wrappers and the [`dl::Extractor`] seam
//! - [`hooks`] - Progress and logger callbacks
//! - [`presets`] - Muxed MP4 and progressive download presets
//! - [`error`] - Error classification at the Python boundary
//!
//! ## Quick Start
//!
//! **Probe formats**:
//! ```no_run
//! use piratetube_dl::dl::{Extractor, YdlParams, YtDlp};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let info = YtDlp::default().extract_info("https://youtube.com/watch?v=example", YdlParams::probe())?;
//!
//! for format in info.formats.iter().filter(|f| f.is_progressive()) {
//!     println!("{} {:?}p", format.format_id, format.height);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! **Download with progress**:
//! ```no_run
//! use piratetube_dl::dl::{Extractor, YdlParams, YtDlp};
//! use piratetube_dl::hooks::ProgressEvent;
//! use piratetube_dl::presets::Progressive;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = YdlParams::from(Progressive { format_id: "18".to_string() })
//!     .with_output_dir(Path::new("downloads"));
//!
//! let sink = |event: ProgressEvent| {
//!     if let ProgressEvent::Downloading(p) = event {
//!         println!("{:?}", p.percent);
//!     }
//! };
//!
//! YtDlp::default().download("https://youtube.com/watch?v=example", params, Box::new(sink))?;
//! # Ok(())
//! # }
//! ```

pub mod dl;
pub mod error;
pub mod hooks;
pub mod presets;
