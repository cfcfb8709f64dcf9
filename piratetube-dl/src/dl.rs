//! yt-dlp Python API wrappers.
//!
//! Type-safe bindings to [yt-dlp](https://github.com/yt-dlp/yt-dlp) `YoutubeDL` parameters.
//!
//! ```no_run
//! use piratetube_dl::dl::{Extractor, YdlParams, YtDlp};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ytdlp = YtDlp::default();
//! let info = ytdlp.extract_info("https://youtube.com/watch?v=example", YdlParams::probe())?;
//! println!("{} formats", info.formats.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, Stage, classify};
use crate::hooks::{Logger, LoggerBridge, ProgressHook, ProgressSink};
use pyo3::ffi::c_str;
use pyo3::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Output template producing `{title}.{ext}` inside the `home` path.
pub const TITLE_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Filename templates using `%(field)s` syntax. Key `default` required.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputTemplates(pub Option<HashMap<String, String>>);

impl OutputTemplates {
    /// Create with a single default template.
    pub fn simple(default: String) -> Self {
        Self(Some(HashMap::from([("default".to_string(), default)])))
    }
}

/// Download directories: `home`, optional `temp` and type-specific paths.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputPaths(pub Option<HashMap<String, String>>);

impl OutputPaths {
    pub fn with_home(self, home: &Path) -> Self {
        self.with_key("home".to_string(), home)
    }

    fn with_key(self, key: String, value: &Path) -> Self {
        let mut inner = self.0.unwrap_or_default();
        inner.insert(key, value.to_string_lossy().to_string());
        Self(Some(inner))
    }
}

/// Post-download operation: `key` (e.g., `"FFmpegVideoConvertor"`), optional `preferedformat`.
///
/// The field name follows yt-dlp's own spelling.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct PostProcessor {
    pub key: String,
    pub preferedformat: Option<String>,
}

/// CLI arguments passed to yt-dlp post-processors.
///
/// The `ffmpeg` field holds arguments for every FFmpeg invocation yt-dlp makes
/// while post-processing, e.g. `["-c:v", "copy", "-c:a", "aac"]`.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct PostProcessorArgs {
    pub ffmpeg: Vec<String>,
}

/// yt-dlp configuration passed to `YoutubeDL(params)`.
///
/// `None` fields are left out of the params dict, so yt-dlp's own defaults apply.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct YdlParams {
    pub format: Option<String>,
    pub paths: Option<OutputPaths>,
    pub outtmpl: Option<OutputTemplates>,
    pub merge_output_format: Option<String>,
    pub postprocessors: Option<Vec<PostProcessor>>,
    pub postprocessor_args: Option<PostProcessorArgs>,
    pub prefer_ffmpeg: Option<bool>,
    pub noplaylist: Option<bool>,
    pub quiet: Option<bool>,
    pub no_warnings: Option<bool>,
}

impl YdlParams {
    /// Metadata-only probe: single video, no console chatter.
    pub fn probe() -> Self {
        Self {
            noplaylist: Some(true),
            quiet: Some(true),
            ..Default::default()
        }
    }

    /// Save as `{dir}/{title}.{ext}`.
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.paths = Some(self.paths.unwrap_or_default().with_home(dir));
        self.outtmpl = Some(OutputTemplates::simple(TITLE_TEMPLATE.to_string()));
        self
    }
}

/// One encoding variant of a video as reported by yt-dlp.
#[derive(Clone, Debug, Default, PartialEq, FromPyObject)]
#[pyo3(from_item_all)]
pub struct FormatDescriptor {
    /// Opaque yt-dlp format id (e.g. `"18"`, `"137"`)
    pub format_id: String,
    /// Vertical resolution in pixels
    pub height: Option<u32>,
    pub fps: Option<f64>,
    /// Video codec, `"none"` for audio-only formats, `None` when unknown
    pub vcodec: Option<String>,
    /// Audio codec, `"none"` for video-only formats, `None` when unknown
    pub acodec: Option<String>,
    /// Exact size in bytes, or yt-dlp's estimate when the exact one is unknown
    pub filesize: Option<u64>,
    /// Container extension
    pub ext: Option<String>,
}

impl FormatDescriptor {
    pub fn has_video(&self) -> bool {
        codec_present(self.vcodec.as_deref())
    }

    pub fn has_audio(&self) -> bool {
        codec_present(self.acodec.as_deref())
    }

    /// Audio and video in a single file, no muxing needed.
    pub fn is_progressive(&self) -> bool {
        self.has_video() && self.has_audio()
    }
}

/// Only an explicit `"none"` rules a stream out; an unknown codec may still carry it.
fn codec_present(codec: Option<&str>) -> bool {
    codec != Some("none")
}

/// Essential metadata from yt-dlp info dict.
///
/// Normalized by `dl.py` so every key is present.
#[derive(Clone, Debug, Default, FromPyObject)]
#[pyo3(from_item_all)]
pub struct VideoInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Uploader name, or the channel name when yt-dlp has no uploader
    pub uploader: Option<String>,
    /// Length of the video in seconds
    pub duration: Option<f64>,
    pub formats: Vec<FormatDescriptor>,
}

/// The extraction collaborator: probes formats and downloads.
///
/// Both calls block until yt-dlp returns.
pub trait Extractor {
    /// Fetch metadata and formats without downloading.
    fn extract_info(&self, url: &str, params: YdlParams) -> Result<VideoInfo>;

    /// Download `url`, reporting progress to `sink` on the calling thread.
    fn download(&self, url: &str, params: YdlParams, sink: Box<dyn ProgressSink>) -> Result<()>;
}

impl<E: Extractor + ?Sized> Extractor for &E {
    fn extract_info(&self, url: &str, params: YdlParams) -> Result<VideoInfo> {
        (**self).extract_info(url, params)
    }

    fn download(&self, url: &str, params: YdlParams, sink: Box<dyn ProgressSink>) -> Result<()> {
        (**self).download(url, params, sink)
    }
}

/// [`Extractor`] backed by the `yt_dlp` Python package.
pub struct YtDlp {
    logger: Rc<dyn Logger>,
}

impl YtDlp {
    pub fn new(logger: Rc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Installed yt-dlp version, e.g. `"2025.10.22"`.
    pub fn version(&self) -> Result<String> {
        Python::attach(|py| {
            helper(py)
                .and_then(|module| module.getattr("version")?.call0()?.extract())
                .map_err(|e| classify(py, e, Stage::Extract))
        })
    }
}

impl Default for YtDlp {
    /// Routes yt-dlp messages to `tracing`.
    fn default() -> Self {
        Self::new(Rc::new(TracingLogger))
    }
}

impl Extractor for YtDlp {
    /// Uses `extract_info(url, download=False)`.
    fn extract_info(&self, url: &str, params: YdlParams) -> Result<VideoInfo> {
        tracing::debug!(url, ?params, "extracting info");

        Python::attach(|py| {
            let run = || -> PyResult<VideoInfo> {
                let module = helper(py)?;
                let logger = Bound::new(py, LoggerBridge::new(Rc::clone(&self.logger)))?;
                let info = module
                    .getattr("extract")?
                    .call1((url, params.into_pyobject(py)?, logger))?;
                info.extract()
            };

            run().map_err(|e| classify(py, e, Stage::Extract))
        })
    }

    fn download(&self, url: &str, params: YdlParams, sink: Box<dyn ProgressSink>) -> Result<()> {
        tracing::debug!(url, ?params, "downloading");

        Python::attach(|py| {
            let run = || -> PyResult<()> {
                let module = helper(py)?;
                let logger = Bound::new(py, LoggerBridge::new(Rc::clone(&self.logger)))?;
                let hook = Bound::new(py, ProgressHook::new(sink))?;
                module
                    .getattr("download")?
                    .call1((url, params.into_pyobject(py)?, logger, hook))?;
                Ok(())
            };

            run().map_err(|e| classify(py, e, Stage::Download))
        })
    }
}

/// Load the embedded `dl.py` helper module.
fn helper(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    PyModule::from_code(py, c_str!(include_str!("./dl.py")), c"dl.py", c"dl")
}

/// Forwards yt-dlp messages to `tracing`.
struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, msg: &str) {
        tracing::debug!(target: "yt_dlp", "{msg}");
    }

    fn warning(&self, msg: &str) {
        tracing::warn!(target: "yt_dlp", "{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "yt_dlp", "{msg}");
    }
}
