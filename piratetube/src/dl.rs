//! Download orchestrator: builds the yt-dlp request for a menu choice and runs it.

use crate::error::Failure;
use crate::lister::Quality;
use piratetube_dl::dl::{Extractor, YdlParams};
use piratetube_dl::hooks::ProgressSink;
use piratetube_dl::presets::{MuxedMp4, Progressive};
use std::path::Path;

/// yt-dlp params for `target`, saving to `{output_dir}/{title}.{ext}`.
pub fn plan(target: &Quality, output_dir: &Path) -> YdlParams {
    let params: YdlParams = match target {
        Quality::MaxHeight(max_height) => MuxedMp4 {
            max_height: *max_height,
        }
        .into(),
        Quality::Exact(format_id) => Progressive {
            format_id: format_id.clone(),
        }
        .into(),
    };

    params.with_output_dir(output_dir)
}

/// Download `url` synchronously; the sink sees progress on this thread.
///
/// Partial files are left in place on failure.
pub fn execute(
    extractor: &impl Extractor,
    url: &str,
    target: &Quality,
    output_dir: &Path,
    sink: Box<dyn ProgressSink>,
) -> Result<(), Failure> {
    tracing::info!(url, ?target, dir = %output_dir.display(), "downloading");

    let params = plan(target, output_dir);

    extractor
        .download(url, params, sink)
        .map_err(Failure::download)?;

    tracing::info!(url, "download complete");
    Ok(())
}
