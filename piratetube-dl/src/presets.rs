//! Download presets.
//!
//! - [`MuxedMp4`]: best video + best audio up to a height, merged into MP4 with
//!   AAC 192 kbps audio (needs FFmpeg)
//! - [`Progressive`]: one exact format that already holds audio and video
//!
//! ```no_run
//! use piratetube_dl::dl::{Extractor, YdlParams, YtDlp};
//! use piratetube_dl::hooks::ProgressEvent;
//! use piratetube_dl::presets::MuxedMp4;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = YdlParams::from(MuxedMp4 { max_height: 720 })
//!     .with_output_dir(std::path::Path::new("/downloads"));
//! YtDlp::default().download("https://youtube.com/watch?v=example", params, Box::new(|_: ProgressEvent| {}))?;
//! # Ok(())
//! # }
//! ```

use crate::dl::{PostProcessor, PostProcessorArgs, YdlParams};

/// Container the muxed preset converts to.
pub const CONTAINER: &str = "mp4";

/// Audio codec and bitrate of the muxed preset.
pub const AUDIO_CODEC: &str = "aac";
pub const AUDIO_BITRATE: &str = "192k";

/// Best video and best audio no taller than `max_height`, merged into MP4.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MuxedMp4 {
    pub max_height: u32,
}

impl MuxedMp4 {
    /// yt-dlp format expression; falls back to the best single file when
    /// separate tracks are not offered.
    pub fn format(&self) -> String {
        let h = self.max_height;
        format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]")
    }
}

impl From<MuxedMp4> for PostProcessorArgs {
    /// FFmpeg args: `-c:v copy -c:a aac -b:a 192k`
    fn from(_: MuxedMp4) -> Self {
        Self {
            ffmpeg: vec![
                "-c:v".to_string(),
                "copy".to_string(), // keep the video stream as is
                "-c:a".to_string(),
                AUDIO_CODEC.to_string(),
                "-b:a".to_string(),
                AUDIO_BITRATE.to_string(),
            ],
        }
    }
}

impl From<MuxedMp4> for YdlParams {
    fn from(preset: MuxedMp4) -> Self {
        Self {
            format: Some(preset.format()),
            merge_output_format: Some(CONTAINER.to_string()),
            postprocessors: Some(vec![PostProcessor {
                key: "FFmpegVideoConvertor".to_string(),
                preferedformat: Some(CONTAINER.to_string()),
            }]),
            postprocessor_args: Some(preset.into()),
            prefer_ffmpeg: Some(true),
            noplaylist: Some(true),
            quiet: Some(true),
            no_warnings: Some(true),
            ..Default::default()
        }
    }
}

/// Exact format id of a progressive stream; no merging or transcoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progressive {
    pub format_id: String,
}

impl From<Progressive> for YdlParams {
    fn from(preset: Progressive) -> Self {
        Self {
            format: Some(preset.format_id),
            noplaylist: Some(true),
            quiet: Some(true),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muxed_format_is_height_bounded_with_fallback() {
        let preset = MuxedMp4 { max_height: 720 };
        assert_eq!(
            preset.format(),
            "bestvideo[height<=720]+bestaudio/best[height<=720]"
        );
    }

    #[test]
    fn muxed_postprocessor_args() {
        let args = PostProcessorArgs::from(MuxedMp4 { max_height: 1080 });

        assert_eq!(
            args.ffmpeg,
            vec!["-c:v", "copy", "-c:a", "aac", "-b:a", "192k"]
        );
    }

    #[test]
    fn muxed_params() {
        let params: YdlParams = MuxedMp4 { max_height: 360 }.into();

        assert!(matches!(
            params,
            YdlParams {
                format: Some(ref format),
                paths: None,
                outtmpl: None,
                merge_output_format: Some(ref container),
                postprocessors: Some(ref pps),
                postprocessor_args: Some(_),
                prefer_ffmpeg: Some(true),
                noplaylist: Some(true),
                quiet: Some(true),
                no_warnings: Some(true),
            } if format.contains("height<=360")
                && container == "mp4"
                && pps.len() == 1
                && pps[0].key == "FFmpegVideoConvertor"
                && pps[0].preferedformat.as_deref() == Some("mp4")
        ));
    }

    #[test]
    fn progressive_params_use_exact_id() {
        let params: YdlParams = Progressive {
            format_id: "18".to_string(),
        }
        .into();

        assert_eq!(params.format.as_deref(), Some("18"));
        assert!(params.postprocessors.is_none());
        assert!(params.postprocessor_args.is_none());
        assert!(params.merge_output_format.is_none());
    }
}
