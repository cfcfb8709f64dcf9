//! Progress presenter: redraws a single terminal line while yt-dlp downloads.

use crate::config::Variant;
use crate::term::{BOLD, CYAN, END, GREEN, YELLOW};
use piratetube_dl::hooks::{DownloadProgress, ProgressEvent, ProgressSink};
use std::io::Write;

/// Number of cells in the bar.
pub const BAR_WIDTH: usize = 40;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Parse `"45.0%"` into `45.0`.
pub fn parse_percent(percent: &str) -> Option<f64> {
    percent
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
}

/// `[████░░░…]` with ⌊width·p/100⌋ cells filled, clamped to the width.
pub fn bar(percent: f64) -> String {
    let filled = ((BAR_WIDTH as f64 * percent / 100.0).floor().max(0.0) as usize).min(BAR_WIDTH);

    let mut bar = String::with_capacity(BAR_WIDTH * FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, BAR_WIDTH - filled));
    bar
}

/// One progress line, starting with `\r` and without a trailing newline.
pub fn render(progress: &DownloadProgress) -> String {
    let percent = progress.percent.as_deref().unwrap_or("0%");
    let speed = progress.speed.as_deref().unwrap_or("N/A");
    let eta = progress.eta.as_deref().unwrap_or("N/A");
    let downloaded = progress.downloaded.as_deref().unwrap_or("0B");
    let total = progress.total.as_deref().unwrap_or("?B");

    match parse_percent(percent) {
        Some(p) => format!(
            "\r{CYAN}[{}]{END} {BOLD}{percent}{END} │ {GREEN}{speed}{END} │ ETA: {YELLOW}{eta}{END} │ {downloaded}/{total}",
            bar(p)
        ),
        None => format!("\r⏬ Downloading: {percent} at {speed}"),
    }
}

/// [`ProgressSink`] printing to stdout.
#[derive(Debug)]
pub struct ProgressPresenter {
    finished_message: String,
}

impl ProgressPresenter {
    pub fn new(variant: Variant) -> Self {
        let finished_message = match variant {
            Variant::Pro => format!("\n\n{YELLOW}🔄 Processing with FFmpeg (optimizing audio)...{END}"),
            Variant::Simple => "\n✅ Saved!".to_string(),
        };

        Self { finished_message }
    }
}

impl ProgressSink for ProgressPresenter {
    fn on_progress(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Downloading(progress) => {
                print!("{}", render(&progress));
                std::io::stdout().flush().ok();
            }
            ProgressEvent::Finished { filename } => {
                tracing::debug!(?filename, "item downloaded");
                println!("{}", self.finished_message);
            }
            ProgressEvent::Other(status) => {
                tracing::debug!(status, "progress status");
            }
        }
    }
}
