//! Terminal adapter for yt-dlp's logger.

use crate::term;
use piratetube_dl::hooks::Logger;

/// Warning yt-dlp emits on every YouTube request when no JS runtime is
/// installed; it does not affect the formats we use.
pub const BENIGN_WARNING: &str = "No supported JavaScript runtime";

/// Shows warnings and errors on stdout, debug output only in `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalLogger;

impl TerminalLogger {
    pub fn shows_warning(msg: &str) -> bool {
        !msg.contains(BENIGN_WARNING)
    }
}

impl Logger for TerminalLogger {
    fn debug(&self, msg: &str) {
        tracing::debug!(target: "yt_dlp", "{msg}");
    }

    fn warning(&self, msg: &str) {
        tracing::warn!(target: "yt_dlp", "{msg}");

        if Self::shows_warning(msg) {
            term::warning(&mut std::io::stdout(), msg).ok();
        }
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "yt_dlp", "{msg}");
        term::error(&mut std::io::stdout(), msg).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_only_the_benign_warning() {
        assert!(!TerminalLogger::shows_warning(
            "[youtube] abc: No supported JavaScript runtime could be found."
        ));
        assert!(TerminalLogger::shows_warning(
            "[youtube] abc: Some formats may be missing"
        ));
    }
}
