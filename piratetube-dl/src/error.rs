//! Error types for piratetube-dl organized by collaborator stage.

use pyo3::exceptions::{PyImportError, PyKeyboardInterrupt};
use pyo3::prelude::*;
use thiserror::Error;

/// Failures surfaced by the yt-dlp bindings.
///
/// Python exceptions never cross this boundary as [`PyErr`]; they are
/// classified once, with the exception text kept for display.
#[derive(Debug, Error)]
pub enum Error {
    /// Metadata or format listing failed (network, unsupported URL, blocked host)
    #[error("failed to extract video info: {0}")]
    Extraction(String),

    /// Download or post-processing failed
    #[error("download failed: {0}")]
    Download(String),

    /// The yt_dlp package (or one of its imports) is not installed
    #[error("yt-dlp is not available: {0}")]
    MissingModule(String),

    /// Ctrl-C arrived while yt-dlp was running
    #[error("interrupted by user")]
    Interrupted,
}

/// Result type alias for piratetube-dl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Stage the Python call belonged to, used to pick the fallback variant.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Stage {
    Extract,
    Download,
}

/// Map a Python exception to an [`Error`].
pub(crate) fn classify(py: Python<'_>, err: PyErr, stage: Stage) -> Error {
    if err.is_instance_of::<PyKeyboardInterrupt>(py) {
        return Error::Interrupted;
    }

    let message = err.value(py).to_string();

    // ModuleNotFoundError is a subclass of ImportError
    if err.is_instance_of::<PyImportError>(py) {
        return Error::MissingModule(message);
    }

    match stage {
        Stage::Extract => Error::Extraction(message),
        Stage::Download => Error::Download(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::exceptions::{PyModuleNotFoundError, PyRuntimeError};

    #[test]
    fn keyboard_interrupt_is_interrupted() {
        Python::attach(|py| {
            let err = PyKeyboardInterrupt::new_err(());
            assert!(matches!(
                classify(py, err, Stage::Download),
                Error::Interrupted
            ));
        });
    }

    #[test]
    fn missing_module_is_reported_separately() {
        Python::attach(|py| {
            let err = PyModuleNotFoundError::new_err("No module named 'yt_dlp'");
            match classify(py, err, Stage::Extract) {
                Error::MissingModule(msg) => assert!(msg.contains("yt_dlp")),
                other => panic!("unexpected error: {other:?}"),
            }
        });
    }

    #[test]
    fn other_errors_follow_stage() {
        Python::attach(|py| {
            let err = PyRuntimeError::new_err("ERROR: Unsupported URL");
            assert!(matches!(
                classify(py, err, Stage::Extract),
                Error::Extraction(msg) if msg == "ERROR: Unsupported URL"
            ));

            let err = PyRuntimeError::new_err("HTTP Error 403");
            assert!(matches!(
                classify(py, err, Stage::Download),
                Error::Download(msg) if msg == "HTTP Error 403"
            ));
        });
    }
}
