//! Outcomes of a failed attempt, one variant per kind the loop reports.

use piratetube_dl::error::Error as DlError;
use thiserror::Error;

/// Why one URL attempt did not end in a download.
///
/// None of these end the session.
#[derive(Debug, Error)]
pub enum Failure {
    /// Metadata or format listing failed
    #[error("could not read video info: {0}")]
    Extraction(DlError),

    /// Metadata arrived but no format survived the filter
    #[error("no formats found for this video")]
    NoFormats,

    /// The answer did not name a menu entry
    #[error("invalid choice: {0:?}")]
    InvalidSelection(String),

    /// Download or post-processing failed
    #[error("{0}")]
    Download(DlError),

    /// Ctrl-C during listing or download
    #[error("cancelled by user")]
    Cancelled,

    /// Terminal I/O failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Failure {
    /// Classify an error from the listing stage.
    pub fn extraction(e: DlError) -> Self {
        match e {
            DlError::Interrupted => Self::Cancelled,
            e => Self::Extraction(e),
        }
    }

    /// Classify an error from the download stage.
    pub fn download(e: DlError) -> Self {
        match e {
            DlError::Interrupted => Self::Cancelled,
            e => Self::Download(e),
        }
    }
}
