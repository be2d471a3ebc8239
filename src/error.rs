use std::path::PathBuf;

use reqwest::StatusCode;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use crate::api::ApiError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The access token was rejected, nothing can be fetched
    #[error("access token validation failed: {status} {body}")]
    Auth { status: StatusCode, body: String },

    /// A post list page could not be fetched, pagination stops there
    #[error("failed to fetch post page {page}: {source}")]
    PageFetch {
        page: usize,
        #[source]
        source: ApiError,
    },

    /// Insights for one post could not be fetched
    #[error("failed to fetch insights for {media_id}: {source}")]
    MetricsFetch {
        media_id: String,
        #[source]
        source: ApiError,
    },

    /// The report could not be written, usually because it is open elsewhere
    #[error("failed to write {}: {source} (close the file if it is open and run again)", path.display())]
    ExportConflict {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    #[error("failed to build report: {0}")]
    Xlsx(#[from] XlsxError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the run has to stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::Api(_) | Self::Io(_))
    }
}
