use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered but the record is missing something the dashboard needs.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("no location found for \"{0}\"")]
    LocationNotFound(String),

    #[error("no saved location; pass a station id, --city, or --lat/--lon")]
    NoSavedLocation,

    #[error("local store {path}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("local store is not valid JSON: {0}")]
    StoreFormat(#[from] serde_json::Error),
}

impl Error {
    pub fn unavailable(what: impl Into<String>) -> Self {
        Self::DataUnavailable(what.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
