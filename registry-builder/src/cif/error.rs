//! Timetable feed error types.

/// Errors from downloading or opening the timetable archive.
///
/// None of these abort a build: the pipeline downgrades them to a
/// degraded, owning-operator-only registry.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check NR_AUTH_TOKEN")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Archive could not be opened or a member was corrupt
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Reading a member out of the archive failed
    #[error("archive read error: {0}")]
    Io(#[from] std::io::Error),
}
