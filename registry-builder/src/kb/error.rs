//! Knowledgebase feed error types.

/// Errors from fetching or parsing the knowledgebase stations feed.
///
/// Unlike the timetable side, any of these is fatal: without station
/// records there is nothing to build a registry from.
#[derive(Debug, thiserror::Error)]
pub enum KbError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check NR_AUTH_TOKEN")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The stations document is not well-formed XML
    #[error("XML parse error: {message}")]
    Xml { message: String },
}
