use thiserror::Error;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Represents an SQL error.
    #[error("SQLx error")]
    Sqlx { source: sqlx::Error },

    /// Returned when a listing ID does not identify a stored listing.
    #[error("Internship not found")]
    NotFound { id: String },

    /// Returned when a path parameter is not a well-formed listing ID.
    #[error("Internship not found: {0} is not a valid ID")]
    InvalidId(String),

    /// Returned when a creation request leaves out required fields.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Returned when an update provides a blank value for a required field.
    #[error("Fields must not be empty: {}", .0.join(", "))]
    EmptyFields(Vec<String>),

    /// Represents an unparseable request body.
    #[error("Malformed listing submission: {source}")]
    MalformedSubmission { source: serde_json::Error },
}
