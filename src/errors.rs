/*!
 * Error types for the reibun application.
 *
 * This module contains custom error types for the collaborator clients and
 * the generation cycle, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the text-generation or speech-synthesis services
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication or request signing
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during a generation cycle
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Error from one of the collaborator services
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The generator returned fewer non-blank lines than the dialogue needs
    #[error("Expected {expected} non-blank lines from the generator, found {found}")]
    MissingLines {
        /// Number of lines a full dialogue needs
        expected: usize,
        /// Number of non-blank lines actually returned
        found: usize,
    },

    /// The kanji table produced no candidates to pick from
    #[error("Kanji table is empty")]
    NoCandidates,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a generation cycle
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
