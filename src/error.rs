use thiserror::Error;

/// Errors that can occur while searching for and analyzing recipes
#[derive(Error, Debug)]
pub enum FinderError {
    /// Request failure: connection refused, DNS failure, timeout
    #[error("Failed to reach the recipe API: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code
    #[error("Recipe API returned HTTP {code}")]
    Status { code: u16 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
