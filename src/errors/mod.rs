use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error, check your connection";
pub const EMPTY_BODY_MESSAGE: &str = "The server returned an empty response";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum NewsError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Empty or invalid response body: {0}")]
    EmptyBody(String),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid category ordinal: {0}")]
    InvalidCategoryOrdinal(i64),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl NewsError {
    /// Errors raised by the remote API rather than by local storage or input.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            NewsError::Transport(_) | NewsError::Server { .. } | NewsError::EmptyBody(_)
        )
    }

    /// Text shown to the user when a request ends in this error.
    pub fn user_message(&self) -> String {
        match self {
            NewsError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            NewsError::Server { message, .. } if !message.is_empty() => message.clone(),
            NewsError::Server { .. } | NewsError::EmptyBody(_) => EMPTY_BODY_MESSAGE.to_string(),
            NewsError::ArticleNotFound(id) => format!("Article {} not found", id),
            NewsError::InvalidInput(msg) | NewsError::Config(msg) => msg.clone(),
            NewsError::MissingEnvVar(var) => format!("Missing environment variable: {}", var),
            NewsError::InvalidUrl(url) => format!("Invalid URL: {}", url),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type NewsResult<T> = Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_shows_server_message() {
        let err = NewsError::Server {
            status: 404,
            message: "Article 12 does not exist".to_string(),
        };
        assert!(err.is_remote_failure());
        assert_eq!(err.user_message(), "Article 12 does not exist");
    }

    #[test]
    fn test_server_error_without_message_is_generic() {
        let err = NewsError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), EMPTY_BODY_MESSAGE);
    }

    #[test]
    fn test_storage_errors_are_not_remote() {
        let err = NewsError::Database(rusqlite::Error::InvalidQuery);
        assert!(!err.is_remote_failure());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);

        let err = NewsError::Unknown("boom".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_empty_body_is_remote() {
        let err = NewsError::EmptyBody("EOF while parsing".to_string());
        assert!(err.is_remote_failure());
        assert_eq!(err.user_message(), EMPTY_BODY_MESSAGE);
    }
}
