use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    RequestBuild(#[from] reqwest::Error),

    #[error("The API request returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("No user found for username '{0}'")]
    NotFound(String),

    #[error("No bearer token configured")]
    MissingCredentials,
}
