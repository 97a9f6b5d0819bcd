use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion response contained no choices")]
    EmptyResponse,

    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),
}
