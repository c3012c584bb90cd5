// src/errors.rs
use thiserror::Error;

/// Failures the test client can observe while driving the orchestrator API.
///
/// The first four variants are the typed failures mapped from recognized HTTP
/// status codes; they carry the verbatim response body so diagnostics survive
/// even when the server answers with malformed JSON.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("bad request (400): {body}")]
    BadRequest { body: String },

    #[error("unauthorized (401): {body}")]
    Unauthorized { body: String },

    #[error("not found (404): {body}")]
    NotFound { body: String },

    #[error("internal server error (500): {body}")]
    InternalServerError { body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("expression result not ready after {attempts} polling attempts")]
    PollTimedOut { attempts: usize },
}

impl ClientError {
    /// Maps a recognized HTTP status code to its typed failure, keeping the
    /// response body verbatim. Unrecognized codes return `None` and the
    /// caller treats the response as success.
    pub fn from_status(status: u16, body: String) -> Option<Self> {
        match status {
            400 => Some(ClientError::BadRequest { body }),
            401 => Some(ClientError::Unauthorized { body }),
            404 => Some(ClientError::NotFound { body }),
            500 => Some(ClientError::InternalServerError { body }),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
