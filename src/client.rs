// src/client.rs

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ClientError, Result};

/// Client for the calculation-orchestrator HTTP API.
///
/// Holds no session state of its own; the session token obtained from
/// [`CalcClient::login`] is passed back in by the caller for authenticated
/// operations.
pub struct CalcClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CalculateBody<'a> {
    expression: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct CalculateResponse {
    id: String,
}

#[derive(Deserialize)]
struct ExpressionEnvelope {
    expression: Expression,
}

#[derive(Deserialize)]
struct ExpressionsEnvelope {
    expressions: Vec<Expression>,
}

/// Observed snapshot of a server-side expression job. The client never
/// mutates jobs; it only reads them.
#[derive(Debug, Clone, Deserialize)]
pub struct Expression {
    pub id: String,
    #[serde(default)]
    pub expression: Option<String>,
    pub status: ExpressionStatus,
    #[serde(default)]
    result: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Expression {
    /// The numeric result, available only once the job reached `COMPLETE`.
    /// Any other status answers `None`, even if the server sent a value.
    pub fn result(&self) -> Option<f64> {
        match self.status {
            ExpressionStatus::Complete => self.result,
            _ => None,
        }
    }
}

/// Lifecycle states of an expression job, as the server spells them on the
/// wire. `Unknown` absorbs states introduced by newer servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpressionStatus {
    Pending,
    InProgress,
    Complete,
    Error,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ExpressionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExpressionStatus::Pending => "PENDING",
            ExpressionStatus::InProgress => "IN_PROGRESS",
            ExpressionStatus::Complete => "COMPLETE",
            ExpressionStatus::Error => "ERROR",
            ExpressionStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

impl CalcClient {
    /// Creates a new client against the given API base, e.g.
    /// `http://localhost:8080/api/v1`.
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Registers a new user. The server enforces login validity; an empty or
    /// already-taken login answers 400.
    pub async fn register(&self, login: &str, password: &str) -> Result<()> {
        self.post("/register", &CredentialsBody { login, password }, None)
            .await?;
        Ok(())
    }

    /// Logs a user in and returns the session token.
    pub async fn login(&self, login: &str, password: &str) -> Result<String> {
        let response = self
            .post("/login", &CredentialsBody { login, password }, None)
            .await?;
        let parsed: LoginResponse = parse_json(response).await?;
        if parsed.token.is_empty() {
            return Err(ClientError::UnexpectedResponse(
                "login response contained an empty token".to_string(),
            ));
        }
        Ok(parsed.token)
    }

    /// Submits an expression for asynchronous evaluation and returns the id
    /// of the created job.
    pub async fn calculate(&self, expression: &str, token: &str) -> Result<String> {
        let response = self
            .post("/calculate", &CalculateBody { expression }, Some(token))
            .await?;
        let parsed: CalculateResponse = parse_json(response).await?;
        Ok(parsed.id)
    }

    /// Fetches one expression job snapshot by id.
    pub async fn expression_by_id(&self, id: &str, token: &str) -> Result<Expression> {
        let response = self
            .get(&format!("/expressions/{}", id), Some(token))
            .await?;
        let parsed: ExpressionEnvelope = parse_json(response).await?;
        Ok(parsed.expression)
    }

    /// Lists every expression job known to the server.
    pub async fn expressions(&self, token: &str) -> Result<Vec<Expression>> {
        let response = self.get("/expressions", Some(token)).await?;
        let parsed: ExpressionsEnvelope = parse_json(response).await?;
        Ok(parsed.expressions)
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        check_status(request.send().await?).await
    }

    async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        check_status(request.send().await?).await
    }
}

/// Inspects the status code before the body is touched. Recognized error
/// codes short-circuit into typed failures carrying the raw body text; every
/// other code passes the response through for success parsing.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status().as_u16();
    log::debug!("response status: {}", status);

    if matches!(status, 400 | 401 | 404 | 500) {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error body".to_string());
        if let Some(err) = ClientError::from_status(status, body) {
            return Err(err);
        }
        unreachable!("from_status always returns Some for matched status codes");
    }

    Ok(response)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
