pub mod middleware;

use serde::Deserialize;

/// Error envelope shared by the hosted services.
#[derive(Debug, Deserialize)]
pub struct ServiceErrorResponse {
    pub error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ServiceErrorDetail {
    /// The database reports errors as a bare string.
    Message(String),
    /// The identity service wraps them in a body with a numeric code.
    Body(ServiceErrorBody),
}

#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    pub code: Option<u16>,
    pub message: String,
}

impl ServiceErrorResponse {
    pub fn message(&self) -> &str {
        match &self.error {
            ServiceErrorDetail::Message(msg) => msg,
            ServiceErrorDetail::Body(body) => &body.message,
        }
    }
}

/// Extracts the service's error message from a failed response, falling back
/// to the HTTP status when the body is not the expected envelope.
pub async fn parse_error_response(response: reqwest::Response, default_msg: &str) -> String {
    let status = response.status();
    match response.json::<ServiceErrorResponse>().await {
        Ok(envelope) => envelope.message().to_string(),
        Err(_) => format!("{}: {}", default_msg, status),
    }
}
