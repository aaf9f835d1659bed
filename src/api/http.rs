//! HTTP utilities for conveyor REST API calls

use super::session::Session;
use crate::error::{ConveyorError, Result};
use reqwest::{Client, Method};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Pull the human message out of an error body.
///
/// The service answers with `{"badRequest": {"message": "...", "code": 400}}`
/// style envelopes; the outer key varies with the fault kind.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    if let Some(message) = object.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    object
        .values()
        .find_map(|v| v.get("message").and_then(|m| m.as_str()))
        .map(str::to_string)
}

/// HTTP client wrapper for conveyor API calls
#[derive(Clone, Debug)]
pub struct ConveyorHttpClient {
    client: Client,
}

impl ConveyorHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("conveyor-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, session: &Session) -> Result<Value> {
        self.execute(Method::GET, url, session, None).await
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, session: &Session, body: Option<&Value>) -> Result<Value> {
        self.execute(Method::POST, url, session, body).await
    }

    /// Make a PUT request
    pub async fn put(&self, url: &str, session: &Session, body: Option<&Value>) -> Result<Value> {
        self.execute(Method::PUT, url, session, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, session: &Session) -> Result<Value> {
        self.execute(Method::DELETE, url, session, None).await
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        session: &Session,
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = session.apply(self.client.request(method, url));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            let message = extract_error_message(&response_body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            return Err(ConveyorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Handle empty response
        if response_body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&response_body)?)
    }
}

/// Format a client error for display
pub fn format_api_error(error: &ConveyorError) -> String {
    match error {
        ConveyorError::Api { status, message } => match status {
            401 => "Authentication failed. Check OS_AUTH_TOKEN or --os-token.".to_string(),
            403 => format!("Permission denied: {}", message),
            404 => format!("Not found: {}", message),
            409 => format!("Conflict: {}", message),
            429 => "Rate limit exceeded. Please try again later.".to_string(),
            500..=599 => format!(
                "Conveyor service error ({}): {}. Please try again.",
                status, message
            ),
            _ => format!("Request failed ({}): {}", status, message),
        },
        ConveyorError::Http(e) if e.is_connect() => {
            "Could not connect to the conveyor service. Check --os-url.".to_string()
        }
        ConveyorError::Http(e) if e.is_timeout() => "Request timed out.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn test_extract_error_message_from_fault_envelope() {
        let body = r#"{"itemNotFound": {"message": "Plan abc could not be found.", "code": 404}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Plan abc could not be found.")
        );
    }

    #[test]
    fn test_extract_error_message_flat_and_invalid() {
        assert_eq!(
            extract_error_message(r#"{"message": "boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(extract_error_message("<html>oops</html>"), None);
    }

    #[test]
    fn test_format_api_error() {
        let err = ConveyorError::Api {
            status: 401,
            message: "x".to_string(),
        };
        assert!(format_api_error(&err).contains("Authentication failed"));

        let err = ConveyorError::Api {
            status: 404,
            message: "Plan p1 could not be found.".to_string(),
        };
        assert_eq!(format_api_error(&err), "Not found: Plan p1 could not be found.");

        let err = ConveyorError::bad_request("'resources' must be a list.");
        assert_eq!(format_api_error(&err), "Bad request: 'resources' must be a list.");
    }
}
