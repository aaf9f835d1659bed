//! Session headers
//!
//! The conveyor service sits behind an identity service. This client does not
//! negotiate tokens itself; it forwards a token and project that were issued
//! elsewhere.

use reqwest::RequestBuilder;

pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
pub const PROJECT_ID_HEADER: &str = "X-Project-Id";

/// Environment variable holding a pre-issued token
pub const TOKEN_ENV: &str = "OS_AUTH_TOKEN";
/// Environment variable holding the project id
pub const PROJECT_ID_ENV: &str = "OS_PROJECT_ID";

/// Credentials attached to every request
#[derive(Clone, Default)]
pub struct Session {
    pub token: Option<String>,
    pub project_id: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>, project_id: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            project_id: project_id.filter(|p| !p.is_empty()),
        }
    }

    /// Add the session headers to a request
    pub fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(project_id) = &self.project_id {
            request = request.header(PROJECT_ID_HEADER, project_id);
        }
        request
    }
}

// Tokens must never end up in logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("project_id", &self.project_id)
            .finish()
    }
}
