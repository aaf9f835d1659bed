//! Conveyor Client
//!
//! Main client for the conveyor API, combining the session headers and the
//! HTTP wrapper. Managers borrow it to issue their requests.

use super::http::ConveyorHttpClient;
use super::session::Session;
use crate::error::Result;
use crate::manager::{
    CloneManager, ConfigurationManager, MigrateManager, PlanManager, ResourceManager,
    ServiceManager,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Main conveyor client
#[derive(Clone, Debug)]
pub struct ConveyorClient {
    http: ConveyorHttpClient,
    session: Session,
    base_url: String,
}

impl ConveyorClient {
    /// Create a new client for the given endpoint
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        let http = ConveyorHttpClient::new()?;

        Ok(Self {
            http,
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build a full URL from an absolute API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.http.get(&self.url(path), &self.session).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.http.post(&self.url(path), &self.session, body).await
    }

    /// Make a PUT request
    pub async fn put(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.http.put(&self.url(path), &self.session, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.http.delete(&self.url(path), &self.session).await
    }

    /// POST `{"<action>": info}` to `/<collection>/<id>/action`
    pub async fn action(
        &self,
        collection: &str,
        id: &str,
        action: &str,
        info: Value,
    ) -> Result<Value> {
        let path = format!("/{}/{}/action", collection, path_segment(id));
        let body = json!({ action: info });
        tracing::debug!("action {} on {}/{}", action, collection, id);
        self.post(&path, Some(&body)).await
    }

    // =========================================================================
    // Managers
    // =========================================================================

    pub fn plans(&self) -> PlanManager<'_> {
        PlanManager::new(self)
    }

    pub fn resources(&self) -> ResourceManager<'_> {
        ResourceManager::new(self)
    }

    pub fn clones(&self) -> CloneManager<'_> {
        CloneManager::new(self)
    }

    pub fn migrates(&self) -> MigrateManager<'_> {
        MigrateManager::new(self)
    }

    pub fn configurations(&self) -> ConfigurationManager<'_> {
        ConfigurationManager::new(self)
    }

    pub fn services(&self) -> ServiceManager<'_> {
        ServiceManager::new(self)
    }
}

/// Percent-encode a single path segment (ids are user supplied)
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Build `?k=v&...` from query parameters, keys in sorted order
pub fn query_string(params: &BTreeMap<String, String>) -> String {
    if params.is_empty() {
        return String::new();
    }

    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    format!("?{}", encoded)
}
