//! Migrate actions on a plan

use super::AzMap;
use crate::api::ConveyorClient;
use crate::error::Result;
use serde_json::{json, Value};

/// Manage migrate actions
pub struct MigrateManager<'a> {
    client: &'a ConveyorClient,
}

impl<'a> MigrateManager<'a> {
    pub fn new(client: &'a ConveyorClient) -> Self {
        Self { client }
    }

    pub async fn export_migrate_template(&self, plan_id: &str) -> Result<Value> {
        self.client
            .action("migrates", plan_id, "export_migrate_template", Value::Null)
            .await
    }

    /// Migrate a plan into the destination zones
    pub async fn migrate(&self, plan_id: &str, destination: &AzMap) -> Result<Value> {
        tracing::info!("Migrating plan {} to {:?}", plan_id, destination);
        self.client
            .action(
                "migrates",
                plan_id,
                "migrate",
                json!({ "destination": destination }),
            )
            .await
    }
}
