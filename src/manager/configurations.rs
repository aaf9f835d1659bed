//! Service configuration

use crate::api::ConveyorClient;
use crate::error::Result;
use serde_json::{Map, Value};

pub struct ConfigurationManager<'a> {
    client: &'a ConveyorClient,
}

impl<'a> ConfigurationManager<'a> {
    pub fn new(client: &'a ConveyorClient) -> Self {
        Self { client }
    }

    /// Push configuration values, optionally targeting a specific config file
    pub async fn update_configs(
        &self,
        config_file: Option<&str>,
        config_info: Map<String, Value>,
    ) -> Result<Value> {
        let body = Self::body(config_file, config_info);
        tracing::info!("Updating service configuration");
        self.client.post("/configurations", Some(&body)).await
    }

    fn body(config_file: Option<&str>, config_info: Map<String, Value>) -> Value {
        let mut configurations = Map::new();
        if let Some(file) = config_file.filter(|f| !f.is_empty()) {
            configurations.insert("config_file".to_string(), Value::from(file));
        }
        configurations.insert(
            "config_info".to_string(),
            Value::Array(vec![Value::Object(config_info)]),
        );

        let mut body = Map::new();
        body.insert("configurations".to_string(), Value::Object(configurations));
        Value::Object(body)
    }
}
