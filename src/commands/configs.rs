//! Service configuration subcommands

use super::parse::{args_array_to_dict, translate_string_dict};
use super::{notify, Context};
use crate::error::{ConveyorError, Result};
use serde_json::{Map, Value};

/// Property naming the config file to update instead of the default one
const CONFIG_FILE_KEY: &str = "config-file";

/// Split `-p` properties into the target file and the config sections
fn build_update(properties: &[String]) -> Result<(Option<String>, Map<String, Value>)> {
    let mut info = Map::new();
    for (key, value) in args_array_to_dict(properties)? {
        info.insert(key, translate_string_dict(&value)?);
    }

    if info.is_empty() {
        return Err(ConveyorError::command(
            "Update configuration info properties is empty",
        ));
    }

    let config_file = info.remove(CONFIG_FILE_KEY).map(|v| match v {
        Value::String(s) => s,
        other => other.to_string(),
    });
    Ok((config_file, info))
}

pub async fn update(ctx: &Context, properties: &[String]) -> anyhow::Result<()> {
    let (config_file, info) = build_update(properties)?;
    ctx.client
        .configurations()
        .update_configs(config_file.as_deref(), info)
        .await?;
    notify(ctx, "Configuration updated");
    Ok(())
}
