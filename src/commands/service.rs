//! Service subcommands

use super::parse::args_array_to_dict;
use super::{notify, string_attributes, Context};
use crate::output;
use anyhow::Result;
use serde_json::{Map, Value};

const LIST_COLUMNS: &[&str] = &["id", "name", "status"];

pub async fn list(ctx: &Context, detailed: bool, filters: &[String]) -> Result<()> {
    let search_opts = args_array_to_dict(filters)?;
    let services = ctx.client.services().list(detailed, &search_opts).await?;
    let rows: Vec<Map<String, Value>> = services.into_iter().map(|s| s.attrs).collect();
    output::print_list(&rows, LIST_COLUMNS, ctx.format)
}

pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let service = ctx.client.services().get(id).await?;
    output::print_dict(&service.attrs, ctx.format)
}

pub async fn delete(ctx: &Context, id: &str) -> Result<()> {
    ctx.client.services().delete(id).await?;
    notify(ctx, &format!("Deleted service {}", id));
    Ok(())
}

pub async fn update(ctx: &Context, id: &str, attributes: &[String]) -> Result<()> {
    let values = string_attributes(attributes)?;
    ctx.client.services().update(id, values).await?;
    notify(ctx, &format!("Updated service {}", id));
    Ok(())
}
