//! Resource subcommands

use super::parse::{effective_all_tenants, parse_az_map};
use super::{notify, to_row, Context};
use crate::api::ConveyorClient;
use crate::manager::SearchOpts;
use crate::output::{self, SERVER_COLUMNS, SERVER_TYPE};
use anyhow::Result;

/// Resource types the service can clone or migrate
pub(super) async fn known_types(client: &ConveyorClient) -> crate::Result<Vec<String>> {
    let types = client.resources().resource_type_list().await?;
    Ok(types.into_iter().map(|t| t.resource_type).collect())
}

pub async fn type_list(ctx: &Context) -> Result<()> {
    let types = ctx.client.resources().resource_type_list().await?;
    let rows = types.iter().map(to_row).collect::<Result<Vec<_>>>()?;
    output::print_list(&rows, &["type"], ctx.format)
}

pub async fn list(
    ctx: &Context,
    resource_type: &str,
    name: Option<&str>,
    all_tenants: u8,
) -> Result<()> {
    let mut search_opts = SearchOpts::new();
    search_opts.insert("type".to_string(), resource_type.to_string());
    if let Some(name) = name {
        search_opts.insert("name".to_string(), name.to_string());
    }
    let all_tenants = effective_all_tenants(all_tenants)?;
    if all_tenants != 0 {
        search_opts.insert("all_tenants".to_string(), all_tenants.to_string());
    }

    let resources = ctx.client.resources().list(&search_opts).await?;

    if resource_type == SERVER_TYPE {
        let rows: Vec<_> = resources
            .into_iter()
            .map(|r| output::translate_server(r.attrs))
            .collect();
        output::print_list(&rows, SERVER_COLUMNS, ctx.format)
    } else {
        output::print_document(&resources, ctx.format)
    }
}

pub async fn show(ctx: &Context, resource_type: &str, id: &str) -> Result<()> {
    let resource = ctx
        .client
        .resources()
        .get_resource_detail(resource_type, id)
        .await?;
    output::print_document(&resource, ctx.format)
}

pub async fn show_topo(ctx: &Context, plan_id: &str, az_map: &str) -> Result<()> {
    let az_map = parse_az_map(az_map)?;
    let topo = ctx
        .client
        .resources()
        .build_resources_topo(plan_id, &az_map, None)
        .await?;
    output::print_document(&topo, ctx.format)
}

pub async fn list_plan_zone(ctx: &Context, plan_id: &str) -> Result<()> {
    let zones = ctx
        .client
        .resources()
        .list_clone_resources_attribute(plan_id, "availability_zone")
        .await?;
    output::print_document(&zones, ctx.format)
}

pub async fn delete_cloned(ctx: &Context, plan_id: &str) -> Result<()> {
    ctx.client
        .resources()
        .delete_cloned_resources(plan_id)
        .await?;
    notify(ctx, &format!("Deleting cloned resources of plan {}", plan_id));
    Ok(())
}

pub async fn availability_zones(ctx: &Context) -> Result<()> {
    let zones = ctx.client.resources().list_all_availability_zones().await?;
    output::print_document(&zones, ctx.format)
}
