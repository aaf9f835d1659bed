//! Output formatting for the CLI
//!
//! Records come back from the server as loose attribute maps, so tables are
//! built column by column from attribute names rather than from derived rows.

use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::builder::Builder;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Table,
        }
    }
}

/// Attribute key behind a column header: `Task State` -> `task_state`
pub fn column_key(header: &str) -> String {
    header.to_lowercase().replace(' ', "_")
}

/// Render a value as a table cell
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build a table with one row per item and the given columns
pub fn render_list(items: &[Map<String, Value>], columns: &[&str]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_string()));

    for item in items {
        builder.push_record(columns.iter().map(|column| {
            item.get(&column_key(column))
                .or_else(|| item.get(*column))
                .map(format_value)
                .unwrap_or_default()
        }));
    }

    builder.build().to_string()
}

/// Build a two-column Property/Value table
pub fn render_dict(item: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Property".to_string(), "Value".to_string()]);
    for (key, value) in item {
        builder.push_record([key.clone(), format_value(value)]);
    }
    builder.build().to_string()
}

/// Print a list of records
pub fn print_list(
    items: &[Map<String, Value>],
    columns: &[&str],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No results found".yellow());
            } else {
                println!("{}", render_list(items, columns));
            }
        }
        OutputFormat::Json => print_json(&items)?,
        OutputFormat::Yaml => print_yaml(&items)?,
    }
    Ok(())
}

/// Print a single record
pub fn print_dict(item: &Map<String, Value>, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_dict(item)),
        OutputFormat::Json => print_json(item)?,
        OutputFormat::Yaml => print_yaml(item)?,
    }
    Ok(())
}

/// Print an arbitrary document; tables fall back to pretty JSON
pub fn print_document<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Yaml => print_yaml(data),
        OutputFormat::Table | OutputFormat::Json => print_json(data),
    }
}

/// Print data as pretty-printed JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    print!("{}", yaml);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

// =============================================================================
// Server listings
// =============================================================================

pub const SERVER_TYPE: &str = "OS::Nova::Server";

pub const SERVER_COLUMNS: &[&str] = &["id", "Name", "Status", "Task State", "Power State", "Networks"];

const POWER_STATES: &[&str] = &[
    "NOSTATE",   // 0x00
    "Running",   // 0x01
    "",          // 0x02
    "Paused",    // 0x03
    "Shutdown",  // 0x04
    "",          // 0x05
    "Crashed",   // 0x06
    "Suspended", // 0x07
];

const SERVER_KEY_ALIASES: &[(&str, &str)] = &[
    ("OS-EXT-SRV-ATTR:host", "host"),
    ("OS-EXT-STS:task_state", "task_state"),
    ("OS-EXT-SRV-ATTR:instance_name", "instance_name"),
    ("OS-EXT-STS:power_state", "power_state"),
    ("hostId", "host_id"),
];

/// `label=addr, addr; label2=addr`
pub fn format_networks(addresses: &Value) -> String {
    let Some(networks) = addresses.as_object() else {
        return String::new();
    };

    networks
        .iter()
        .map(|(label, list)| {
            let addrs: Vec<&str> = list
                .as_array()
                .map(|a| {
                    a.iter()
                        .filter_map(|entry| entry.get("addr").and_then(|v| v.as_str()))
                        .collect()
                })
                .unwrap_or_default();
            format!("{}={}", label, addrs.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten server extension attributes into the plain columns of a listing
pub fn translate_server(mut server: Map<String, Value>) -> Map<String, Value> {
    for (from, to) in SERVER_KEY_ALIASES {
        if !server.contains_key(*to) {
            if let Some(value) = server.get(*from).cloned() {
                server.insert(to.to_string(), value);
            }
        }
    }

    let networks = server.get("addresses").map(format_networks).unwrap_or_default();
    server.insert("networks".to_string(), Value::String(networks));

    let power_state = server
        .get("power_state")
        .and_then(|v| v.as_u64())
        .and_then(|i| POWER_STATES.get(i as usize))
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    server.insert("power_state".to_string(), Value::String(power_state));

    if server.get("task_state").map_or(true, Value::is_null) {
        server.insert("task_state".to_string(), Value::from("N/A"));
    }

    server
}
