//! Argument parsing helpers
//!
//! Flags like `--resources type=OS::Nova::Server,id=...` or
//! `-p DEFAULT=debug:true` carry small structured values; these helpers turn
//! them into typed values or JSON before any request is made.

use crate::error::{ConveyorError, Result};
use crate::manager::{AzMap, ResourceRef};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable that overrides `--all-tenants`
pub const ALL_TENANTS_ENV: &str = "ALL_TENANTS";

/// Fields whose value may name a local file to inline
const FILE_FIELDS: &[&str] = &["user_data", "public_key"];

const CONFIG_VALUE_HINT: &str = "Input configure key value must be like 'v' or 'k:v' or 'v1,v2'";

/// `src_az:dst_az[,src_az:dst_az]`
pub fn parse_destination(destination: &str) -> Result<AzMap> {
    let mut map = AzMap::new();
    for item in destination.split(',') {
        let parts: Vec<&str> = item.split(':').collect();
        if parts.len() != 2 {
            return Err(ConveyorError::command(
                "Invalid format. destination format is <src_az>:<dst_az>[,<src_az>:<dst_az>]",
            ));
        }
        map.insert(parts[0].to_string(), parts[1].to_string());
    }
    Ok(map)
}

/// `src_az=dst_az`
pub fn parse_az_map(az_map: &str) -> Result<AzMap> {
    match az_map.split('=').collect::<Vec<_>>().as_slice() {
        [src, dst] if !src.is_empty() => {
            let mut map = AzMap::new();
            map.insert(src.to_string(), dst.to_string());
            Ok(map)
        }
        _ => Err(ConveyorError::command(
            "Invalid format. az map format is <src_az>=<dst_az>",
        )),
    }
}

pub fn require_uuid(value: &str, name: &str) -> Result<()> {
    uuid::Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ConveyorError::command(format!("Invalid {} '{}': must be a UUID.", name, value)))
}

/// `--all-tenants` value, overridden by `ALL_TENANTS` when it is set
pub fn effective_all_tenants(flag: u8) -> Result<u8> {
    all_tenants_from(std::env::var(ALL_TENANTS_ENV).ok(), flag)
}

fn all_tenants_from(env: Option<String>, flag: u8) -> Result<u8> {
    match env {
        Some(value) => value.trim().parse().map_err(|_| {
            ConveyorError::command(format!("{} must be an integer, got '{}'", ALL_TENANTS_ENV, value))
        }),
        None => Ok(flag),
    }
}

/// Parse `type=<resource_type>,id=<uuid>` arguments.
///
/// `obj_type` / `obj_id` are accepted as key spellings too. Every type must
/// be one the service reported as supported.
pub fn extract_resource_argument(args: &[String], known_types: &[String]) -> Result<Vec<ResourceRef>> {
    args.iter()
        .map(|arg| {
            let err = || {
                ConveyorError::command(format!(
                    "Invalid resource argument '{}'. Resource arguments must contain both \
                     type and id! Eg: --resources type=OS::Nova::Server,id=xxxxx.",
                    arg
                ))
            };

            let mut resource_type = String::new();
            let mut id = String::new();
            for param in arg.split(',') {
                let (key, value) = param.split_once('=').ok_or_else(err)?;
                match key {
                    "type" | "obj_type" => resource_type = value.to_string(),
                    "id" | "obj_id" => id = value.to_string(),
                    _ => return Err(err()),
                }
            }

            if resource_type.is_empty() || id.is_empty() {
                return Err(err());
            }

            if !known_types.contains(&resource_type) {
                return Err(ConveyorError::command(
                    "Type unsupported! You can get the types by the command: \
                     conveyor resource-type-list",
                ));
            }

            require_uuid(&id, "id")?;
            Ok(ResourceRef::new(resource_type, id))
        })
        .collect()
}

/// Split on `sep` outside quotes and brackets
fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for c in s.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                '[' | '{' | '(' => {
                    depth += 1;
                    current.push(c);
                }
                ']' | '}' | ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                c if c == sep && depth == 0 => parts.push(std::mem::take(&mut current)),
                _ => current.push(c),
            },
        }
    }
    parts.push(current);
    parts
}

fn unquote(s: &str) -> Option<&str> {
    let s = s.trim();
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return Some(&s[1..s.len() - 1]);
        }
    }
    None
}

/// Decode a bare argument value: quoted text stays text, JSON literals are
/// decoded, anything else is a string.
fn parse_scalar(raw: &str) -> Value {
    let raw = raw.trim();
    if let Some(inner) = unquote(raw) {
        return Value::String(inner.to_string());
    }
    match raw {
        "True" => return Value::Bool(true),
        "False" => return Value::Bool(false),
        "None" => return Value::Null,
        _ => {}
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse `--resource action=edit,resource_id=server_0,name=web` arguments
/// into update directives. `user_data` and `public_key` values starting with
/// `/` are read from that file.
pub fn extract_plan_resource_update_args(args: &[String]) -> Result<Vec<Map<String, Value>>> {
    if args.is_empty() {
        return Err(ConveyorError::command("'resource' argument must be provided."));
    }

    args.iter()
        .map(|items| {
            let invalid = |reason: &str| {
                ConveyorError::command(format!("Invalid resource: {}. {}", items, reason))
            };

            let mut attrs = Map::new();
            for pair in split_top_level(items, ',') {
                if pair.trim().is_empty() {
                    continue;
                }
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| invalid(&format!("'{}' is not a key=value pair", pair.trim())))?;
                let key = unquote(key).unwrap_or(key.trim());
                if key.is_empty() {
                    return Err(invalid("empty key"));
                }
                attrs.insert(key.to_string(), parse_scalar(value));
            }

            for field in FILE_FIELDS {
                if let Some(Value::String(path)) = attrs.get(*field) {
                    if path.starts_with('/') {
                        let content = std::fs::read_to_string(Path::new(path))?;
                        attrs.insert(field.to_string(), Value::String(content));
                    }
                }
            }

            Ok(attrs)
        })
        .collect()
}

/// `k:v[,k:v]` or `{k:v}` becomes a map, `a,b` a list, anything else a string
pub fn translate_string_dict(s: &str) -> Result<Value> {
    if s.contains(':') {
        let body = s
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(s);

        let mut map = Map::new();
        for pair in split_top_level(body, ',') {
            if pair.trim().is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once(':')
                .ok_or_else(|| ConveyorError::command(CONFIG_VALUE_HINT))?;
            let key = unquote(key).unwrap_or(key.trim());
            if key.is_empty() {
                return Err(ConveyorError::command(CONFIG_VALUE_HINT));
            }
            map.insert(key.to_string(), parse_scalar(value));
        }
        Ok(Value::Object(map))
    } else if s.contains(',') {
        Ok(Value::Array(
            s.split(',').map(|v| Value::String(v.to_string())).collect(),
        ))
    } else {
        Ok(Value::String(s.to_string()))
    }
}

/// `["k=v", ...]` into a map; later keys win
pub fn args_array_to_dict(items: &[String]) -> Result<BTreeMap<String, String>> {
    items
        .iter()
        .map(|item| match item.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(ConveyorError::command(format!(
                "Invalid key/value pair '{}'. Expected key=value.",
                item
            ))),
        })
        .collect()
}
