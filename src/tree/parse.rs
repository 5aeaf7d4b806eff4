//! YAML document parsing into a [`ConfigTree`].

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::{ConfigNode, ConfigTree, FieldValue, Fields, IpSet, NodeKind, TreeError};

/// The `type` value that marks a node as a group.
pub const GROUP_TYPE: &str = "group";

const MONITORS_KEY: &str = "monitors";
const IPS_KEY: &str = "ips";
const TYPE_KEY: &str = "type";

/// Root of the document as seen by serde.
///
/// Nodes below the root are open mappings and are converted by hand.
#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    /// Root-level IP variants
    #[serde(default)]
    ips: Option<Mapping>,

    /// Top-level nodes
    #[serde(default)]
    monitors: Option<Mapping>,
}

pub(super) fn parse_document(content: &str) -> Result<ConfigTree, TreeError> {
    if content.trim().is_empty() {
        return Ok(ConfigTree::default());
    }

    let raw: Option<RawDocument> = serde_yaml::from_str(content)?;
    let raw = raw.unwrap_or_default();

    let ips = raw.ips.as_ref().map(|m| parse_ips(m, "")).transpose()?;
    let nodes = match raw.monitors {
        Some(ref monitors) => parse_nodes(monitors, "")?,
        None => Vec::new(),
    };

    Ok(ConfigTree { ips, nodes })
}

fn parse_nodes(mapping: &Mapping, parent_path: &str) -> Result<Vec<ConfigNode>, TreeError> {
    mapping
        .iter()
        .map(|(key, value)| {
            let name = key_to_string(key)
                .ok_or_else(|| TreeError::invalid(parent_path, "node names must be scalars"))?;
            let path = child_path(parent_path, &name);
            let body = value
                .as_mapping()
                .ok_or_else(|| TreeError::invalid(&path, "expected a mapping"))?;
            parse_node(name, body, &path)
        })
        .collect()
}

fn parse_node(name: String, body: &Mapping, path: &str) -> Result<ConfigNode, TreeError> {
    let ips = match body.get(IPS_KEY) {
        None => None,
        Some(Value::Null) => Some(IpSet::new()),
        Some(Value::Mapping(m)) => Some(parse_ips(m, path)?),
        Some(_) => return Err(TreeError::invalid(path, "`ips` must be a mapping")),
    };

    let kind = match body.get(TYPE_KEY) {
        Some(Value::String(t)) if t == GROUP_TYPE => NodeKind::Group {
            children: parse_children(body, path)?,
        },
        Some(_) => parse_monitor(body, path)?,
        None => return Err(TreeError::invalid(path, "missing `type`")),
    };

    Ok(ConfigNode { name, ips, kind })
}

fn parse_children(body: &Mapping, path: &str) -> Result<Vec<ConfigNode>, TreeError> {
    match body.get(MONITORS_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(m)) => parse_nodes(m, path),
        Some(_) => Err(TreeError::invalid(path, "`monitors` must be a mapping")),
    }
}

fn parse_monitor(body: &Mapping, path: &str) -> Result<NodeKind, TreeError> {
    if body.contains_key(MONITORS_KEY) {
        return Err(TreeError::invalid(
            path,
            "`monitors` is only allowed on nodes with `type: group`",
        ));
    }

    let mut fields = Fields::new();
    for (key, value) in body {
        let column = key_to_string(key)
            .ok_or_else(|| TreeError::invalid(path, "column names must be scalars"))?;
        if column == IPS_KEY {
            continue;
        }
        let value = scalar_to_field(value).ok_or_else(|| {
            TreeError::invalid(path, format!("column `{column}` must be a scalar value"))
        })?;
        fields.set(column, value);
    }

    Ok(NodeKind::Monitor { fields })
}

fn parse_ips(mapping: &Mapping, path: &str) -> Result<IpSet, TreeError> {
    mapping
        .iter()
        .map(|(key, value)| {
            let label = key_to_string(key)
                .ok_or_else(|| TreeError::invalid(path, "ip labels must be scalars"))?;
            let address = value.as_str().ok_or_else(|| {
                TreeError::invalid(path, format!("ip `{label}` must be a string"))
            })?;
            Ok((label, address.to_string()))
        })
        .collect()
}

fn scalar_to_field(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Null => Some(FieldValue::Null),
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(FieldValue::Integer)
            .or_else(|| n.as_f64().map(FieldValue::Real)),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
