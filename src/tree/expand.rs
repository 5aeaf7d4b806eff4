//! IP variant expansion.
//!
//! One monitor declaration with `n` IP variants becomes `n` rows. Each row
//! gets its own name and a copy of the declared columns with the
//! [`IP_TOKEN`] placeholder replaced by that variant's address.

use super::{FieldValue, Fields, IpSet};

/// Placeholder replaced by a variant's address in every text column.
pub const IP_TOKEN: &str = "$$IP$$";

/// The variant label that keeps the declared name unsuffixed.
pub const CANONICAL_VARIANT: &str = "v4";

/// Returns the row name for a variant of a monitor.
///
/// ```
/// use kuma_provision::tree::variant_name;
///
/// assert_eq!(variant_name("api", "v4"), "api");
/// assert_eq!(variant_name("api", "v6"), "api - v6");
/// ```
#[must_use]
pub fn variant_name(name: &str, label: &str) -> String {
    if label == CANONICAL_VARIANT {
        name.to_string()
    } else {
        format!("{name} - {label}")
    }
}

/// Replaces every occurrence of [`IP_TOKEN`] in every text column.
///
/// Non-text values are copied unchanged.
#[must_use]
pub fn substitute_ip(fields: &Fields, address: &str) -> Fields {
    fields
        .iter()
        .map(|(column, value)| {
            let value = match value {
                FieldValue::Text(s) => FieldValue::Text(s.replace(IP_TOKEN, address)),
                other => other.clone(),
            };
            (column, value)
        })
        .collect()
}

/// Expands a monitor declaration into `(row name, columns)` pairs.
///
/// Without variants (absent or empty set) the declaration maps to a single
/// row with its name and columns unchanged.
#[must_use]
pub fn expand_variants(name: &str, fields: &Fields, ips: Option<&IpSet>) -> Vec<(String, Fields)> {
    match ips {
        Some(ips) if !ips.is_empty() => ips
            .iter()
            .map(|(label, address)| (variant_name(name, label), substitute_ip(fields, address)))
            .collect(),
        _ => vec![(name.to_string(), fields.clone())],
    }
}
