//! Configuration document model.
//!
//! This module provides types and functions for:
//! - The parsed monitor tree ([`ConfigTree`], [`ConfigNode`], [`NodeKind`])
//! - Open column bags and their values ([`Fields`], [`FieldValue`])
//! - Per-node IP variant sets ([`IpSet`])
//! - Expanding one monitor declaration into per-variant rows ([`expand_variants`])
//!
//! # Document Shape
//!
//! ```yaml
//! ips:                 # optional, inherited by top-level nodes
//!   v4: 192.0.2.10
//! monitors:
//!   web:
//!     type: group
//!     monitors:
//!       frontend:
//!         type: http
//!         url: http://$$IP$$/health
//! ```
//!
//! A node whose `type` is `group` nests further nodes under `monitors`.
//! Every other node is a monitor; all of its keys except `ips` become
//! columns of the row written for it.

mod error;
mod expand;
mod parse;
mod value;

#[cfg(test)]
mod expand_tests;

pub use error::TreeError;
pub use expand::{CANONICAL_VARIANT, IP_TOKEN, expand_variants, substitute_ip, variant_name};
pub use parse::GROUP_TYPE;
pub use value::{FieldValue, Fields, IpSet};

use std::path::Path;

/// A parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    /// IP variants declared at the document root.
    ///
    /// Seeds the inherited set of top-level nodes that do not declare their own.
    pub ips: Option<IpSet>,

    /// Top-level nodes in document order.
    pub nodes: Vec<ConfigNode>,
}

/// A single group or monitor declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNode {
    /// The mapping key the node was declared under.
    ///
    /// Unique among siblings only.
    pub name: String,

    /// IP variants declared directly on this node.
    ///
    /// `None` means "not declared" (inherit from the nearest ancestor);
    /// `Some` with an empty set means "declared empty" (do not inherit).
    pub ips: Option<IpSet>,

    /// Group or monitor payload.
    pub kind: NodeKind,
}

/// Payload of a [`ConfigNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A group nesting further nodes.
    Group {
        /// Child nodes in document order.
        children: Vec<ConfigNode>,
    },
    /// A monitor leaf.
    Monitor {
        /// Declared columns, including `type`.
        fields: Fields,
    },
}

impl ConfigNode {
    /// Resolves the IP variants that apply to this node.
    ///
    /// A node's own declaration always wins, even when empty.
    #[must_use]
    pub fn effective_ips<'a>(&'a self, inherited: Option<&'a IpSet>) -> Option<&'a IpSet> {
        match &self.ips {
            Some(own) => Some(own),
            None => inherited,
        }
    }
}

impl ConfigTree {
    /// Loads a configuration document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the document is invalid.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let content = std::fs::read_to_string(path).map_err(|e| TreeError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses a configuration document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a node is invalid.
    pub fn parse(content: &str) -> Result<Self, TreeError> {
        parse::parse_document(content)
    }

    /// Counts groups and monitor declarations in the whole tree.
    ///
    /// Monitor declarations are counted before variant expansion.
    #[must_use]
    pub fn count(&self) -> (usize, usize) {
        fn walk(nodes: &[ConfigNode], totals: &mut (usize, usize)) {
            for node in nodes {
                match &node.kind {
                    NodeKind::Group { children } => {
                        totals.0 += 1;
                        walk(children, totals);
                    }
                    NodeKind::Monitor { .. } => totals.1 += 1,
                }
            }
        }

        let mut totals = (0, 0);
        walk(&self.nodes, &mut totals);
        totals
    }
}
