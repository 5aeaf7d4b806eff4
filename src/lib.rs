//! Kuma Provision: declarative monitor provisioning
//!
//! A library for reconciling a YAML tree of monitor groups and monitors
//! against the `monitor` table of an Uptime Kuma SQLite database.

pub mod config;
pub mod reconcile;
pub mod store;
pub mod tree;
