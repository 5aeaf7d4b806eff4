//! Configuration layer for Kuma Provision.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Validated input paths ([`ValidatedConfig`])
//! - Example configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Input Checks
//!
//! Both `--config` and `--database` are required for a run. They are declared
//! optional at the parser level so that a missing value is reported as a
//! [`ConfigError::MissingRequired`] with a usage hint.
//!
//! Before the database is opened:
//! - The configuration file must exist, be a regular file and be readable.
//! - The database file must exist, be a regular file and be readable and
//!   writable. It is never created.
//!
//! The configuration document itself (the YAML tree) is parsed by
//! [`crate::tree`], not here.

mod cli;
pub mod defaults;
mod error;
mod template;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field, role};
pub use template::default_config_template;
pub use validated::{ValidatedConfig, write_default_config};
