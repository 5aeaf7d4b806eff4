//! Default values for configuration options and row columns.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::tree::Fields;

/// Default output path of the `init` subcommand.
pub const TEMPLATE_PATH: &str = "monitors.yaml";

/// Column holding the owning user of a row.
pub const OWNER_COLUMN: &str = "user_id";

/// Default owner: the first (admin) user.
pub const OWNER_ID: i64 = 1;

/// Column holding the check interval.
pub const INTERVAL_COLUMN: &str = "interval";

/// Default check interval in seconds.
pub const INTERVAL_SECS: i64 = 60;

/// Column holding the retry interval.
pub const RETRY_INTERVAL_COLUMN: &str = "retry_interval";

/// Default retry interval in seconds.
pub const RETRY_INTERVAL_SECS: i64 = 60;

/// Column holding the request timeout.
pub const TIMEOUT_COLUMN: &str = "timeout";

/// Default request timeout in seconds (80% of the interval, as Uptime Kuma does).
pub const TIMEOUT_SECS: i64 = 48;

/// Default columns applied to every created row.
///
/// Independent of monitor type.
#[must_use]
pub fn row_defaults() -> Fields {
    [
        (OWNER_COLUMN, OWNER_ID),
        (INTERVAL_COLUMN, INTERVAL_SECS),
        (RETRY_INTERVAL_COLUMN, RETRY_INTERVAL_SECS),
        (TIMEOUT_COLUMN, TIMEOUT_SECS),
    ]
    .into_iter()
    .collect()
}
