//! Example configuration document written by `init`.

/// Generates an example configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Kuma Provision configuration file
#
# Every node under `monitors` is either a group (`type: group`) that nests
# more nodes under its own `monitors`, or a monitor. All keys of a monitor
# except `ips` are written to the matching column of the `monitor` table.
#
# Rows are matched by name and parent group. Re-running with the same file
# updates rows in place; nodes removed from this file are left untouched.
#
# Each run rewrites a monitor's row: columns it does not set go back to the
# table default, then these are filled in unless set explicitly:
#   user_id: 1, interval: 60, retry_interval: 60, timeout: 48
# Changes made in the UI to those columns are therefore reset on every run.
# Groups get the same values once, when they are created, and are not
# touched afterwards.

# IP variants inherited by top-level nodes (optional)
# ips:
#   v4: 192.0.2.10

monitors:
  web:
    type: group
    # Inherited by every node below that does not declare its own `ips`.
    # One row is written per variant; `$$IP$$` in any text column is
    # replaced by the variant's address. The `v4` row keeps the plain name,
    # other rows are named "<name> - <label>".
    ips:
      v4: 192.0.2.10
      v6: "2001:db8::10"
    monitors:
      frontend:
        type: http
        url: "http://$$IP$$/health"
        maxretries: 3
      ssh:
        type: port
        hostname: "$$IP$$"
        port: 22
        interval: 300

  external:
    type: group
    monitors:
      homepage:
        type: keyword
        url: "https://example.com/"
        keyword: "Example Domain"
        # Declared empty: do not inherit any variants
        ips: {}
"#
    .to_string()
}
