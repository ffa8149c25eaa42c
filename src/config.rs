//! Minimal configuration validation.
//!
//! Runs once per invocation, before any operation-specific branching, and is
//! independent of the plugin's own configuration schema: only the one field
//! every configuration document must carry is checked.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize)]
struct MinimalConfig {
    #[serde(default)]
    name: String,
}

/// Checks that the payload parses as a configuration document with a
/// non-empty `name` field.
///
/// Skipped for the `VERSION` command, which carries no payload.
pub fn validate_config(payload: &[u8]) -> Result<()> {
    let conf: MinimalConfig =
        serde_json::from_slice(payload).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    if conf.name.is_empty() {
        return Err(Error::MissingNetworkName);
    }
    Ok(())
}
