//! Protocol version model: declared support sets, config-version decoding,
//! and compatibility reconciliation.
//!
//! The dispatcher consumes three capabilities from this module:
//!
//! - [`ConfigDecoder`]: configuration payload → version identifier
//! - [`Reconciler`]: (config version, [`PluginInfo`]) → optional
//!   [`Incompatibility`] with detail text
//! - [`greater_than_or_equal`]: strict version ordering, used only by the
//!   `GET` negotiation
//!
//! Default implementations ([`CniVersionDecoder`], [`VersionReconciler`])
//! cover the standard configuration format; plugins with exotic config
//! formats can substitute their own via
//! [`Dispatcher::with_decoder`](crate::dispatch::Dispatcher::with_decoder).

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::constants::{ALL_VERSIONS, CURRENT_VERSION, DEFAULT_CONFIG_VERSION};
use crate::error::{Error, Result};

// =============================================================================
// Plugin Version Info
// =============================================================================

/// The ordered set of protocol versions a plugin declares it supports.
///
/// Declaration order is significant: `GET` negotiation picks the *first*
/// declared version that satisfies the ordering test, not the highest. The
/// set is supplied once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    supported: Vec<String>,
}

/// JSON document written to stdout by the `VERSION` command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionInfoDoc<'a> {
    cni_version: &'a str,
    supported_versions: &'a [String],
}

impl PluginInfo {
    /// Returns the declared versions in declaration order.
    pub fn supported_versions(&self) -> &[String] {
        &self.supported
    }

    /// Returns true if `version` is one of the declared versions.
    pub fn supports(&self, version: &str) -> bool {
        self.supported.iter().any(|v| v == version)
    }

    /// Writes the version info document to `writer` as JSON.
    ///
    /// This is the entire output of the `VERSION` command.
    pub fn encode(&self, writer: &mut dyn Write) -> Result<()> {
        let doc = VersionInfoDoc {
            cni_version: CURRENT_VERSION,
            supported_versions: &self.supported,
        };
        serde_json::to_writer(writer, &doc).map_err(Error::VersionEncode)
    }
}

/// Declares support for exactly the given versions, preserving their order.
pub fn plugin_supports(versions: &[&str]) -> PluginInfo {
    PluginInfo {
        supported: versions.iter().map(|v| (*v).to_string()).collect(),
    }
}

/// Declares support for every released protocol version.
pub fn all_versions() -> PluginInfo {
    plugin_supports(ALL_VERSIONS)
}

// =============================================================================
// Config Version Decoding
// =============================================================================

/// Decodes a configuration payload into its protocol version identifier.
pub trait ConfigDecoder {
    /// Extracts the configuration's version; fails if the payload cannot
    /// be decoded at all.
    fn decode(&self, payload: &[u8]) -> Result<String>;
}

/// Default decoder: reads the `cniVersion` field of the standard
/// configuration document.
///
/// A payload without the field (or with an empty value) predates versioned
/// configurations and decodes to
/// [`DEFAULT_CONFIG_VERSION`](crate::constants::DEFAULT_CONFIG_VERSION).
#[derive(Debug, Clone, Copy, Default)]
pub struct CniVersionDecoder;

#[derive(Deserialize)]
struct VersionedConfig {
    #[serde(default, rename = "cniVersion")]
    cni_version: String,
}

impl ConfigDecoder for CniVersionDecoder {
    fn decode(&self, payload: &[u8]) -> Result<String> {
        let conf: VersionedConfig =
            serde_json::from_slice(payload).map_err(|e| Error::VersionDecode(e.to_string()))?;
        if conf.cni_version.is_empty() {
            Ok(DEFAULT_CONFIG_VERSION.to_string())
        } else {
            Ok(conf.cni_version)
        }
    }
}

// =============================================================================
// Compatibility Reconciliation
// =============================================================================

/// The outcome of a failed compatibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incompatibility {
    detail: String,
}

impl Incompatibility {
    /// Creates an incompatibility with the given detail text.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Detail text embedded verbatim in the structured error.
    pub fn details(&self) -> &str {
        &self.detail
    }
}

/// Decides whether a configuration version is acceptable to a plugin.
pub trait Reconciler {
    /// Returns `None` when compatible, or the incompatibility otherwise.
    fn check(&self, config_version: &str, plugin_info: &PluginInfo) -> Option<Incompatibility>;
}

/// Default reconciler: the configuration version must be a member of the
/// plugin's declared version set.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionReconciler;

impl Reconciler for VersionReconciler {
    fn check(&self, config_version: &str, plugin_info: &PluginInfo) -> Option<Incompatibility> {
        if plugin_info.supports(config_version) {
            None
        } else {
            Some(Incompatibility::new(format!(
                "config is {:?}, plugin supports {:?}",
                config_version,
                plugin_info.supported_versions()
            )))
        }
    }
}

// =============================================================================
// Version Ordering
// =============================================================================

/// Parses a version string into up to three numeric dot components.
///
/// Missing components default to zero, so `"0.4"` parses as `(0, 4, 0)`.
/// Empty strings, non-numeric components, and more than three components
/// are errors.
fn parse_version(version: &str) -> Result<(u32, u32, u32)> {
    let malformed = |reason: &str| Error::MalformedVersion {
        version: version.to_string(),
        reason: reason.to_string(),
    };

    if version.is_empty() {
        return Err(malformed("empty version string"));
    }
    let split: Vec<&str> = version.split('.').collect();
    if split.len() > 3 {
        return Err(malformed("more than three components"));
    }
    let mut parts = [0u32; 3];
    for (slot, component) in parts.iter_mut().zip(&split) {
        *slot = component
            .parse()
            .map_err(|_| malformed("non-numeric component"))?;
    }
    Ok((parts[0], parts[1], parts[2]))
}

/// Returns true if `version` is greater than or equal to `other`.
///
/// Comparison is lexicographic over (major, minor, micro). Either side
/// failing to parse is an error, not an ordering.
pub fn greater_than_or_equal(version: &str, other: &str) -> Result<bool> {
    Ok(parse_version(version)? >= parse_version(other)?)
}
