//! Error types for the plugin invocation layer.
//!
//! Two shapes live here: the internal [`Error`] enum used throughout the
//! crate, and the external [`StructuredError`] that crosses the process
//! boundary as JSON on stdout. Internal errors convert into the external
//! shape at exactly one point ([`StructuredError::from`]); an error that is
//! already structured passes through that conversion unchanged.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::constants::{ERR_CODE_GENERIC, ERR_CODE_INCOMPATIBLE_VERSION};

/// Result type alias for invocation-layer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing and dispatching an invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Invocation Errors
    // =========================================================================
    /// One or more required `CNI_*` variables were absent.
    ///
    /// A diagnostic line naming each missing variable is written to stderr
    /// before this error is returned.
    #[error("required env variables missing")]
    MissingEnvVars,

    /// The configuration document could not be read from stdin.
    #[error("error reading from stdin: {0}")]
    StdinRead(io::Error),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The configuration document is not parseable JSON.
    #[error("error reading network config: {0}")]
    InvalidConfig(String),

    /// The configuration document carries no `name` field (or an empty one).
    #[error("missing network name")]
    MissingNetworkName,

    // =========================================================================
    // Version Errors
    // =========================================================================
    /// The configuration version could not be decoded from the payload.
    #[error("error decoding version from network config: {0}")]
    VersionDecode(String),

    /// A version string did not parse as dotted numeric components.
    #[error("invalid version {version:?}: {reason}")]
    MalformedVersion { version: String, reason: String },

    /// Writing the version info document to stdout failed.
    #[error("error encoding version info: {0}")]
    VersionEncode(serde_json::Error),

    // =========================================================================
    // Dispatch Errors
    // =========================================================================
    /// The `CNI_COMMAND` value is not one of the recognized operations.
    #[error("unknown CNI_COMMAND: {0}")]
    UnknownCommand(String),

    /// A failure reported by a plugin-supplied handler.
    #[error("{0}")]
    Plugin(String),

    /// An error that already carries its external representation.
    ///
    /// Passes through [`StructuredError::from`] unwrapped so handler-chosen
    /// codes and details survive to the process boundary.
    #[error(transparent)]
    Structured(#[from] StructuredError),
}

// =============================================================================
// Structured Error (external shape)
// =============================================================================

/// The one externally visible error representation.
///
/// Serialized to stdout as `{"code": ..., "msg": ..., "details": ...}` with
/// `details` omitted when absent. Exactly one of these (or none) results from
/// a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredError {
    /// Numeric error code; see [`crate::constants::ERR_CODE_GENERIC`] and
    /// [`crate::constants::ERR_CODE_INCOMPATIBLE_VERSION`].
    pub code: u32,
    /// Human-readable message.
    pub msg: String,
    /// Optional opaque detail text (e.g. the version-negotiation detail).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl StructuredError {
    /// Creates a generic failure with [`ERR_CODE_GENERIC`].
    pub fn generic(msg: impl Into<String>) -> Self {
        Self {
            code: ERR_CODE_GENERIC,
            msg: msg.into(),
            details: None,
        }
    }

    /// Creates an incompatible-version failure with
    /// [`ERR_CODE_INCOMPATIBLE_VERSION`].
    pub fn incompatible_version(msg: impl Into<String>, details: Option<String>) -> Self {
        Self {
            code: ERR_CODE_INCOMPATIBLE_VERSION,
            msg: msg.into(),
            details,
        }
    }

    /// Serializes the error as pretty-printed JSON followed by a newline.
    ///
    /// This is the representation orchestrators parse from the plugin's
    /// stdout after a non-zero exit.
    pub fn print(&self, writer: &mut dyn Write) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        writeln!(writer, "{json}")
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}; {}", self.msg, details),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl std::error::Error for StructuredError {}

impl From<Error> for StructuredError {
    /// The single wrap-or-passthrough boundary.
    ///
    /// An already-structured error is returned verbatim; anything else is
    /// wrapped as a generic failure carrying its display text.
    fn from(err: Error) -> Self {
        match err {
            Error::Structured(structured) => structured,
            other => Self::generic(other.to_string()),
        }
    }
}
