//! # CNI Invocation Constants
//!
//! Defines the environment-variable names, command strings, error codes, and
//! protocol version constants for the plugin invocation layer. These values
//! are the **single source of truth** for the wire-level compatibility
//! contract with container orchestrators.
//!
//! ## Compatibility Rationale
//!
//! Every constant in this module is part of the externally observable CNI
//! convention: orchestrators set the `CNI_*` variables by name, parse the
//! numeric error codes, and compare protocol version strings. Changing any
//! value here breaks interoperability with existing runtimes.
//!
//! ## Cross-References
//!
//! - [`crate::invocation`]: Uses the env-var names and command strings
//! - [`crate::error`]: Uses the error codes
//! - [`crate::version`]: Uses the protocol version constants
//! - [`crate::dispatch`]: Uses the GET negotiation floor

// =============================================================================
// Environment Variables
// =============================================================================
//
// The orchestrator passes the operation and its arguments through these
// variables; the configuration document itself arrives on stdin.
// =============================================================================

/// The operation to perform: `ADD`, `GET`, `DEL`, or `VERSION`.
///
/// Always required. An empty or absent value fails the invocation before
/// any other processing.
pub const CNI_COMMAND: &str = "CNI_COMMAND";

/// Unique identifier of the container the operation applies to.
///
/// Required for `ADD`, `GET`, and `DEL`.
pub const CNI_CONTAINERID: &str = "CNI_CONTAINERID";

/// Path to the container's network namespace (e.g. `/proc/1234/ns/net`).
///
/// Required for `ADD` and `GET`; optional for `DEL` because the namespace
/// may already be gone by teardown time.
pub const CNI_NETNS: &str = "CNI_NETNS";

/// Name of the interface to create/inspect/remove inside the container.
///
/// Required for `ADD`, `GET`, and `DEL`.
pub const CNI_IFNAME: &str = "CNI_IFNAME";

/// Extra `key=value;key=value` arguments passed through to the plugin.
///
/// Always optional; the invocation layer treats it as an opaque string.
pub const CNI_ARGS: &str = "CNI_ARGS";

/// Colon-separated list of directories to search for plugin executables.
///
/// Required for `ADD`, `GET`, and `DEL`.
pub const CNI_PATH: &str = "CNI_PATH";

// =============================================================================
// Commands
// =============================================================================

/// Set up the container's network.
pub const CMD_ADD: &str = "ADD";

/// Query the current network state of the container.
pub const CMD_GET: &str = "GET";

/// Tear down the container's network.
pub const CMD_DEL: &str = "DEL";

/// Report the plugin's supported protocol versions.
///
/// This command takes no configuration document: stdin is never read.
pub const CMD_VERSION: &str = "VERSION";

// =============================================================================
// Error Codes
// =============================================================================
//
// The externally visible error JSON carries one of these codes. Orchestrators
// branch on the incompatible-version code to decide whether to retry with a
// different configuration version.
// =============================================================================

/// Generic failure code used for every error without a more specific code.
pub const ERR_CODE_GENERIC: u32 = 100;

/// The configuration version and the plugin's supported versions do not
/// overlap (or the requested operation is not available at that version).
pub const ERR_CODE_INCOMPATIBLE_VERSION: u32 = 1;

// =============================================================================
// Protocol Versions
// =============================================================================

/// The protocol version this invocation layer implements.
///
/// Reported in the `cniVersion` field of the `VERSION` output.
pub const CURRENT_VERSION: &str = "0.4.0";

/// Version a configuration document is assumed to carry when it omits the
/// `cniVersion` field. Old documents predate the field, so absence means the
/// oldest version rather than an error.
pub const DEFAULT_CONFIG_VERSION: &str = "0.1.0";

/// The protocol version that introduced the `GET` command.
///
/// Configurations below this version can never negotiate `GET`, regardless
/// of what the plugin declares.
pub const GET_MIN_VERSION: &str = "0.4.0";

/// Every released protocol version, oldest first.
pub const ALL_VERSIONS: &[&str] = &["0.1.0", "0.2.0", "0.3.0", "0.4.0"];
