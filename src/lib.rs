//! # cniskel
//!
//! **Skeleton for CNI plugins**
//!
//! This crate provides the invocation layer of a container network (CNI)
//! plugin: argument parsing, configuration validation, protocol version
//! negotiation, and dispatch to plugin-supplied operation handlers. It
//! handles the single-shot process convention only - the actual network
//! setup and teardown live in the handlers the plugin author supplies.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                            cniskel                                 │
//! ├────────────────────────────────────────────────────────────────────┤
//! │   CNI_COMMAND / CNI_CONTAINERID / ... env vars       stdin (JSON)  │
//! │                  │                                        │        │
//! │        ┌─────────▼────────────────────────────────────────▼─────┐  │
//! │        │  Invocation Reader   (requiredness table per command)  │  │
//! │        └─────────────────────────────┬──────────────────────────┘  │
//! │        ┌─────────────────────────────▼──────────────────────────┐  │
//! │        │  Config Validator    (non-empty "name" field)          │  │
//! │        └─────────────────────────────┬──────────────────────────┘  │
//! │        ┌─────────────────────────────▼──────────────────────────┐  │
//! │        │  Dispatcher                                            │  │
//! │        │    ADD/DEL → decode version → reconcile → handler      │  │
//! │        │    GET     → floor check → first ≥ declared version    │  │
//! │        │    VERSION → encode supported versions to stdout       │  │
//! │        └─────────────────────────────┬──────────────────────────┘  │
//! │        ┌─────────────────────────────▼──────────────────────────┐  │
//! │        │  Error Encoder   {"code", "msg", "details"} → stdout   │  │
//! │        └────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Invocation Model
//!
//! One process execution serves exactly one operation. The orchestrator
//! sets the `CNI_*` environment variables, pipes the configuration document
//! to stdin, and reads either version info or a structured error from
//! stdout. There is no shared mutable state, no retry, and no concurrency:
//! the process itself is the unit of isolation.
//!
//! # Version Negotiation
//!
//! `ADD` and `DEL` decode the configuration's version and require the
//! plugin's reconciler to accept it. `GET` is stricter because it entered
//! the protocol late: the configuration version must clear a fixed floor,
//! and the plugin's declared versions are scanned **in declaration order**
//! for the first one at or above the configuration version. Declaration
//! order is the tie-break; the first match wins, never the "best".
//!
//! # Example
//!
//! ```rust,ignore
//! use cniskel::{plugin_main, all_versions, Invocation};
//!
//! fn main() {
//!     plugin_main(
//!         |inv: &Invocation| cmd_add(inv),
//!         |inv: &Invocation| cmd_get(inv),
//!         |inv: &Invocation| cmd_del(inv),
//!         &all_versions(),
//!     );
//! }
//! ```

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod invocation;
pub mod version;

// Re-exports
pub use config::validate_config;
pub use constants::*;
pub use dispatch::{plugin_main, plugin_main_with_error, CmdHandler, Dispatcher};
pub use error::{Error, Result, StructuredError};
pub use invocation::{read_invocation, Invocation};
pub use version::{
    all_versions, greater_than_or_equal, plugin_supports, CniVersionDecoder, ConfigDecoder,
    Incompatibility, PluginInfo, Reconciler, VersionReconciler,
};
