//! Invocation reading: extracting one operation request from the environment
//! and standard input.
//!
//! The environment is accessed through an injected lookup closure rather than
//! [`std::env::var`] directly, so tests can supply synthetic invocations
//! without touching real process state.

use std::io::{Read, Write};
use tracing::debug;

use crate::constants::{
    CMD_ADD, CMD_DEL, CMD_GET, CMD_VERSION, CNI_ARGS, CNI_COMMAND, CNI_CONTAINERID, CNI_IFNAME,
    CNI_NETNS, CNI_PATH,
};
use crate::error::{Error, Result};

// =============================================================================
// Invocation
// =============================================================================

/// The fully parsed representation of one incoming request.
///
/// Constructed once per process invocation by [`read_invocation`] and
/// read-only afterward. `stdin_data` is the complete, unparsed configuration
/// document (empty for the `VERSION` command, which reads no input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Container identifier from `CNI_CONTAINERID`.
    pub container_id: String,
    /// Network namespace path from `CNI_NETNS`.
    pub netns: String,
    /// Interface name from `CNI_IFNAME`.
    pub ifname: String,
    /// Opaque plugin arguments from `CNI_ARGS`.
    pub args: String,
    /// Plugin search path from `CNI_PATH`.
    pub path: String,
    /// Raw configuration document read from stdin.
    pub stdin_data: Vec<u8>,
}

// =============================================================================
// Reader
// =============================================================================

/// Extracts the command and its [`Invocation`] from an environment lookup
/// and an input stream.
///
/// Every variable is read regardless of command, but a missing value only
/// fails the invocation when the variable is required for the command
/// actually supplied (`CNI_COMMAND` itself is always required; a variable's
/// requiredness under an unrecognized command is unknown, so its absence is
/// tolerated). One diagnostic line per missing required variable is written
/// to `stderr` before the single failure is returned.
///
/// For the `VERSION` command `stdin` is not read; the command must succeed
/// without any piped input.
pub fn read_invocation(
    getenv: &dyn Fn(&str) -> Option<String>,
    stdin: &mut dyn Read,
    stderr: &mut dyn Write,
) -> Result<(String, Invocation)> {
    let cmd = getenv(CNI_COMMAND).unwrap_or_default();

    let mut missing = false;
    if cmd.is_empty() {
        let _ = writeln!(stderr, "{CNI_COMMAND} env variable missing");
        missing = true;
    }

    let mut container_id = String::new();
    let mut netns = String::new();
    let mut ifname = String::new();
    let mut args = String::new();
    let mut path = String::new();

    // Requiredness table, command × variable. CNI_NETNS is optional for DEL
    // because the namespace may already be gone; CNI_ARGS is never required.
    let vars: [(&str, &mut String, &[&str]); 5] = [
        (CNI_CONTAINERID, &mut container_id, &[CMD_ADD, CMD_GET, CMD_DEL]),
        (CNI_NETNS, &mut netns, &[CMD_ADD, CMD_GET]),
        (CNI_IFNAME, &mut ifname, &[CMD_ADD, CMD_GET, CMD_DEL]),
        (CNI_ARGS, &mut args, &[]),
        (CNI_PATH, &mut path, &[CMD_ADD, CMD_GET, CMD_DEL]),
    ];

    for (name, slot, required_for) in vars {
        if let Some(value) = getenv(name) {
            *slot = value;
        }
        if slot.is_empty() && required_for.contains(&cmd.as_str()) {
            let _ = writeln!(stderr, "{name} env variable missing");
            missing = true;
        }
    }

    if missing {
        return Err(Error::MissingEnvVars);
    }

    let mut stdin_data = Vec::new();
    if cmd != CMD_VERSION {
        stdin.read_to_end(&mut stdin_data).map_err(Error::StdinRead)?;
    }

    debug!(
        command = %cmd,
        container_id = %container_id,
        payload_bytes = stdin_data.len(),
        "parsed invocation"
    );

    Ok((
        cmd,
        Invocation {
            container_id,
            netns,
            ifname,
            args,
            path,
            stdin_data,
        },
    ))
}
