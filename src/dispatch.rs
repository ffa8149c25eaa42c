//! Command dispatch: the state machine tying invocation reading, config
//! validation, version negotiation, and the plugin-supplied handlers
//! together.
//!
//! Each process execution is one transition from start to either "handler
//! invoked successfully" or "failed with exactly one structured error". No
//! state persists across invocations and no failure is retried.

use std::io::{self, Read, Write};
use tracing::{debug, error};

use crate::config::validate_config;
use crate::constants::{CMD_ADD, CMD_DEL, CMD_GET, CMD_VERSION, GET_MIN_VERSION};
use crate::error::{Error, Result, StructuredError};
use crate::invocation::{read_invocation, Invocation};
use crate::version::{
    greater_than_or_equal, CniVersionDecoder, ConfigDecoder, PluginInfo, Reconciler,
    VersionReconciler,
};

/// A plugin-supplied operation handler.
///
/// One each for `ADD`, `GET`, and `DEL`; the `VERSION` command needs none.
/// An error returned as [`Error::Structured`] crosses the process boundary
/// verbatim; any other error is wrapped as a generic structured error.
pub type CmdHandler<'h> = &'h mut dyn FnMut(&Invocation) -> Result<()>;

// =============================================================================
// Dispatcher
// =============================================================================

/// Routes one invocation to the matching plugin handler.
///
/// All process-global inputs (environment, stdin, stdout, stderr) are
/// injected so tests can drive the full dispatch path with synthetic
/// invocations. The version decoder and reconciler default to the standard
/// implementations and can be substituted for plugins with non-standard
/// configuration formats.
pub struct Dispatcher<'a> {
    getenv: Box<dyn Fn(&str) -> Option<String> + 'a>,
    stdin: Box<dyn Read + 'a>,
    stdout: Box<dyn Write + 'a>,
    stderr: Box<dyn Write + 'a>,
    decoder: Box<dyn ConfigDecoder + 'a>,
    reconciler: Box<dyn Reconciler + 'a>,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over the given environment lookup and streams,
    /// with the default version decoder and reconciler.
    pub fn new(
        getenv: impl Fn(&str) -> Option<String> + 'a,
        stdin: impl Read + 'a,
        stdout: impl Write + 'a,
        stderr: impl Write + 'a,
    ) -> Self {
        Self {
            getenv: Box::new(getenv),
            stdin: Box::new(stdin),
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
            decoder: Box::new(CniVersionDecoder),
            reconciler: Box::new(VersionReconciler),
        }
    }

    /// Replaces the config-version decoder.
    pub fn with_decoder(mut self, decoder: impl ConfigDecoder + 'a) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Replaces the compatibility reconciler.
    pub fn with_reconciler(mut self, reconciler: impl Reconciler + 'a) -> Self {
        self.reconciler = Box::new(reconciler);
        self
    }

    /// Decodes the config version, checks compatibility, and on success
    /// invokes the handler. Used directly by `ADD`/`DEL` and by the final
    /// step of `GET` negotiation.
    ///
    /// A decode failure propagates unwrapped; an incompatibility becomes a
    /// structured error with the dedicated code and the check's detail text.
    fn check_version_and_call(
        &self,
        invocation: &Invocation,
        version_info: &PluginInfo,
        handler: CmdHandler<'_>,
    ) -> Result<()> {
        let config_version = self.decoder.decode(&invocation.stdin_data)?;
        if let Some(incompatibility) = self.reconciler.check(&config_version, version_info) {
            return Err(Error::Structured(StructuredError::incompatible_version(
                "incompatible CNI versions",
                Some(incompatibility.details().to_string()),
            )));
        }
        handler(invocation)
    }

    /// `GET` negotiation.
    ///
    /// The decoded config version must clear the fixed floor that introduced
    /// `GET`, independent of what the plugin declares. The plugin's declared
    /// versions are then examined in declaration order; the first one
    /// ordering at or above the config version wins and runs the normal
    /// check-and-call, with no further versions examined.
    fn negotiate_get(
        &self,
        invocation: &Invocation,
        version_info: &PluginInfo,
        handler: CmdHandler<'_>,
    ) -> Result<()> {
        let config_version = self.decoder.decode(&invocation.stdin_data)?;
        if !greater_than_or_equal(&config_version, GET_MIN_VERSION)? {
            return Err(Error::Structured(StructuredError::incompatible_version(
                "config version does not allow GET",
                None,
            )));
        }
        for plugin_version in version_info.supported_versions() {
            if greater_than_or_equal(plugin_version, &config_version)? {
                debug!(
                    negotiated = %plugin_version,
                    config = %config_version,
                    "negotiated GET version"
                );
                return self.check_version_and_call(invocation, version_info, handler);
            }
        }
        Err(Error::Structured(StructuredError::incompatible_version(
            "plugin version does not allow GET",
            None,
        )))
    }

    /// Runs the full dispatch state machine for one invocation.
    ///
    /// Terminal states: success, or exactly one [`StructuredError`].
    pub fn dispatch<A, G, D>(
        &mut self,
        mut cmd_add: A,
        mut cmd_get: G,
        mut cmd_del: D,
        version_info: &PluginInfo,
    ) -> std::result::Result<(), StructuredError>
    where
        A: FnMut(&Invocation) -> Result<()>,
        G: FnMut(&Invocation) -> Result<()>,
        D: FnMut(&Invocation) -> Result<()>,
    {
        let (cmd, invocation) =
            read_invocation(&self.getenv, &mut *self.stdin, &mut *self.stderr)
                .map_err(StructuredError::from)?;

        if cmd != CMD_VERSION {
            validate_config(&invocation.stdin_data).map_err(StructuredError::from)?;
        }

        debug!(command = %cmd, "dispatching CNI command");

        let result = match cmd.as_str() {
            CMD_ADD => self.check_version_and_call(&invocation, version_info, &mut cmd_add),
            CMD_GET => self.negotiate_get(&invocation, version_info, &mut cmd_get),
            CMD_DEL => self.check_version_and_call(&invocation, version_info, &mut cmd_del),
            CMD_VERSION => version_info.encode(&mut *self.stdout),
            other => Err(Error::UnknownCommand(other.to_string())),
        };

        result.map_err(StructuredError::from)
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// The core "main" for a plugin, returning any failure to the caller.
///
/// Wires the dispatcher to the real process environment and standard
/// streams. The caller is responsible for printing a returned error to
/// stdout as JSON and exiting non-zero; use [`plugin_main`] to have both
/// done automatically.
pub fn plugin_main_with_error<A, G, D>(
    cmd_add: A,
    cmd_get: G,
    cmd_del: D,
    version_info: &PluginInfo,
) -> std::result::Result<(), StructuredError>
where
    A: FnMut(&Invocation) -> Result<()>,
    G: FnMut(&Invocation) -> Result<()>,
    D: FnMut(&Invocation) -> Result<()>,
{
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    Dispatcher::new(
        |name: &str| std::env::var(name).ok(),
        stdin.lock(),
        stdout.lock(),
        stderr.lock(),
    )
    .dispatch(cmd_add, cmd_get, cmd_del, version_info)
}

/// The core "main" for a plugin, with automatic error handling.
///
/// On failure the structured error is printed to stdout as JSON and the
/// process exits with status 1. A failure to serialize the error is logged
/// best-effort and never masks the original error.
pub fn plugin_main<A, G, D>(cmd_add: A, cmd_get: G, cmd_del: D, version_info: &PluginInfo)
where
    A: FnMut(&Invocation) -> Result<()>,
    G: FnMut(&Invocation) -> Result<()>,
    D: FnMut(&Invocation) -> Result<()>,
{
    if let Err(err) = plugin_main_with_error(cmd_add, cmd_get, cmd_del, version_info) {
        let mut stdout = io::stdout();
        if let Err(print_err) = err.print(&mut stdout) {
            error!(error = %print_err, "failed to write error JSON to stdout");
        }
        std::process::exit(1);
    }
}
