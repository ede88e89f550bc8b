//! Command table mapping operation identifiers to qualified method names.
//!
//! supervisord exposes two method namespaces. Identifiers that already carry
//! the `system.` prefix are sent unchanged; every other identifier is sent
//! under `supervisor.`, added exactly once.

use std::borrow::Cow;
use std::collections::BTreeMap;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Prefix of the supervisor namespace.
pub const SUPERVISOR_PREFIX: &str = "supervisor.";

/// Prefix of the system namespace.
pub const SYSTEM_PREFIX: &str = "system.";

/// Remote subsystem that handles a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Namespace {
    /// Process control, logs and daemon state.
    Supervisor,
    /// Introspection and multicall.
    System,
}

impl Namespace {
    /// Returns the method prefix for this namespace.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Supervisor => SUPERVISOR_PREFIX,
            Self::System => SYSTEM_PREFIX,
        }
    }

    /// Classifies an identifier: anything not under `system.` belongs to the
    /// supervisor namespace.
    #[must_use]
    pub fn of(identifier: &str) -> Self {
        if identifier.starts_with(SYSTEM_PREFIX) {
            Self::System
        } else {
            Self::Supervisor
        }
    }
}

/// Qualifies an operation identifier with its namespace prefix.
///
/// The result is idempotent: qualifying an already qualified identifier
/// returns it untouched.
#[must_use]
pub fn qualify(identifier: &str) -> Cow<'_, str> {
    if identifier.starts_with(SYSTEM_PREFIX) || identifier.starts_with(SUPERVISOR_PREFIX) {
        Cow::Borrowed(identifier)
    } else {
        Cow::Owned(format!("{SUPERVISOR_PREFIX}{identifier}"))
    }
}

/// Every operation supported by the supervisord RPC interface.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Command {
    /// Adds a process group from the active configuration.
    #[strum(serialize = "addProcessGroup")]
    AddProcessGroup,
    /// Clears every process log.
    #[strum(serialize = "clearAllProcessLogs")]
    ClearAllProcessLogs,
    /// Clears the main supervisord log.
    #[strum(serialize = "clearLog")]
    ClearLog,
    /// Clears one process log (legacy alias).
    #[strum(serialize = "clearProcessLog")]
    ClearProcessLog,
    /// Clears the stdout and stderr logs of one process.
    #[strum(serialize = "clearProcessLogs")]
    ClearProcessLogs,
    /// Returns the RPC API version.
    #[strum(serialize = "getAPIVersion")]
    GetApiVersion,
    /// Returns configuration for every process.
    #[strum(serialize = "getAllConfigInfo")]
    GetAllConfigInfo,
    /// Returns information about every process.
    #[strum(serialize = "getAllProcessInfo")]
    GetAllProcessInfo,
    /// Returns the configured identifier of the daemon.
    #[strum(serialize = "getIdentification")]
    GetIdentification,
    /// Returns the daemon PID.
    #[strum(serialize = "getPID")]
    GetPid,
    /// Returns information about one process.
    #[strum(serialize = "getProcessInfo")]
    GetProcessInfo,
    /// Returns the daemon state.
    #[strum(serialize = "getState")]
    GetState,
    /// Returns the supervisord package version.
    #[strum(serialize = "getSupervisorVersion")]
    GetSupervisorVersion,
    /// Returns the RPC API version (legacy alias).
    #[strum(serialize = "getVersion")]
    GetVersion,
    /// Reads a slice of the main log.
    #[strum(serialize = "readLog")]
    ReadLog,
    /// Reads a slice of the main log (legacy alias).
    #[strum(serialize = "readMainLog")]
    ReadMainLog,
    /// Reads a slice of a process log (legacy alias).
    #[strum(serialize = "readProcessLog")]
    ReadProcessLog,
    /// Reads a slice of a process stderr log.
    #[strum(serialize = "readProcessStderrLog")]
    ReadProcessStderrLog,
    /// Reads a slice of a process stdout log.
    #[strum(serialize = "readProcessStdoutLog")]
    ReadProcessStdoutLog,
    /// Reloads the configuration and reports the changes.
    #[strum(serialize = "reloadConfig")]
    ReloadConfig,
    /// Removes a stopped process group.
    #[strum(serialize = "removeProcessGroup")]
    RemoveProcessGroup,
    /// Restarts the daemon.
    #[strum(serialize = "restart")]
    Restart,
    /// Writes characters to the stdin of a process.
    #[strum(serialize = "sendProcessStdin")]
    SendProcessStdin,
    /// Emits a `REMOTE_COMMUNICATION` event.
    #[strum(serialize = "sendRemoteCommEvent")]
    SendRemoteCommEvent,
    /// Shuts the daemon down.
    #[strum(serialize = "shutdown")]
    Shutdown,
    /// Signals every process.
    #[strum(serialize = "signalAllProcesses")]
    SignalAllProcesses,
    /// Signals one process.
    #[strum(serialize = "signalProcess")]
    SignalProcess,
    /// Signals every process in a group.
    #[strum(serialize = "signalProcessGroup")]
    SignalProcessGroup,
    /// Starts every process.
    #[strum(serialize = "startAllProcesses")]
    StartAllProcesses,
    /// Starts one process.
    #[strum(serialize = "startProcess")]
    StartProcess,
    /// Starts every process in a group.
    #[strum(serialize = "startProcessGroup")]
    StartProcessGroup,
    /// Stops every process.
    #[strum(serialize = "stopAllProcesses")]
    StopAllProcesses,
    /// Stops one process.
    #[strum(serialize = "stopProcess")]
    StopProcess,
    /// Stops every process in a group.
    #[strum(serialize = "stopProcessGroup")]
    StopProcessGroup,
    /// Tails a process log (legacy alias).
    #[strum(serialize = "tailProcessLog")]
    TailProcessLog,
    /// Tails a process stderr log.
    #[strum(serialize = "tailProcessStderrLog")]
    TailProcessStderrLog,
    /// Tails a process stdout log.
    #[strum(serialize = "tailProcessStdoutLog")]
    TailProcessStdoutLog,
    /// Lists every method the daemon exposes.
    #[strum(serialize = "system.listMethods")]
    ListMethods,
    /// Returns the help text of a method.
    #[strum(serialize = "system.methodHelp")]
    MethodHelp,
    /// Returns the signature of a method.
    #[strum(serialize = "system.methodSignature")]
    MethodSignature,
    /// Runs several calls in one round trip.
    #[strum(serialize = "system.multicall")]
    Multicall,
}

impl Command {
    /// Returns the identifier as it appears in the command table.
    #[must_use]
    pub fn identifier(self) -> &'static str {
        self.into()
    }

    /// Returns the namespace this command belongs to.
    #[must_use]
    pub fn namespace(self) -> Namespace {
        Namespace::of(self.identifier())
    }
}

/// One row of the [`CommandTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    command: Command,
    namespace: Namespace,
    qualified: String,
}

impl CommandEntry {
    fn new(command: Command) -> Self {
        Self {
            command,
            namespace: command.namespace(),
            qualified: qualify(command.identifier()).into_owned(),
        }
    }

    /// Returns the command this entry describes.
    #[must_use]
    pub const fn command(&self) -> Command {
        self.command
    }

    /// Returns the namespace of the command.
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the fully qualified method name.
    #[must_use]
    pub fn qualified(&self) -> &str {
        &self.qualified
    }
}

/// Immutable lookup table from identifier to qualified method name.
///
/// Build it once with [`CommandTable::standard`] and share it behind an
/// `Arc`; clients only ever read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    entries: BTreeMap<&'static str, CommandEntry>,
}

impl CommandTable {
    /// Builds a table holding every [`Command`].
    #[must_use]
    pub fn standard() -> Self {
        Self::from_commands(Command::iter())
    }

    /// Builds a table restricted to the given commands.
    pub fn from_commands<I>(commands: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        let entries = commands
            .into_iter()
            .map(|command| (command.identifier(), CommandEntry::new(command)))
            .collect();
        Self { entries }
    }

    /// Looks up an identifier, accepting it bare or already qualified.
    ///
    /// A `supervisor.`-prefixed identifier only matches entries of the
    /// supervisor namespace.
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<&CommandEntry> {
        self.entries.get(identifier).or_else(|| {
            identifier
                .strip_prefix(SUPERVISOR_PREFIX)
                .and_then(|bare| self.entries.get(bare))
                .filter(|entry| entry.namespace() == Namespace::Supervisor)
        })
    }

    /// Returns the entry for a known command.
    #[must_use]
    pub fn entry(&self, command: Command) -> Option<&CommandEntry> {
        self.entries.get(command.identifier())
    }

    /// Resolves an identifier to the method name sent on the wire.
    ///
    /// Identifiers missing from the table are qualified with [`qualify`].
    #[must_use]
    pub fn qualify<'a>(&'a self, identifier: &'a str) -> Cow<'a, str> {
        match self.lookup(identifier) {
            Some(entry) => Cow::Borrowed(entry.qualified()),
            None => qualify(identifier),
        }
    }

    /// Iterates the entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.values()
    }

    /// Number of commands in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the table holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::standard()
    }
}
