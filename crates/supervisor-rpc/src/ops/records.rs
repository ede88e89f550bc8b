//! Record types returned by supervisord.

use serde::Deserialize;

/// Lifecycle state of a supervised process.
///
/// Codes outside the documented set are kept as [`ProcessState::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum ProcessState {
    /// Stopped on request or never started.
    Stopped,
    /// Starting in response to a start request.
    Starting,
    /// Running.
    Running,
    /// Exited too quickly after starting.
    Backoff,
    /// Stopping in response to a stop request.
    Stopping,
    /// Exited from the running state.
    Exited,
    /// Could not be started.
    Fatal,
    /// Unknown to supervisord itself.
    #[default]
    Unknown,
    /// Undocumented code.
    Other(i64),
}

impl ProcessState {
    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Stopped => 0,
            Self::Starting => 10,
            Self::Running => 20,
            Self::Backoff => 30,
            Self::Stopping => 40,
            Self::Exited => 100,
            Self::Fatal => 200,
            Self::Unknown => 1000,
            Self::Other(code) => code,
        }
    }

    /// Returns `true` for states in which the process has a live PID.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running | Self::Backoff | Self::Stopping)
    }
}

impl From<i64> for ProcessState {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Stopped,
            10 => Self::Starting,
            20 => Self::Running,
            30 => Self::Backoff,
            40 => Self::Stopping,
            100 => Self::Exited,
            200 => Self::Fatal,
            1000 => Self::Unknown,
            other => Self::Other(other),
        }
    }
}

/// State code of the supervisord daemon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i64")]
pub enum StateCode {
    /// The daemon hit a serious error.
    Fatal,
    /// The daemon is working normally.
    #[default]
    Running,
    /// The daemon is restarting.
    Restarting,
    /// The daemon is shutting down.
    Shutdown,
    /// Undocumented code.
    Other(i64),
}

impl StateCode {
    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Fatal => 2,
            Self::Running => 1,
            Self::Restarting => 0,
            Self::Shutdown => -1,
            Self::Other(code) => code,
        }
    }
}

impl From<i64> for StateCode {
    fn from(code: i64) -> Self {
        match code {
            2 => Self::Fatal,
            1 => Self::Running,
            0 => Self::Restarting,
            -1 => Self::Shutdown,
            other => Self::Other(other),
        }
    }
}

/// Reply of `supervisor.getState`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupervisorState {
    /// Numeric state.
    #[serde(rename = "statecode")]
    pub code: StateCode,
    /// State name such as `RUNNING`.
    #[serde(rename = "statename")]
    pub name: String,
}

/// Runtime information about one process.
///
/// Missing fields decode to their defaults, so the shorter status records
/// returned by the group start and stop methods decode as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessInfo {
    /// Process name.
    pub name: String,
    /// Group the process belongs to.
    pub group: String,
    /// Free-form description, usually the uptime.
    pub description: String,
    /// UNIX timestamp of the last start.
    pub start: i64,
    /// UNIX timestamp of the last stop, zero when never stopped.
    pub stop: i64,
    /// UNIX timestamp at the time of the reply.
    pub now: i64,
    /// Lifecycle state.
    pub state: ProcessState,
    /// Name of the lifecycle state.
    #[serde(rename = "statename")]
    pub state_name: String,
    /// Spawn error description, empty when none.
    #[serde(rename = "spawnerr")]
    pub spawn_error: String,
    /// Exit status, zero while running.
    #[serde(rename = "exitstatus")]
    pub exit_status: i64,
    /// Path of the stdout log file.
    pub stdout_logfile: String,
    /// Path of the stderr log file.
    pub stderr_logfile: String,
    /// Process ID, zero when not running.
    pub pid: i64,
}

/// Configuration of one process as loaded by supervisord.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "mirrors the supervisord config record field for field"
)]
pub struct ProcessConfig {
    /// Start automatically with the daemon.
    pub autostart: bool,
    /// Command line.
    pub command: String,
    /// Working directory.
    pub directory: String,
    /// Exit codes treated as expected.
    pub exitcodes: Vec<i64>,
    /// Group name.
    pub group: String,
    /// Group priority.
    pub group_prio: i64,
    /// Whether the config is in use.
    pub inuse: bool,
    /// Signal the whole process group on stop.
    pub killasgroup: bool,
    /// Process name.
    pub name: String,
    /// Process priority.
    pub process_prio: i64,
    /// Stderr is merged into stdout.
    pub redirect_stderr: bool,
    /// Server URL passed to the child.
    pub serverurl: String,
    /// Start attempts before giving up.
    pub startretries: i64,
    /// Seconds the process must stay up to count as started.
    pub startsecs: i64,
    /// Stderr capture buffer size.
    pub stderr_capture_maxbytes: i64,
    /// Emit stderr events.
    pub stderr_events_enabled: bool,
    /// Stderr log file path.
    pub stderr_logfile: String,
    /// Number of rotated stderr logs kept.
    pub stderr_logfile_backups: i64,
    /// Size at which the stderr log rotates.
    pub stderr_logfile_maxbytes: i64,
    /// Send stderr to syslog.
    pub stderr_syslog: bool,
    /// Stdout capture buffer size.
    pub stdout_capture_maxbytes: i64,
    /// Emit stdout events.
    pub stdout_events_enabled: bool,
    /// Stdout log file path.
    pub stdout_logfile: String,
    /// Number of rotated stdout logs kept.
    pub stdout_logfile_backups: i64,
    /// Size at which the stdout log rotates.
    pub stdout_logfile_maxbytes: i64,
    /// Send stdout to syslog.
    pub stdout_syslog: bool,
    /// Signal number used to stop the process.
    pub stopsignal: i64,
    /// Seconds to wait after the stop signal.
    pub stopwaitsecs: i64,
    /// User ID the process runs as.
    pub uid: i64,
}
