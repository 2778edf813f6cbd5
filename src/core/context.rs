// ─── Run Context ───
// Process-wide switches, decided once at entry and passed down explicitly.

/// Environment marker set on the command handed to the privileged relauncher.
pub const RELAUNCH_MARKER_ENV: &str = "BUNDLE_LAUNCHER_RELAUNCHED";

const VERBOSE_FLAG: &str = "--verbose";

/// Whether this process is the original launch or the one started by a privileged relaunch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAttempt {
    Initial,
    PostPrivilegeRelaunch,
}

#[derive(Debug, Clone)]
pub struct RunContext {
    /// `--verbose` was present among the process arguments.
    pub verbose: bool,
    pub attempt: LaunchAttempt,
    /// `argv[0]` as received.
    pub program_name: String,
    /// Every process argument after `argv[0]`, unfiltered.
    pub process_args: Vec<String>,
}

impl RunContext {
    pub fn new(args: Vec<String>, relaunch_marker: Option<String>) -> Self {
        let mut args = args.into_iter();
        let program_name = args.next().unwrap_or_default();
        let process_args: Vec<String> = args.collect();
        let verbose = process_args.iter().any(|arg| arg == VERBOSE_FLAG);
        let attempt = match relaunch_marker.as_deref() {
            Some(value) if !value.is_empty() && value != "0" => LaunchAttempt::PostPrivilegeRelaunch,
            _ => LaunchAttempt::Initial,
        };

        Self {
            verbose,
            attempt,
            program_name,
            process_args,
        }
    }

    /// Build the context for the current process.
    pub fn from_env() -> Self {
        Self::new(
            std::env::args_os()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
            std::env::var(RELAUNCH_MARKER_ENV).ok(),
        )
    }

    /// `JVMDebug` only takes effect in the relaunched process.
    pub fn debugging(&self, debug_requested: bool) -> bool {
        debug_requested && self.attempt == LaunchAttempt::PostPrivilegeRelaunch
    }

    pub fn verbose_flag() -> &'static str {
        VERBOSE_FLAG
    }
}
