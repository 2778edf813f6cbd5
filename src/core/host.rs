// ─── Host Collaborators ───
// User-facing alerts and privilege elevation. Both are thin wrappers over host tools.

use std::process::Command;

use tracing::{error, info, warn};

use crate::core::context::RELAUNCH_MARKER_ENV;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::shell_escape;

/// Receives the one fatal message of a failed launch.
pub trait AlertSink {
    fn alert(&self, title: &str, message: &str);
}

/// Starts the launcher again with elevated privileges.
pub trait PrivilegedRelauncher {
    /// Returns once the elevated process has been started.
    fn relaunch(&self, program: &str, args: &[String]) -> LauncherResult<()>;
}

/// Logs, prints to stderr, and shows a dialog on macOS.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostAlert;

impl AlertSink for HostAlert {
    fn alert(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
        eprintln!("{}: {}", title, message);

        if !cfg!(target_os = "macos") {
            return;
        }

        let script = format!(
            "display alert \"{}\" message \"{}\" as critical",
            applescript_escape(title),
            applescript_escape(message)
        );
        if let Err(e) = Command::new("osascript").args(["-e", &script]).output() {
            warn!("Cannot show alert dialog: {}", e);
        }
    }
}

/// Relaunch through `osascript ... with administrator privileges` on macOS, `pkexec` elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRelauncher;

impl PrivilegedRelauncher for ShellRelauncher {
    fn relaunch(&self, program: &str, args: &[String]) -> LauncherResult<()> {
        let command = relaunch_command(program, args);
        info!("Requesting privileged relaunch: {}", command);

        let mut elevate = if cfg!(target_os = "macos") {
            let script = format!(
                "do shell script \"{}\" with administrator privileges",
                applescript_escape(&command)
            );
            let mut cmd = Command::new("osascript");
            cmd.args(["-e", &script]);
            cmd
        } else {
            let mut cmd = Command::new("pkexec");
            cmd.args(["sh", "-c", &command]);
            cmd
        };

        let status = elevate
            .status()
            .map_err(|e| LauncherError::Relaunch(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(LauncherError::Relaunch(format!(
                "elevation helper exited with {}",
                status
            )))
        }
    }
}

/// Shell command that starts `program` detached, with the relaunch marker set.
pub fn relaunch_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![
        "env".to_string(),
        format!("{}=1", RELAUNCH_MARKER_ENV),
        shell_escape(program),
    ];
    parts.extend(args.iter().map(|arg| shell_escape(arg)));
    format!("{} >/dev/null 2>&1 &", parts.join(" "))
}

fn applescript_escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
