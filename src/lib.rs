pub mod core;

use std::path::PathBuf;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::core::bundle::{BundlePaths, LaunchConfiguration};
use crate::core::context::RunContext;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::host::{AlertSink, HostAlert, ShellRelauncher};
use crate::core::java::RuntimeLocator;
use crate::core::launcher;
use crate::core::platform::HostPlatform;

const ALERT_TITLE: &str = "Unable to launch application";

/// Launch the bundle containing the current executable. Returns the process exit status.
pub fn run() -> i32 {
    let ctx = RunContext::from_env();

    match start(&ctx) {
        Ok(status) => status,
        Err(error) => {
            HostAlert.alert(ALERT_TITLE, &error.to_string());
            1
        }
    }
}

fn start(ctx: &RunContext) -> LauncherResult<i32> {
    let executable = std::env::current_exe().map_err(|source| LauncherError::Io {
        path: PathBuf::from(&ctx.program_name),
        source,
    })?;
    let paths = BundlePaths::from_executable(&executable)?;
    let config = LaunchConfiguration::load(&paths)?;

    init_logging(ctx.verbose || ctx.debugging(config.debug));
    info!(
        "Launching bundle {:?} ({})",
        paths.root(),
        config.bundle_identifier.as_deref().unwrap_or("<unnamed>")
    );
    debug!("Launch configuration: {:?}", config);

    launcher::run_bundle(
        ctx,
        &paths,
        &config,
        &HostPlatform,
        &RuntimeLocator::default(),
        &ShellRelauncher,
    )
}

/// Structured logging to stdout; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,bundle_launcher_lib=debug"
    } else {
        "warn"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stdout)
        .try_init();
}
