// ─── Launch Orchestration ───
// privileged relaunch → runtime discovery → library resolution → argument assembly → hand-off.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::core::bundle::placeholder;
use crate::core::bundle::{BundlePaths, LaunchConfiguration, RuntimeSelector};
use crate::core::context::{LaunchAttempt, RunContext};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::host::PrivilegedRelauncher;
use crate::core::java::{
    effective_requirement, resolve_library, runtime_home, RuntimeCandidate, RuntimeLocator,
};
use crate::core::launch::{self, AssemblyInput};
use crate::core::platform::Platform;

/// Everything needed to transfer control to the runtime. Consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLaunch {
    /// Java home that `$JVM_RUNTIME` and the JNLP bootstrap were expanded against.
    pub runtime_root: PathBuf,
    pub library: PathBuf,
    pub arguments: Vec<String>,
    pub entry_point: &'static str,
    pub app_class_path: Vec<String>,
    /// How the runtime is named in error messages.
    pub runtime_label: String,
}

/// Full launch of one bundle. Returns the exit status for this process.
pub fn run_bundle(
    ctx: &RunContext,
    paths: &BundlePaths,
    config: &LaunchConfiguration,
    platform: &dyn Platform,
    locator: &RuntimeLocator,
    relauncher: &dyn PrivilegedRelauncher,
) -> LauncherResult<i32> {
    if relaunch_if_requested(ctx, config, relauncher)? {
        return Ok(0);
    }

    let resolved = prepare_launch(ctx, paths, config, platform, locator)?;
    launch(paths, config, &resolved)
}

/// Start the elevated instance when the bundle asks for one. `true` means this process is done.
pub fn relaunch_if_requested(
    ctx: &RunContext,
    config: &LaunchConfiguration,
    relauncher: &dyn PrivilegedRelauncher,
) -> LauncherResult<bool> {
    if !config.run_privileged || ctx.attempt != LaunchAttempt::Initial {
        return Ok(false);
    }

    relauncher.relaunch(&ctx.program_name, &ctx.process_args)?;
    info!("Privileged instance started; exiting");
    Ok(true)
}

/// Resolve the runtime and build the final argument vector. Touches nothing but the JNLP temp copy.
#[instrument(skip_all)]
pub fn prepare_launch(
    ctx: &RunContext,
    paths: &BundlePaths,
    config: &LaunchConfiguration,
    platform: &dyn Platform,
    locator: &RuntimeLocator,
) -> LauncherResult<ResolvedLaunch> {
    config.validate()?;

    let (mut candidate, runtime_label, explicitly_named) = match &config.runtime {
        RuntimeSelector::Bundled { name } => (
            RuntimeCandidate::new(paths.plugins_dir().join(name)),
            format!("explicit runtime \"{}\"", name),
            true,
        ),
        RuntimeSelector::Discover {
            requirement,
            preference,
        } => {
            preference.report_conflict();
            let requirement = effective_requirement(*requirement, config.is_jnlp());
            let candidate = locator.locate(requirement, *preference).ok_or(
                LauncherError::NoCompatibleRuntime {
                    kind: preference.sought_kind(),
                    major: requirement.major,
                },
            )?;
            (candidate, format!("Java {}", requirement), false)
        }
    };

    candidate.library = resolve_library(&candidate.root, explicitly_named);
    let library = candidate
        .library
        .clone()
        .ok_or_else(|| LauncherError::LibraryNotFound(runtime_label.clone()))?;
    let runtime_root = runtime_home(&candidate.root, explicitly_named);
    info!(
        "Runtime {:?} ({}, major {:?}), library {:?}",
        runtime_root, runtime_label, candidate.major, library
    );

    let assembled = launch::assemble_arguments(&AssemblyInput {
        config,
        paths,
        runtime_root: &runtime_root,
        context: ctx,
        platform,
    })?;

    Ok(ResolvedLaunch {
        runtime_root,
        library,
        arguments: assembled.arguments,
        entry_point: launch::ENTRY_POINT,
        app_class_path: assembled.app_class_path,
        runtime_label,
    })
}

/// Prepare the process and hand off. Returns the exit status for this process.
pub fn launch(
    paths: &BundlePaths,
    config: &LaunchConfiguration,
    resolved: &ResolvedLaunch,
) -> LauncherResult<i32> {
    placeholder::apply_environment(&paths.root_str());

    if let Some(dir) = &config.working_directory {
        enter_working_directory(Path::new(dir))?;
    }

    launch::invoke(resolved)
}

fn enter_working_directory(dir: &Path) -> LauncherResult<()> {
    std::env::set_current_dir(dir).map_err(|source| LauncherError::WorkingDirectory {
        path: dir.to_path_buf(),
        source,
    })?;
    info!("Working directory: {:?}", dir);
    Ok(())
}
