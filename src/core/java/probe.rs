use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use super::version::{extract_major_version, VersionRequirement};

fn java_exe() -> &'static str {
    if cfg!(windows) {
        "java.exe"
    } else {
        "java"
    }
}

/// `bin/java` under a runtime root, falling back to the bundle-style `Contents/Home/bin/java`.
pub fn locate_java_binary(runtime_root: &Path) -> PathBuf {
    let primary = runtime_root.join("bin").join(java_exe());
    if primary.exists() {
        return primary;
    }

    let bundled = runtime_root
        .join("Contents")
        .join("Home")
        .join("bin")
        .join(java_exe());
    if bundled.exists() {
        return bundled;
    }

    primary
}

/// Run `java -version` for the runtime at `runtime_root` and return its major version.
///
/// Spawn failures and output without a `version "..."` marker are reported as `None`.
#[instrument]
pub fn probe_major(runtime_root: &Path) -> Option<u32> {
    let java_bin = locate_java_binary(runtime_root);

    // `output()` drains stdout and stderr together before waiting on the child.
    let output = match Command::new(&java_bin).arg("-version").output() {
        Ok(output) => output,
        Err(error) => {
            debug!("Cannot run {:?}: {}", java_bin, error);
            return None;
        }
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = parse_version_string(&stderr).or_else(|| parse_version_string(&stdout));
    debug!("Probing {:?}: {:?}", java_bin, version);

    version.map(|version| extract_major_version(Some(&version)))
}

/// Probe the runtime and test it against `requirement`.
pub fn check_compatibility(runtime_root: &Path, requirement: VersionRequirement) -> bool {
    match probe_major(runtime_root) {
        Some(major) => {
            let compatible = requirement.accepts(major);
            debug!(
                "Runtime {:?} reports major {} (required {}): {}",
                runtime_root,
                major,
                requirement,
                if compatible { "accepted" } else { "rejected" }
            );
            compatible
        }
        None => false,
    }
}

/// Text between the quotes of the first `version "<text>"` occurrence.
pub(crate) fn parse_version_string(output: &str) -> Option<String> {
    const MARKER: &str = "version \"";

    let start = output.find(MARKER)? + MARKER.len();
    let end = output[start..].find('"')?;
    Some(output[start..start + end].to_string())
}
