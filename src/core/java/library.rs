use std::path::{Path, PathBuf};

use tracing::debug;

/// Java home inside a runtime shipped as a bundle (`Contents/PlugIns/<name>`).
const BUNDLED_HOME: &str = "Contents/Home";

/// Search order under [`BUNDLED_HOME`] for runtimes shipped inside the application bundle.
const BUNDLED_LIBRARY_DIRS: [&str; 4] = ["jre/lib/jli", "lib/jli", "jre/lib", "lib"];

/// Search order for runtimes found by the locator (plain `JAVA_HOME` layout).
const SYSTEM_LIBRARY_DIRS: [&str; 4] = ["jre/lib/jli", "jre/lib", "lib/jli", "lib"];

/// File name of the Java launcher shared library on this platform.
pub fn launcher_library_name() -> &'static str {
    if cfg!(target_os = "macos") {
        "libjli.dylib"
    } else if cfg!(windows) {
        "jli.dll"
    } else {
        "libjli.so"
    }
}

/// Java home of a runtime: `Contents/Home` for an explicitly named bundle, the root otherwise.
pub fn runtime_home(runtime_root: &Path, explicitly_named: bool) -> PathBuf {
    if explicitly_named {
        runtime_root.join(BUNDLED_HOME)
    } else {
        runtime_root.to_path_buf()
    }
}

/// Locate the launcher library under `runtime_root`.
///
/// `explicitly_named` selects the bundle layout (`Contents/Home/...`) instead of the
/// system layout. Only regular files qualify.
pub fn resolve_library(runtime_root: &Path, explicitly_named: bool) -> Option<PathBuf> {
    let dirs: &[&str] = if explicitly_named {
        &BUNDLED_LIBRARY_DIRS
    } else {
        &SYSTEM_LIBRARY_DIRS
    };

    let home = runtime_home(runtime_root, explicitly_named);
    let found = dirs
        .iter()
        .map(|dir| home.join(dir).join(launcher_library_name()))
        .find(|candidate| candidate.is_file());

    debug!("Launcher library under {:?}: {:?}", runtime_root, found);
    found
}
