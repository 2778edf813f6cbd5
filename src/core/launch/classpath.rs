// ─── Classpath Builder ───
// Builds the class path or module path handed to the runtime.

use std::path::Path;

use tracing::debug;

use crate::core::bundle::{safe_path_str, LaunchConfiguration};
use crate::core::error::{LauncherError, LauncherResult};

/// Where application classes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSource {
    ClassPath(String),
    ModulePath(String),
}

impl ClassSource {
    /// As a launcher argument: `-Djava.class.path=...` or `--module-path=...`.
    pub fn to_argument(&self) -> String {
        match self {
            ClassSource::ClassPath(cp) => format!("-Djava.class.path={}", cp),
            ClassSource::ModulePath(mp) => format!("--module-path={}", mp),
        }
    }
}

/// Separator between path-list entries. Bundle paths containing it are rejected up front.
pub fn get_classpath_separator() -> &'static str {
    ":"
}

/// Class path or module path for `config`, rooted at the bundle's `Contents/Java` folder.
pub fn build_class_source(
    config: &LaunchConfiguration,
    java_dir: &Path,
) -> LauncherResult<ClassSource> {
    let java_folder = safe_path_str(java_dir);
    let separator = get_classpath_separator();

    if let Some(jar) = &config.jar_launcher {
        return Ok(ClassSource::ClassPath(format!("{}/{}", java_folder, jar)));
    }

    if config.is_module_launch() {
        let module_path = if config.module_path.is_empty() {
            java_folder
        } else {
            config.module_path.join(separator)
        };
        debug!("Module path: {}", module_path);
        return Ok(ClassSource::ModulePath(module_path));
    }

    let class_path = if config.class_path.is_empty() {
        implicit_class_path(java_dir)?
    } else {
        config.class_path.join(separator)
    };
    debug!("Classpath len={} value={:?}", class_path.len(), class_path);
    Ok(ClassSource::ClassPath(class_path))
}

/// `<java>/Classes` followed by every `*.jar` directly inside `<java>`, in listing order.
pub fn implicit_class_path(java_dir: &Path) -> LauncherResult<String> {
    let java_folder = safe_path_str(java_dir);
    let separator = get_classpath_separator();
    let mut class_path = format!("{}/Classes", java_folder);

    let entries = std::fs::read_dir(java_dir).map_err(|source| LauncherError::Io {
        path: java_dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LauncherError::Io {
            path: java_dir.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.ends_with(".jar") {
            class_path.push_str(separator);
            class_path.push_str(&java_folder);
            class_path.push('/');
            class_path.push_str(&file_name);
        }
    }

    Ok(class_path)
}
