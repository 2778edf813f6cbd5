use std::path::{Path, PathBuf};

use crate::core::error::{LauncherError, LauncherResult};

/// Well-known locations inside an application bundle (`<root>/Contents/...`).
#[derive(Debug, Clone)]
pub struct BundlePaths {
    root: PathBuf,
}

impl BundlePaths {
    /// Bundle rooted at `root`. A `:` in the path would corrupt every classpath built from it.
    pub fn new(root: PathBuf) -> LauncherResult<Self> {
        if root.to_string_lossy().contains(':') {
            return Err(LauncherError::ColonInPath(root));
        }

        Ok(Self { root })
    }

    /// Bundle containing `executable`, expected at `<root>/Contents/MacOS/<name>`.
    pub fn from_executable(executable: &Path) -> LauncherResult<Self> {
        let canonical = std::fs::canonicalize(executable).map_err(|source| LauncherError::Io {
            path: executable.to_path_buf(),
            source,
        })?;

        let root = canonical
            .ancestors()
            .nth(3)
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                LauncherError::Other(format!(
                    "{:?} is not inside an application bundle",
                    canonical
                ))
            })?;

        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contents_dir(&self) -> PathBuf {
        self.root.join("Contents")
    }

    pub fn info_plist(&self) -> PathBuf {
        self.contents_dir().join("Info.plist")
    }

    /// Application jars and classes.
    pub fn java_dir(&self) -> PathBuf {
        self.contents_dir().join("Java")
    }

    /// Native executables; also used as `java.library.path`.
    pub fn macos_dir(&self) -> PathBuf {
        self.contents_dir().join("MacOS")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    /// Home of runtimes embedded in the bundle.
    pub fn plugins_dir(&self) -> PathBuf {
        self.contents_dir().join("PlugIns")
    }

    pub fn root_str(&self) -> String {
        safe_path_str(&self.root)
    }
}

/// Path as a string, without Windows verbatim prefixes.
pub fn safe_path_str(path: &Path) -> String {
    let raw = path.to_string_lossy().to_string();
    raw.strip_prefix(r"\\?\").map(str::to_string).unwrap_or(raw)
}
