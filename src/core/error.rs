use std::path::PathBuf;
use thiserror::Error;

/// Which flavour of runtime the locator was asked to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    Jre,
    Jdk,
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeKind::Jre => write!(f, "Java Runtime Environment (JRE)"),
            RuntimeKind::Jdk => write!(f, "Java Development Kit (JDK)"),
        }
    }
}

/// Central error type for the launcher.
/// Every fallible step returns `Result<T, LauncherError>`; only `run()` turns it into an alert.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Bundle metadata ─────────────────────────────────
    #[error("Invalid Info.plist: {0}")]
    Plist(String),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    // ── Configuration ───────────────────────────────────
    #[error("Main class name or JAR launcher is required.")]
    MissingMainEntry,

    #[error("A main module and a JAR launcher cannot be configured together.")]
    ConflictingLaunchers,

    #[error("Cannot launch from a folder whose path contains a colon: {0:?}")]
    ColonInPath(PathBuf),

    #[error("Failed to copy JNLP file {path:?} to a temporary location: {source}")]
    JnlpCopy {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot change working directory to {path:?}: {source}")]
    WorkingDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Runtime discovery ───────────────────────────────
    #[error("This application requires a {kind} version {major} or later.")]
    NoCompatibleRuntime { kind: RuntimeKind, major: u32 },

    // ── Library resolution ──────────────────────────────
    #[error("Unable to find the Java launcher library for {0}.")]
    LibraryNotFound(String),

    #[error("Unable to load {label}: {detail}")]
    LibraryLoad { label: String, detail: String },

    #[error("Unable to find JLI_Launch in {label}: {detail}")]
    EntryPointMissing { label: String, detail: String },

    // ── Privileged relaunch ─────────────────────────────
    #[error("Privileged relaunch failed: {0}")]
    Relaunch(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;
