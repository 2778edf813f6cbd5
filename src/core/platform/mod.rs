// ─── Platform Queries ───
// Everything the argument assembler asks of the host system, behind one trait
// so launches can be assembled against a fake host in tests.

pub mod folders;
pub mod preferences;

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

pub use folders::{FolderScope, SpecialFolder, SPECIAL_FOLDER_PROPERTIES};

/// Keyboard modifier bits, as reported by AppKit's device-independent flag mask.
pub const MODIFIER_FLAGS: [(&str, u64); 8] = [
    ("CapsLock", 1 << 16),
    ("Shift", 1 << 17),
    ("Control", 1 << 18),
    ("Option", 1 << 19),
    ("Command", 1 << 20),
    ("NumericPad", 1 << 21),
    ("Help", 1 << 22),
    ("Function", 1 << 23),
];

pub trait Platform {
    /// Installed RAM in bytes, 0 when unknown.
    fn physical_memory(&self) -> u64;

    /// First path for a special folder, if the platform has one.
    fn special_folder(&self, folder: SpecialFolder, scope: FolderScope) -> Option<PathBuf>;

    fn home_dir(&self) -> Option<PathBuf>;

    /// Persisted option overrides stored under `key_path` for this bundle.
    fn user_options(&self, bundle_identifier: &str, key_path: &str)
        -> Option<HashMap<String, String>>;

    fn dark_mode(&self) -> bool;

    /// Modifier keys held at launch; `None` when the host cannot report them.
    fn modifier_flags(&self) -> Option<u64>;
}

/// The real host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn physical_memory(&self) -> u64 {
        let mut system = sysinfo::System::new();
        system.refresh_memory();
        system.total_memory()
    }

    fn special_folder(&self, folder: SpecialFolder, scope: FolderScope) -> Option<PathBuf> {
        folders::resolve(folder, scope)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn user_options(
        &self,
        bundle_identifier: &str,
        key_path: &str,
    ) -> Option<HashMap<String, String>> {
        let store = preferences::store_path(bundle_identifier)?;
        preferences::read_options(&store, key_path)
    }

    fn dark_mode(&self) -> bool {
        if !cfg!(target_os = "macos") {
            return false;
        }

        match Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "Dark",
            Err(error) => {
                debug!("Cannot query appearance: {}", error);
                false
            }
        }
    }

    fn modifier_flags(&self) -> Option<u64> {
        None
    }
}
