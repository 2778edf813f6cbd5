use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// Per-bundle preference document: `{ "<key path>": { "<option key>": "<value>" } }`.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct PreferenceDocument {
    key_paths: HashMap<String, HashMap<String, String>>,
}

/// `<preferences dir>/<bundle id>.json`.
pub fn store_path(bundle_identifier: &str) -> Option<PathBuf> {
    Some(dirs::preference_dir()?.join(format!("{}.json", bundle_identifier)))
}

/// Overrides stored under `key_path`; a missing or unreadable store yields `None`.
pub fn read_options(store: &Path, key_path: &str) -> Option<HashMap<String, String>> {
    let raw = std::fs::read_to_string(store).ok()?;
    let document: PreferenceDocument = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(error) => {
            debug!("Ignoring unreadable preference store {:?}: {}", store, error);
            return None;
        }
    };

    document.key_paths.get(key_path).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_options_under_key_path() {
        let temp = std::env::temp_dir().join(format!("prefs-test-read-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(&temp).unwrap();
        let store = temp.join("com.example.demo.json");
        std::fs::write(
            &store,
            r#"{ "/com/example/demo/JVMOptions/": { "Xmx": "-Xmx2g" } }"#,
        )
        .unwrap();

        let options = read_options(&store, "/com/example/demo/JVMOptions/").unwrap();
        assert_eq!(options.get("Xmx").map(String::as_str), Some("-Xmx2g"));
        assert!(read_options(&store, "/other/").is_none());

        std::fs::write(&store, "not json").unwrap();
        assert!(read_options(&store, "/com/example/demo/JVMOptions/").is_none());
        assert!(read_options(&temp.join("missing.json"), "/x/").is_none());

        let _ = std::fs::remove_dir_all(&temp);
    }
}
