// ─── JNLP Staging ───
// JNLP bundles start the Web Start bootstrap instead of an application class.
// The descriptor is copied to a throw-away file that the runtime deletes itself.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::core::bundle::placeholder::JVM_RUNTIME_PLACEHOLDER;
use crate::core::bundle::BundlePaths;
use crate::core::error::{LauncherError, LauncherResult};

pub const JNLP_MAIN_CLASS: &str = "com.sun.javaws.Main";

/// Options the Web Start bootstrap expects; `$JVM_RUNTIME` is expanded with the other options.
pub fn bootstrap_options() -> Vec<String> {
    let rt = JVM_RUNTIME_PLACEHOLDER;
    vec![
        format!(
            "-Xbootclasspath/a:{rt}/lib/javaws.jar:{rt}/lib/deploy.jar:{rt}/lib/plugin.jar"
        ),
        format!("-Djava.security.policy=file:{rt}/lib/security/javaws.policy"),
        "-DtrustProxy=true".to_string(),
        "-Xverify:remote".to_string(),
        format!("-Djnlpx.home={rt}/bin"),
        format!("-Djnlpx.jvm={rt}/bin/java"),
        "-Djnlpx.remove=true".to_string(),
        "-Dsun.awt.warmup=true".to_string(),
    ]
}

/// Bootstrap class path, rooted at the resolved runtime.
pub fn bootstrap_class_path(runtime_root: &str) -> Vec<String> {
    vec![format!("{}/lib/deploy.jar", runtime_root)]
}

/// `<root>/<relative>` if it exists, otherwise `<root>/Contents/Java/<relative>`.
pub fn locate_descriptor(paths: &BundlePaths, relative: &str) -> PathBuf {
    let direct = paths.root().join(relative);
    if direct.is_file() {
        return direct;
    }
    paths.java_dir().join(relative)
}

/// Copy the descriptor to a fresh unique path under `temp_dir`.
pub fn stage_descriptor(descriptor: &Path, temp_dir: &Path) -> LauncherResult<PathBuf> {
    let file_name = descriptor
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "launch.jnlp".to_string());
    let staged = temp_dir.join(format!("{}-{}", Uuid::new_v4(), file_name));

    std::fs::copy(descriptor, &staged).map_err(|source| LauncherError::JnlpCopy {
        path: descriptor.to_path_buf(),
        source,
    })?;

    info!("Staged JNLP descriptor {:?} as {:?}", descriptor, staged);
    Ok(staged)
}

/// Locate and stage the configured descriptor.
pub fn stage(paths: &BundlePaths, jnlp_file: Option<&str>) -> LauncherResult<PathBuf> {
    let relative = jnlp_file.ok_or_else(|| {
        LauncherError::Other("JNLP launch requested but no JVMJNLPFile is configured.".into())
    })?;
    let descriptor = locate_descriptor(paths, relative);
    stage_descriptor(&descriptor, &std::env::temp_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_falls_back_to_java_folder() {
        let temp = std::env::temp_dir().join(format!("jnlp-test-locate-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(temp.join("Contents/Java")).unwrap();
        std::fs::write(temp.join("Contents/Java/app.jnlp"), b"<jnlp/>").unwrap();

        let paths = BundlePaths::new(temp.clone()).unwrap();
        assert_eq!(
            locate_descriptor(&paths, "app.jnlp"),
            temp.join("Contents/Java/app.jnlp")
        );

        std::fs::write(temp.join("app.jnlp"), b"<jnlp/>").unwrap();
        assert_eq!(locate_descriptor(&paths, "app.jnlp"), temp.join("app.jnlp"));

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn staging_copies_without_touching_the_original() {
        let temp = std::env::temp_dir().join(format!("jnlp-test-stage-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(temp.join("out")).unwrap();
        let original = temp.join("app.jnlp");
        std::fs::write(&original, b"<jnlp href=\"x\"/>").unwrap();

        let first = stage_descriptor(&original, &temp.join("out")).unwrap();
        let second = stage_descriptor(&original, &temp.join("out")).unwrap();

        assert_ne!(first, second);
        assert!(first.to_string_lossy().ends_with("-app.jnlp"));
        assert_eq!(std::fs::read(&first).unwrap(), b"<jnlp href=\"x\"/>");
        assert!(original.is_file());

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn copy_failure_carries_io_detail() {
        let temp = std::env::temp_dir().join(format!("jnlp-test-fail-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(&temp).unwrap();

        let error = stage_descriptor(&temp.join("missing.jnlp"), &temp).unwrap_err();
        assert!(matches!(error, LauncherError::JnlpCopy { .. }));
        assert!(error.to_string().contains("missing.jnlp"));

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn bootstrap_options_reference_the_runtime() {
        assert!(bootstrap_options()
            .iter()
            .any(|option| option.starts_with("-Xbootclasspath/a:$JVM_RUNTIME/lib/javaws.jar")));
        assert_eq!(
            bootstrap_class_path("/jre"),
            vec!["/jre/lib/deploy.jar".to_string()]
        );
    }
}
