use crate::core::error::{LauncherError, LauncherResult};
use crate::core::java::{RuntimePreference, VersionRequirement};

use super::paths::BundlePaths;
use super::placeholder;
use super::plist::{parse_plist, PlistDict};

// Info.plist keys understood by the launcher.
const BUNDLE_IDENTIFIER_KEY: &str = "CFBundleIdentifier";
const BUNDLE_NAME_KEY: &str = "CFBundleName";
const BUNDLE_ICON_KEY: &str = "CFBundleIconFile";
const RUNTIME_KEY: &str = "JVMRuntime";
const VERSION_KEY: &str = "JVMVersion";
const JRE_PREFERRED_KEY: &str = "JVMJREPreferred";
const JDK_PREFERRED_KEY: &str = "JVMJDKPreferred";
const WORKING_DIRECTORY_KEY: &str = "WorkingDirectory";
const MAIN_CLASS_KEY: &str = "JVMMainClassName";
const MAIN_MODULE_KEY: &str = "JVMMainModuleName";
const JAR_LAUNCHER_KEY: &str = "JVMJARLauncher";
const CLASS_PATH_KEY: &str = "JVMClassPath";
const MODULE_PATH_KEY: &str = "JVMModulePath";
const OPTIONS_KEY: &str = "JVMOptions";
const DEFAULT_OPTIONS_KEY: &str = "JVMDefaultOptions";
const ARGUMENTS_KEY: &str = "JVMArguments";
const IGNORE_PSN_KEY: &str = "IgnorePSN";
const IGNORE_VERBOSE_KEY: &str = "IgnoreVerbose";
const RUN_PRIVILEGED_KEY: &str = "JVMRunPrivileged";
const DEBUG_KEY: &str = "JVMDebug";
const JNLP_LAUNCHER_KEY: &str = "JVMJNLPLauncher";
const JNLP_FILE_KEY: &str = "JVMJNLPFile";

/// Which runtime to launch with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSelector {
    /// A runtime shipped in `Contents/PlugIns/<name>`.
    Bundled { name: String },
    /// Any installed runtime satisfying the requirement.
    Discover {
        requirement: VersionRequirement,
        preference: RuntimePreference,
    },
}

impl Default for RuntimeSelector {
    fn default() -> Self {
        RuntimeSelector::Discover {
            requirement: VersionRequirement::default(),
            preference: RuntimePreference::default(),
        }
    }
}

/// Everything read from the bundle's `Info.plist` that drives one launch.
///
/// Built once; only the placeholder passes mutate it afterwards.
#[derive(Debug, Clone, Default)]
pub struct LaunchConfiguration {
    pub bundle_identifier: Option<String>,
    pub bundle_name: Option<String>,
    pub icon_file: Option<String>,

    pub runtime: RuntimeSelector,
    pub working_directory: Option<String>,
    /// Class name, or `module/class` for module execution.
    pub main_class: Option<String>,
    /// Jar under `Contents/Java` launched with `-jar` semantics.
    pub jar_launcher: Option<String>,
    pub class_path: Vec<String>,
    pub module_path: Vec<String>,
    pub options: Vec<String>,
    /// Overridable options, in `Info.plist` order.
    pub default_options: Vec<(String, String)>,
    pub arguments: Vec<String>,

    // ── Flags ──
    pub ignore_psn: bool,
    pub ignore_verbose: bool,
    pub run_privileged: bool,
    pub debug: bool,
    pub jnlp_launcher: bool,
    pub jnlp_file: Option<String>,
}

impl LaunchConfiguration {
    pub fn from_plist(dict: &PlistDict) -> Self {
        let runtime = match dict.string(RUNTIME_KEY) {
            Some(name) => RuntimeSelector::Bundled { name },
            None => RuntimeSelector::Discover {
                requirement: VersionRequirement::from_config(dict.string(VERSION_KEY).as_deref()),
                preference: RuntimePreference::new(
                    dict.flag(JRE_PREFERRED_KEY),
                    dict.flag(JDK_PREFERRED_KEY),
                ),
            },
        };

        Self {
            bundle_identifier: dict.string(BUNDLE_IDENTIFIER_KEY),
            bundle_name: dict.string(BUNDLE_NAME_KEY),
            icon_file: dict.string(BUNDLE_ICON_KEY),
            runtime,
            working_directory: dict.string(WORKING_DIRECTORY_KEY),
            main_class: dict
                .string(MAIN_CLASS_KEY)
                .or_else(|| dict.string(MAIN_MODULE_KEY)),
            jar_launcher: dict.string(JAR_LAUNCHER_KEY),
            class_path: dict.string_list(CLASS_PATH_KEY, Some(':')),
            module_path: dict.string_list(MODULE_PATH_KEY, Some(':')),
            options: dict.string_list(OPTIONS_KEY, None),
            default_options: dict.string_pairs(DEFAULT_OPTIONS_KEY),
            arguments: dict.string_list(ARGUMENTS_KEY, None),
            ignore_psn: dict.flag(IGNORE_PSN_KEY),
            ignore_verbose: dict.flag(IGNORE_VERBOSE_KEY),
            run_privileged: dict.flag(RUN_PRIVILEGED_KEY),
            debug: dict.flag(DEBUG_KEY),
            jnlp_launcher: dict.flag(JNLP_LAUNCHER_KEY),
            jnlp_file: dict.string(JNLP_FILE_KEY),
        }
    }

    /// Read `Contents/Info.plist` and expand `$APP_ROOT`.
    pub fn load(paths: &BundlePaths) -> LauncherResult<Self> {
        let plist_path = paths.info_plist();
        let xml = std::fs::read_to_string(&plist_path).map_err(|source| LauncherError::Io {
            path: plist_path.clone(),
            source,
        })?;
        let dict = parse_plist(&xml)?;

        let mut config = Self::from_plist(&dict);
        placeholder::apply_app_root(&mut config, &paths.root_str());
        Ok(config)
    }

    /// Main entry given as `module/class`.
    pub fn is_module_launch(&self) -> bool {
        self.main_class
            .as_deref()
            .is_some_and(|main| main.contains('/'))
    }

    pub fn is_jnlp(&self) -> bool {
        self.jnlp_launcher
    }

    /// Reject entry-point combinations that cannot be launched.
    pub fn validate(&self) -> LauncherResult<()> {
        if self.is_module_launch() && self.jar_launcher.is_some() {
            return Err(LauncherError::ConflictingLaunchers);
        }

        if self.main_class.is_none() && self.jar_launcher.is_none() && !self.is_jnlp() {
            return Err(LauncherError::MissingMainEntry);
        }

        Ok(())
    }

    /// Key path under which the user preference store keeps option overrides.
    pub fn preferences_key_path(&self) -> Option<String> {
        self.bundle_identifier
            .as_deref()
            .map(|id| format!("/{}/JVMOptions/", id.replace('.', "/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(xml: &str) -> LaunchConfiguration {
        LaunchConfiguration::from_plist(&parse_plist(xml).unwrap())
    }

    #[test]
    fn reads_discovery_settings() {
        let config = config_from(
            "<plist><dict>\
             <key>JVMVersion</key><string>11+</string>\
             <key>JVMJDKPreferred</key><true/>\
             <key>JVMMainClassName</key><string>com.example.Main</string>\
             </dict></plist>",
        );

        assert_eq!(
            config.runtime,
            RuntimeSelector::Discover {
                requirement: VersionRequirement::new(11, false),
                preference: RuntimePreference::new(false, true),
            }
        );
        assert!(!config.is_module_launch());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_runtime_wins_over_version() {
        let config = config_from(
            "<plist><dict>\
             <key>JVMRuntime</key><string>jdk-17.jdk</string>\
             <key>JVMVersion</key><string>11+</string>\
             <key>JVMJARLauncher</key><string>app.jar</string>\
             </dict></plist>",
        );

        assert_eq!(
            config.runtime,
            RuntimeSelector::Bundled {
                name: "jdk-17.jdk".into()
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn module_main_and_jar_launcher_conflict() {
        let config = config_from(
            "<plist><dict>\
             <key>JVMMainModuleName</key><string>com.example/com.example.Main</string>\
             <key>JVMJARLauncher</key><string>app.jar</string>\
             </dict></plist>",
        );

        assert!(config.is_module_launch());
        assert!(matches!(
            config.validate(),
            Err(LauncherError::ConflictingLaunchers)
        ));
    }

    #[test]
    fn main_entry_is_required_outside_jnlp() {
        let config = config_from("<plist><dict></dict></plist>");
        assert!(matches!(config.validate(), Err(LauncherError::MissingMainEntry)));

        let jnlp = config_from(
            "<plist><dict><key>JVMJNLPLauncher</key><true/></dict></plist>",
        );
        assert!(jnlp.validate().is_ok());
    }

    #[test]
    fn preference_key_path_is_derived_from_identifier() {
        let config = config_from(
            "<plist><dict><key>CFBundleIdentifier</key><string>com.example.demo</string></dict></plist>",
        );
        assert_eq!(
            config.preferences_key_path().as_deref(),
            Some("/com/example/demo/JVMOptions/")
        );
    }

    #[test]
    fn load_expands_app_root() {
        let temp = std::env::temp_dir().join(format!("config-test-load-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(temp.join("Contents")).unwrap();
        std::fs::write(
            temp.join("Contents").join("Info.plist"),
            "<plist><dict>\
             <key>JVMMainClassName</key><string>Main</string>\
             <key>JVMClassPath</key><array><string>$APP_ROOT/Contents/Java/x.jar</string></array>\
             </dict></plist>",
        )
        .unwrap();

        let paths = BundlePaths::new(temp.clone()).unwrap();
        let config = LaunchConfiguration::load(&paths).unwrap();
        assert_eq!(
            config.class_path,
            vec![format!("{}/Contents/Java/x.jar", paths.root_str())]
        );

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn missing_info_plist_reports_its_path() {
        let temp = std::env::temp_dir().join(format!("config-test-missing-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(temp.join("Contents")).unwrap();

        let paths = BundlePaths::new(temp.clone()).unwrap();
        match LaunchConfiguration::load(&paths) {
            Err(LauncherError::Io { path, .. }) => assert_eq!(path, paths.info_plist()),
            other => panic!("expected an IO error, got {:?}", other),
        }

        let _ = std::fs::remove_dir_all(&temp);
    }
}
