// ─── Argument Assembler ───
// Produces the exact argv handed to JLI_Launch:
//   program, system properties, JVM options, default options,
//   main entry, application arguments, pass-through process arguments.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::core::bundle::placeholder;
use crate::core::bundle::{safe_path_str, BundlePaths, LaunchConfiguration};
use crate::core::context::RunContext;
use crate::core::error::LauncherResult;
use crate::core::platform::Platform;

use super::classpath::{build_class_source, get_classpath_separator, ClassSource};
use super::filter::ArgumentFilter;
use super::heap::rewrite_percent_heap;
use super::jnlp;
use super::properties;

/// Everything the assembler reads. Nothing here is mutated.
pub struct AssemblyInput<'a> {
    pub config: &'a LaunchConfiguration,
    pub paths: &'a BundlePaths,
    pub runtime_root: &'a Path,
    pub context: &'a RunContext,
    pub platform: &'a dyn Platform,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledArguments {
    pub arguments: Vec<String>,
    /// Class path passed to the entry point separately; only set for JNLP launches.
    pub app_class_path: Vec<String>,
}

pub fn assemble_arguments(input: &AssemblyInput<'_>) -> LauncherResult<AssembledArguments> {
    let config = input.config;
    config.validate()?;

    let runtime_root = safe_path_str(input.runtime_root);
    let jnlp_mode = config.is_jnlp();

    let mut arguments = vec![input.context.program_name.clone()];

    // ── System properties ──
    arguments.push(format!(
        "-Djava.library.path={}",
        safe_path_str(&input.paths.macos_dir())
    ));
    arguments.extend(properties::environment_properties(input.platform));
    arguments.extend(properties::modifier_properties(input.platform));
    arguments.extend(dock_options(config, input.paths));

    let app_class_path = if jnlp_mode {
        let bootstrap = jnlp::bootstrap_class_path(&runtime_root);
        arguments.push(
            ClassSource::ClassPath(bootstrap.join(get_classpath_separator())).to_argument(),
        );
        bootstrap
    } else {
        arguments.push(build_class_source(config, &input.paths.java_dir())?.to_argument());
        Vec::new()
    };

    // ── JVM options ──
    let mut options = config.options.clone();
    if jnlp_mode {
        options.extend(jnlp::bootstrap_options());
    }
    arguments.extend(finish_options(options, &runtime_root, input.platform));

    // ── Default options ──
    let overrides = config
        .bundle_identifier
        .as_deref()
        .zip(config.preferences_key_path())
        .and_then(|(id, key_path)| input.platform.user_options(id, &key_path));
    let app_root = input.paths.root_str();
    let defaults: Vec<String> = merge_default_options(&config.default_options, overrides.as_ref())
        .iter()
        .map(|option| placeholder::expand_app_root(option, &app_root))
        .collect();
    arguments.extend(finish_options(defaults, &runtime_root, input.platform));

    // ── Main entry ──
    arguments.extend(main_entry(config, input.paths, jnlp_mode));

    // ── Application arguments ──
    arguments.extend(config.arguments.iter().cloned());
    if jnlp_mode {
        let staged = jnlp::stage(input.paths, config.jnlp_file.as_deref())?;
        arguments.push(safe_path_str(&staged));
    }

    // ── Pass-through process arguments ──
    let filter = ArgumentFilter {
        ignore_psn: config.ignore_psn,
        ignore_verbose: config.ignore_verbose,
    };
    arguments.extend(filter.apply(&input.context.process_args, RunContext::verbose_flag()));

    debug!("Assembled {} launch arguments", arguments.len());
    Ok(AssembledArguments {
        arguments,
        app_class_path,
    })
}

/// `$JVM_RUNTIME` expansion followed by percentage heap sizing.
fn finish_options(mut options: Vec<String>, runtime_root: &str, platform: &dyn Platform) -> Vec<String> {
    placeholder::apply_runtime_root(&mut options, runtime_root);

    let needs_memory = options.iter().any(|option| option.ends_with('%'));
    let memory = if needs_memory {
        platform.physical_memory()
    } else {
        0
    };

    options
        .iter()
        .map(|option| rewrite_percent_heap(option, memory))
        .collect()
}

/// Default option values, with stored user values replacing those of matching keys.
pub fn merge_default_options(
    defaults: &[(String, String)],
    overrides: Option<&HashMap<String, String>>,
) -> Vec<String> {
    defaults
        .iter()
        .map(|(key, value)| {
            overrides
                .and_then(|overrides| overrides.get(key))
                .unwrap_or(value)
                .clone()
        })
        .collect()
}

fn main_entry(config: &LaunchConfiguration, paths: &BundlePaths, jnlp_mode: bool) -> Vec<String> {
    if jnlp_mode {
        return vec![jnlp::JNLP_MAIN_CLASS.to_string()];
    }

    match (&config.main_class, &config.jar_launcher) {
        (Some(main), _) if config.is_module_launch() => vec!["-m".to_string(), main.clone()],
        (Some(main), _) => vec![main.clone()],
        (None, Some(jar)) => vec![
            "-jar".to_string(),
            format!("{}/{}", safe_path_str(&paths.java_dir()), jar),
        ],
        // Rejected by `validate()`.
        (None, None) => Vec::new(),
    }
}

fn dock_options(config: &LaunchConfiguration, paths: &BundlePaths) -> Vec<String> {
    if !cfg!(target_os = "macos") {
        return Vec::new();
    }

    let mut options = Vec::new();
    if let Some(name) = &config.bundle_name {
        options.push(format!("-Xdock:name={}", name));
    }
    if let Some(icon) = &config.icon_file {
        let icon = if icon.ends_with(".icns") {
            icon.clone()
        } else {
            format!("{}.icns", icon)
        };
        options.push(format!(
            "-Xdock:icon={}/{}",
            safe_path_str(&paths.resources_dir()),
            icon
        ));
    }
    options
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::error::LauncherError;
    use crate::core::platform::tests::FakePlatform;

    fn context(args: &[&str]) -> RunContext {
        RunContext::new(args.iter().map(|arg| arg.to_string()).collect(), None)
    }

    fn position(arguments: &[String], needle: &str) -> usize {
        arguments
            .iter()
            .position(|arg| arg == needle)
            .unwrap_or_else(|| panic!("{needle} missing from {arguments:?}"))
    }

    #[test]
    fn arguments_follow_the_documented_order() {
        let paths = BundlePaths::new(PathBuf::from("/Apps/Demo.app")).unwrap();
        let config = LaunchConfiguration {
            bundle_identifier: Some("com.example.demo".into()),
            main_class: Some("com.example.Main".into()),
            class_path: vec!["/Apps/Demo.app/Contents/Java/app.jar".into()],
            options: vec!["-Xmx50%".into(), "-Dhome=$JVM_RUNTIME".into()],
            default_options: vec![
                ("Xss".into(), "-Xss1m".into()),
                ("Foo".into(), "-Dfoo=bar".into()),
            ],
            arguments: vec!["--app-arg".into()],
            ignore_psn: true,
            ..LaunchConfiguration::default()
        };
        let mut overrides = HashMap::new();
        overrides.insert("Xss".to_string(), "-Xss4m".to_string());
        overrides.insert("Unknown".to_string(), "-Dunknown=1".to_string());
        let platform = FakePlatform {
            memory: 16_000_000_000,
            options: HashMap::from([("/com/example/demo/JVMOptions/".to_string(), overrides)]),
            ..FakePlatform::default()
        };
        let ctx = context(&["/Apps/Demo.app/Contents/MacOS/Demo", "-psn_0_99", "file.txt"]);

        let assembled = assemble_arguments(&AssemblyInput {
            config: &config,
            paths: &paths,
            runtime_root: Path::new("/jvm/home"),
            context: &ctx,
            platform: &platform,
        })
        .unwrap();
        let args = &assembled.arguments;

        assert_eq!(args[0], "/Apps/Demo.app/Contents/MacOS/Demo");
        assert_eq!(args[1], "-Djava.library.path=/Apps/Demo.app/Contents/MacOS");
        let class_path = position(args, "-Djava.class.path=/Apps/Demo.app/Contents/Java/app.jar");
        let heap = position(args, "-Xmx8000m");
        let runtime_option = position(args, "-Dhome=/jvm/home");
        let stack = position(args, "-Xss4m");
        let foo = position(args, "-Dfoo=bar");
        let main = position(args, "com.example.Main");
        let app_arg = position(args, "--app-arg");
        let passthrough = position(args, "file.txt");

        assert!(class_path < heap);
        assert!(heap < runtime_option);
        assert!(runtime_option < stack);
        assert!(stack < foo);
        assert!(foo < main);
        assert!(main < app_arg);
        assert!(app_arg < passthrough);
        assert_eq!(passthrough, args.len() - 1);
        assert!(!args.iter().any(|arg| arg.starts_with("-psn_")));
        assert!(!args.contains(&"-Dunknown=1".to_string()));
        assert!(assembled.app_class_path.is_empty());
    }

    #[test]
    fn module_launch_uses_module_flag() {
        let paths = BundlePaths::new(PathBuf::from("/Apps/Demo.app")).unwrap();
        let config = LaunchConfiguration {
            main_class: Some("com.example/com.example.Main".into()),
            ..LaunchConfiguration::default()
        };
        let ctx = context(&["demo"]);
        let platform = FakePlatform::default();

        let assembled = assemble_arguments(&AssemblyInput {
            config: &config,
            paths: &paths,
            runtime_root: Path::new("/jvm"),
            context: &ctx,
            platform: &platform,
        })
        .unwrap();
        let args = &assembled.arguments;

        assert!(args.contains(&"--module-path=/Apps/Demo.app/Contents/Java".to_string()));
        let flag = position(args, "-m");
        assert_eq!(args[flag + 1], "com.example/com.example.Main");
    }

    #[test]
    fn conflicting_launchers_never_reach_assembly() {
        let paths = BundlePaths::new(PathBuf::from("/Apps/Demo.app")).unwrap();
        let config = LaunchConfiguration {
            main_class: Some("com.example/com.example.Main".into()),
            jar_launcher: Some("app.jar".into()),
            ..LaunchConfiguration::default()
        };
        let ctx = context(&["demo"]);
        let platform = FakePlatform::default();

        let result = assemble_arguments(&AssemblyInput {
            config: &config,
            paths: &paths,
            runtime_root: Path::new("/jvm"),
            context: &ctx,
            platform: &platform,
        });
        assert!(matches!(result, Err(LauncherError::ConflictingLaunchers)));
    }

    #[test]
    fn jar_launcher_without_main_class_uses_jar_flag() {
        let paths = BundlePaths::new(PathBuf::from("/Apps/Demo.app")).unwrap();
        let config = LaunchConfiguration {
            jar_launcher: Some("app.jar".into()),
            ..LaunchConfiguration::default()
        };
        let ctx = context(&["demo", "--verbose"]);
        let platform = FakePlatform::default();

        let args = assemble_arguments(&AssemblyInput {
            config: &config,
            paths: &paths,
            runtime_root: Path::new("/jvm"),
            context: &ctx,
            platform: &platform,
        })
        .unwrap()
        .arguments;

        let flag = position(&args, "-jar");
        assert_eq!(args[flag + 1], "/Apps/Demo.app/Contents/Java/app.jar");
        // IgnoreVerbose is off, so the flag reaches the application.
        assert_eq!(args.last().map(String::as_str), Some("--verbose"));
    }

    #[test]
    fn jnlp_launch_swaps_in_bootstrap_and_stages_descriptor() {
        let temp = std::env::temp_dir().join(format!("args-test-jnlp-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(temp.join("Contents/Java")).unwrap();
        std::fs::write(temp.join("Contents/Java/app.jnlp"), b"<jnlp/>").unwrap();

        let paths = BundlePaths::new(temp.clone()).unwrap();
        let config = LaunchConfiguration {
            jnlp_launcher: true,
            jnlp_file: Some("app.jnlp".into()),
            class_path: vec!["/discarded.jar".into()],
            arguments: vec!["-open".into()],
            ..LaunchConfiguration::default()
        };
        let ctx = context(&["demo"]);
        let platform = FakePlatform::default();

        let assembled = assemble_arguments(&AssemblyInput {
            config: &config,
            paths: &paths,
            runtime_root: Path::new("/jre"),
            context: &ctx,
            platform: &platform,
        })
        .unwrap();
        let args = &assembled.arguments;

        assert!(args.contains(&"-Djava.class.path=/jre/lib/deploy.jar".to_string()));
        assert!(!args.iter().any(|arg| arg.contains("discarded.jar")));
        assert!(args.contains(&"-Djnlpx.jvm=/jre/bin/java".to_string()));
        let main = position(args, jnlp::JNLP_MAIN_CLASS);
        assert!(main < position(args, "-open"));
        assert_eq!(assembled.app_class_path, vec!["/jre/lib/deploy.jar".to_string()]);

        let staged = PathBuf::from(args.last().unwrap());
        assert!(staged.to_string_lossy().ends_with("-app.jnlp"));
        assert_eq!(std::fs::read(&staged).unwrap(), b"<jnlp/>");

        let _ = std::fs::remove_file(&staged);
        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn default_options_keep_order_and_take_overrides() {
        let defaults = vec![
            ("b".to_string(), "-Db=1".to_string()),
            ("a".to_string(), "-Da=1".to_string()),
        ];
        let overrides = HashMap::from([("a".to_string(), "-Da=2".to_string())]);

        assert_eq!(
            merge_default_options(&defaults, Some(&overrides)),
            vec!["-Db=1".to_string(), "-Da=2".to_string()]
        );
        assert_eq!(
            merge_default_options(&defaults, None),
            vec!["-Db=1".to_string(), "-Da=1".to_string()]
        );
    }

    #[test]
    fn stored_default_overrides_expand_placeholders() {
        let paths = BundlePaths::new(PathBuf::from("/Apps/Demo.app")).unwrap();
        let config = LaunchConfiguration {
            bundle_identifier: Some("com.example.demo".into()),
            main_class: Some("Main".into()),
            class_path: vec!["/Apps/Demo.app/Contents/Java/app.jar".into()],
            default_options: vec![
                ("Log".into(), "-Dlog=default".into()),
                ("Agent".into(), "-Dagent=none".into()),
            ],
            ..LaunchConfiguration::default()
        };
        let overrides = HashMap::from([
            ("Log".to_string(), "-Dlog=$APP_ROOT/Contents/log.xml".to_string()),
            ("Agent".to_string(), "-Dagent=$JVM_RUNTIME/lib/agent.jar".to_string()),
        ]);
        let platform = FakePlatform {
            options: HashMap::from([("/com/example/demo/JVMOptions/".to_string(), overrides)]),
            ..FakePlatform::default()
        };
        let ctx = context(&["demo"]);

        let assembled = assemble_arguments(&AssemblyInput {
            config: &config,
            paths: &paths,
            runtime_root: Path::new("/jvm/home"),
            context: &ctx,
            platform: &platform,
        })
        .unwrap();

        let args = &assembled.arguments;
        assert!(args.contains(&"-Dlog=/Apps/Demo.app/Contents/log.xml".to_string()));
        assert!(args.contains(&"-Dagent=/jvm/home/lib/agent.jar".to_string()));
        assert!(!args.iter().any(|arg| arg.contains('$')));
    }
}
