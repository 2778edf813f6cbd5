// ─── Placeholder Substitution ───
// The only place where `$APP_ROOT` and `$JVM_RUNTIME` are expanded.

use tracing::debug;

use super::config::LaunchConfiguration;

/// Replaced by the bundle root in every configuration string.
pub const APP_ROOT_PLACEHOLDER: &str = "$APP_ROOT";
/// Replaced by the resolved runtime root, in JVM options only.
pub const JVM_RUNTIME_PLACEHOLDER: &str = "$JVM_RUNTIME";

pub fn expand_app_root(value: &str, app_root: &str) -> String {
    value.replace(APP_ROOT_PLACEHOLDER, app_root)
}

pub fn expand_runtime(value: &str, runtime_root: &str) -> String {
    value.replace(JVM_RUNTIME_PLACEHOLDER, runtime_root)
}

fn expand_all(values: &mut [String], app_root: &str) {
    for value in values.iter_mut() {
        if value.contains(APP_ROOT_PLACEHOLDER) {
            *value = expand_app_root(value, app_root);
        }
    }
}

/// First pass, right after loading: `$APP_ROOT` everywhere it may appear.
pub fn apply_app_root(config: &mut LaunchConfiguration, app_root: &str) {
    expand_all(&mut config.options, app_root);
    expand_all(&mut config.class_path, app_root);
    expand_all(&mut config.module_path, app_root);
    expand_all(&mut config.arguments, app_root);

    for (_, value) in config.default_options.iter_mut() {
        if value.contains(APP_ROOT_PLACEHOLDER) {
            *value = expand_app_root(value, app_root);
        }
    }

    if let Some(dir) = config.working_directory.as_mut() {
        *dir = expand_app_root(dir, app_root);
    }
    if let Some(file) = config.jnlp_file.as_mut() {
        *file = expand_app_root(file, app_root);
    }
}

/// Second pass, once the runtime is known: `$JVM_RUNTIME` in JVM options.
pub fn apply_runtime_root(options: &mut [String], runtime_root: &str) {
    for option in options.iter_mut() {
        if option.contains(JVM_RUNTIME_PLACEHOLDER) {
            *option = expand_runtime(option, runtime_root);
        }
    }
}

/// Environment variables whose values change under `$APP_ROOT` expansion.
pub fn environment_rewrites<I>(vars: I, app_root: &str) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter(|(_, value)| value.contains(APP_ROOT_PLACEHOLDER))
        .map(|(key, value)| {
            let expanded = expand_app_root(&value, app_root);
            debug!("Environment {}={}", key, expanded);
            (key, expanded)
        })
        .collect()
}

/// Rewrite the process environment in place. Runs once, before any thread is started.
pub fn apply_environment(app_root: &str) {
    let vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    for (key, value) in environment_rewrites(vars, app_root) {
        std::env::set_var(key, value);
    }
}
