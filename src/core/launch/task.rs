// ─── Launch Task ───
// Loads the runtime's launcher library and hands the assembled arguments to JLI_Launch.
// Control normally stays inside the runtime until the application exits.

use std::ffi::{c_char, c_int, c_uchar, CString};
use std::path::Path;

use libloading::{Library, Symbol};
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launcher::ResolvedLaunch;

/// Exported by every `libjli`.
pub const ENTRY_POINT: &str = "JLI_Launch";

type JBoolean = c_uchar;

/// `int JLI_Launch(argc, argv, jargc, jargv, appclassc, appclassv, fullversion, dotversion,
/// pname, lname, javaargs, cpwildcard, javaw, ergo)`
type JliLaunchFn = unsafe extern "C" fn(
    c_int,
    *mut *mut c_char,
    c_int,
    *mut *const c_char,
    c_int,
    *mut *const c_char,
    *const c_char,
    *const c_char,
    *const c_char,
    *const c_char,
    JBoolean,
    JBoolean,
    JBoolean,
    c_int,
) -> c_int;

/// Loaded launcher library; the entry point is looked up again on each call.
pub struct EntryPoint {
    library: Library,
    label: String,
}

impl EntryPoint {
    fn symbol(&self) -> LauncherResult<Symbol<'_, JliLaunchFn>> {
        let name = format!("{}\0", ENTRY_POINT);
        // SAFETY: JliLaunchFn matches the C declaration of JLI_Launch.
        unsafe { self.library.get::<JliLaunchFn>(name.as_bytes()) }.map_err(|e| {
            LauncherError::EntryPointMissing {
                label: self.label.clone(),
                detail: e.to_string(),
            }
        })
    }
}

/// Load `library` and check that it exports the launcher entry point.
///
/// `runtime_label` names the runtime in error messages.
pub fn open_entry_point(library: &Path, runtime_label: &str) -> LauncherResult<EntryPoint> {
    debug!("Loading {:?} for {}", library, runtime_label);

    // SAFETY: loading a runtime library runs its initializers; libjli has no
    // initializers with preconditions on the host process.
    let loaded = unsafe { Library::new(library) }.map_err(|e| LauncherError::LibraryLoad {
        label: runtime_label.to_string(),
        detail: e.to_string(),
    })?;

    let entry = EntryPoint {
        library: loaded,
        label: runtime_label.to_string(),
    };
    entry.symbol()?;
    Ok(entry)
}

/// Transfer control to the runtime. Returns the runtime's exit status.
pub fn invoke(resolved: &ResolvedLaunch) -> LauncherResult<i32> {
    let entry = open_entry_point(&resolved.library, &resolved.runtime_label)?;
    let launch = entry.symbol()?;

    let arguments = to_c_strings(&resolved.arguments)?;
    let app_class_path = to_c_strings(&resolved.app_class_path)?;

    let mut argv: Vec<*mut c_char> = arguments
        .iter()
        .map(|arg| arg.as_ptr() as *mut c_char)
        .chain(std::iter::once(std::ptr::null_mut()))
        .collect();
    let mut appclassv: Vec<*const c_char> = app_class_path
        .iter()
        .map(|entry| entry.as_ptr())
        .chain(std::iter::once(std::ptr::null()))
        .collect();

    let empty = CString::default();
    let java = c"java";

    info!(
        "Handing off to {} ({} arguments)",
        resolved.runtime_label,
        arguments.len()
    );
    debug!("Command (copy/paste): {}", format_command_for_logs(&resolved.arguments));

    // SAFETY: argv and appclassv are NULL-terminated and point into CStrings that
    // outlive the call; JLI_Launch does not retain them after returning.
    let status = unsafe {
        launch(
            arguments.len() as c_int,
            argv.as_mut_ptr(),
            0,
            std::ptr::null_mut(),
            app_class_path.len() as c_int,
            if app_class_path.is_empty() {
                std::ptr::null_mut()
            } else {
                appclassv.as_mut_ptr()
            },
            empty.as_ptr(),
            empty.as_ptr(),
            java.as_ptr(),
            java.as_ptr(),
            0,
            0,
            0,
            0,
        )
    };

    info!("{} returned {}", ENTRY_POINT, status);
    Ok(status)
}

fn to_c_strings(values: &[String]) -> LauncherResult<Vec<CString>> {
    values
        .iter()
        .map(|value| {
            CString::new(value.as_str()).map_err(|_| {
                LauncherError::Other(format!("Launch argument contains a NUL byte: {:?}", value))
            })
        })
        .collect()
}

/// Arguments joined into one line that can be pasted into a POSIX shell.
pub fn format_command_for_logs(arguments: &[String]) -> String {
    arguments
        .iter()
        .map(|arg| shell_escape(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote `raw` for `sh` unless it is made only of characters the shell leaves alone.
pub fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "''".to_string();
    }

    if raw.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '=' | ',' | '+')
    }) {
        return raw.to_string();
    }

    format!("'{}'", raw.replace('\'', "'\\''"))
}
