/// Which process arguments to drop before passing the rest to the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgumentFilter {
    pub ignore_psn: bool,
    pub ignore_verbose: bool,
}

impl ArgumentFilter {
    /// Retained arguments, in their original relative order.
    pub fn apply(&self, args: &[String], verbose_flag: &str) -> Vec<String> {
        args.iter()
            .filter(|arg| !(self.ignore_psn && is_process_serial_number(arg)))
            .filter(|arg| !(self.ignore_verbose && arg.as_str() == verbose_flag))
            .cloned()
            .collect()
    }
}

/// `-psn_<digit>_<digits>`, added by older Finder launches.
pub fn is_process_serial_number(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix("-psn_") else {
        return false;
    };
    let Some((major, minor)) = rest.split_once('_') else {
        return false;
    };

    major.len() == 1
        && major.bytes().all(|b| b.is_ascii_digit())
        && !minor.is_empty()
        && minor.bytes().all(|b| b.is_ascii_digit())
}
