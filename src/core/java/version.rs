/// Oldest Java major version the launcher will ever accept.
pub const MINIMUM_SUPPORTED_MAJOR: u32 = 7;

/// Highest major version that still ships the JNLP bootstrap (`javaws`).
pub const JNLP_MAXIMUM_MAJOR: u32 = 8;

/// Required runtime version: either exactly `major` or anything newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionRequirement {
    pub major: u32,
    pub exact: bool,
}

impl VersionRequirement {
    pub fn new(major: u32, exact: bool) -> Self {
        Self { major, exact }
    }

    /// Parse a `JVMVersion` value such as `"11+"`, `"1.8"` or `"17"`.
    ///
    /// A trailing `+` means "this version or later"; any other non-empty value is exact.
    pub fn from_config(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).filter(|value| !value.is_empty());
        Self {
            major: extract_major_version(raw),
            exact: raw.is_some_and(|value| !value.ends_with('+')),
        }
    }

    /// Raise an unconstrained (or too old) requirement to the supported floor.
    pub fn floored(self) -> Self {
        Self {
            major: self.major.max(MINIMUM_SUPPORTED_MAJOR),
            exact: self.exact,
        }
    }

    /// JNLP needs a runtime that still ships `javaws`, so newer requirements pin to 8.
    pub fn clamped_for_jnlp(self) -> Self {
        if self.major > JNLP_MAXIMUM_MAJOR {
            Self {
                major: JNLP_MAXIMUM_MAJOR,
                exact: true,
            }
        } else {
            self
        }
    }

    pub fn accepts(&self, major: u32) -> bool {
        if self.exact {
            major == self.major
        } else {
            major >= self.major
        }
    }

    /// Version selector understood by the platform registry helper (`java_home -v`).
    pub fn selector(&self) -> String {
        let prefix = if self.major <= 8 { "1." } else { "" };
        let suffix = if self.exact { "" } else { "+" };
        format!("{}{}{}", prefix, self.major, suffix)
    }
}

impl std::fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.exact {
            write!(f, "{}", self.major)
        } else {
            write!(f, "{}+", self.major)
        }
    }
}

/// Normalized major version of a Java version string.
///
/// `"1.8.0_211"` → 8, `"11.0.2"` → 11, `"9"` → 9, anything unparseable → 0.
pub fn extract_major_version(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };

    let residue: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    let residue = residue.strip_prefix("1.").unwrap_or(&residue);
    let head = residue.split('.').next().unwrap_or("");

    head.parse().unwrap_or(0)
}
