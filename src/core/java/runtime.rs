use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info, instrument, warn};

use crate::core::error::RuntimeKind;

use super::probe;
use super::version::VersionRequirement;

/// Runtime installed by the legacy browser plug-in; always a JRE.
const BUNDLED_PLUGIN_RUNTIME: &str = "/Library/Internet Plug-Ins/JavaAppletPlugin.plugin/Contents/Home";
/// Platform helper that reports installed JDKs matching a version selector.
const REGISTRY_HELPER: &str = "/usr/libexec/java_home";
const REGISTRY_NO_MATCH: &str = "Unable to find";

/// One runtime considered during discovery.
#[derive(Debug, Clone)]
pub struct RuntimeCandidate {
    pub root: PathBuf,
    pub library: Option<PathBuf>,
    pub major: Option<u32>,
}

impl RuntimeCandidate {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            library: None,
            major: None,
        }
    }
}

/// JRE/JDK preference after the mutual-exclusion rule has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimePreference {
    pub jre_preferred: bool,
    pub jdk_preferred: bool,
    /// Both flags were requested; both were dropped.
    pub conflicting: bool,
}

impl RuntimePreference {
    /// Both flags set cancel each other out.
    pub fn new(jre_preferred: bool, jdk_preferred: bool) -> Self {
        if jre_preferred && jdk_preferred {
            return Self {
                conflicting: true,
                ..Self::default()
            };
        }

        Self {
            jre_preferred,
            jdk_preferred,
            conflicting: false,
        }
    }

    /// Report a dropped JRE/JDK conflict. Called once per launch, after logging is up.
    pub fn report_conflict(&self) {
        if self.conflicting {
            warn!("Both JVMJREPreferred and JVMJDKPreferred are set; ignoring both");
        }
    }

    /// Kind of runtime named in the "not found" message.
    pub fn sought_kind(&self) -> RuntimeKind {
        if self.jdk_preferred {
            RuntimeKind::Jdk
        } else {
            RuntimeKind::Jre
        }
    }
}

/// Requirement actually used for discovery: floored, and pinned to 8 for JNLP.
pub fn effective_requirement(requirement: VersionRequirement, jnlp: bool) -> VersionRequirement {
    let floored = requirement.floored();
    if jnlp {
        floored.clamped_for_jnlp()
    } else {
        floored
    }
}

/// Searches the well-known runtime locations.
#[derive(Debug, Clone)]
pub struct RuntimeLocator {
    bundled_runtime: PathBuf,
    registry_helper: PathBuf,
}

impl Default for RuntimeLocator {
    fn default() -> Self {
        Self::new(
            PathBuf::from(BUNDLED_PLUGIN_RUNTIME),
            PathBuf::from(REGISTRY_HELPER),
        )
    }
}

impl RuntimeLocator {
    pub fn new(bundled_runtime: PathBuf, registry_helper: PathBuf) -> Self {
        Self {
            bundled_runtime,
            registry_helper,
        }
    }

    /// Find a runtime satisfying `requirement`; the pre-bundled runtime wins over the registry.
    ///
    /// `requirement` must already be the effective one (see [`effective_requirement`]).
    #[instrument(skip(self))]
    pub fn locate(
        &self,
        requirement: VersionRequirement,
        preference: RuntimePreference,
    ) -> Option<RuntimeCandidate> {
        if !preference.jdk_preferred {
            if probe::check_compatibility(&self.bundled_runtime, requirement) {
                info!("Using pre-bundled runtime {:?}", self.bundled_runtime);
                return Some(self.candidate(self.bundled_runtime.clone()));
            }
            debug!("Pre-bundled runtime {:?} not usable", self.bundled_runtime);
        }

        if !preference.jre_preferred {
            if let Some(root) = self.query_registry(requirement) {
                if probe::check_compatibility(&root, requirement) {
                    info!("Using registry runtime {:?}", root);
                    return Some(self.candidate(root));
                }
                debug!("Registry runtime {:?} failed re-probe", root);
            }
        }

        None
    }

    fn candidate(&self, root: PathBuf) -> RuntimeCandidate {
        let mut candidate = RuntimeCandidate::new(root);
        candidate.major = probe::probe_major(&candidate.root);
        candidate
    }

    /// Ask the registry helper for a runtime root matching the requirement's selector.
    pub fn query_registry(&self, requirement: VersionRequirement) -> Option<PathBuf> {
        let selector = requirement.selector();
        let output = match Command::new(&self.registry_helper)
            .args(["-v", &selector])
            .output()
        {
            Ok(output) => output,
            Err(error) => {
                debug!("Cannot run {:?}: {}", self.registry_helper, error);
                return None;
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains(REGISTRY_NO_MATCH) {
            debug!("Registry has no runtime for {}: {}", selector, stderr.trim());
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from)
    }
}
