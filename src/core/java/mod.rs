pub mod library;
pub mod probe;
pub mod runtime;
pub mod version;

pub use library::{resolve_library, runtime_home};
pub use probe::check_compatibility;
pub use runtime::{effective_requirement, RuntimeCandidate, RuntimeLocator, RuntimePreference};
pub use version::{extract_major_version, VersionRequirement};
