// ─── Host Properties ───
// `-D` properties describing the user's environment at launch time.

use crate::core::bundle::safe_path_str;
use crate::core::platform::folders::is_sandbox_container;
use crate::core::platform::{
    FolderScope, Platform, SpecialFolder, MODIFIER_FLAGS, SPECIAL_FOLDER_PROPERTIES,
};

fn property(name: &str, value: impl std::fmt::Display) -> String {
    format!("-D{}={}", name, value)
}

/// Special folders, home, sandbox and appearance properties. Unresolvable folders are skipped.
pub fn environment_properties(platform: &dyn Platform) -> Vec<String> {
    let mut properties: Vec<String> = SPECIAL_FOLDER_PROPERTIES
        .iter()
        .filter_map(|(name, folder, scope)| {
            platform
                .special_folder(*folder, *scope)
                .map(|path| property(name, safe_path_str(&path)))
        })
        .collect();

    if let Some(home) = platform.home_dir() {
        properties.push(property("UserHome", safe_path_str(&home)));
    }

    let sandboxed = platform
        .special_folder(SpecialFolder::Library, FolderScope::User)
        .is_some_and(|library| is_sandbox_container(&library));
    properties.push(property("SandboxEnabled", sandboxed));
    properties.push(property("DarkMode", platform.dark_mode()));

    properties
}

/// `-DLaunchModifierFlags=<mask>` plus one boolean per known modifier, when available.
pub fn modifier_properties(platform: &dyn Platform) -> Vec<String> {
    let Some(mask) = platform.modifier_flags() else {
        return Vec::new();
    };

    std::iter::once(property("LaunchModifierFlags", mask))
        .chain(MODIFIER_FLAGS.iter().map(|(name, bit)| {
            property(&format!("LaunchModifierFlag{}", name), mask & bit != 0)
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::platform::tests::FakePlatform;

    #[test]
    fn resolvable_folders_become_properties() {
        let platform = FakePlatform {
            folders: vec![
                (SpecialFolder::Documents, FolderScope::User, PathBuf::from("/Users/me/Documents")),
                (SpecialFolder::Library, FolderScope::System, PathBuf::from("/Library")),
            ],
            home: Some(PathBuf::from("/Users/me")),
            dark: true,
            ..FakePlatform::default()
        };

        assert_eq!(
            environment_properties(&platform),
            vec![
                "-DDocumentsDirectory=/Users/me/Documents".to_string(),
                "-DSystemLibraryDirectory=/Library".to_string(),
                "-DUserHome=/Users/me".to_string(),
                "-DSandboxEnabled=false".to_string(),
                "-DDarkMode=true".to_string(),
            ]
        );
    }

    #[test]
    fn sandbox_follows_user_library_contents() {
        let temp = std::env::temp_dir().join(format!("properties-test-sandbox-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        let library = temp.join("Library");
        std::fs::create_dir_all(&library).unwrap();

        let platform = FakePlatform {
            folders: vec![(SpecialFolder::Library, FolderScope::User, library.clone())],
            ..FakePlatform::default()
        };

        let properties = environment_properties(&platform);
        assert!(properties.contains(&"-DSandboxEnabled=false".to_string()));
        assert!(!properties.iter().any(|p| p.starts_with("-DUserHome=")));

        std::fs::create_dir_all(library.join("Containers")).unwrap();
        let properties = environment_properties(&platform);
        assert!(properties.contains(&"-DSandboxEnabled=true".to_string()));

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn modifier_properties_expand_each_bit() {
        let none = FakePlatform::default();
        assert!(modifier_properties(&none).is_empty());

        let shift_and_command = FakePlatform {
            modifiers: Some((1 << 17) | (1 << 20)),
            ..FakePlatform::default()
        };
        let properties = modifier_properties(&shift_and_command);
        assert_eq!(properties.len(), 9);
        assert_eq!(properties[0], format!("-DLaunchModifierFlags={}", (1u64 << 17) | (1 << 20)));
        assert!(properties.contains(&"-DLaunchModifierFlagShift=true".to_string()));
        assert!(properties.contains(&"-DLaunchModifierFlagCommand=true".to_string()));
        assert!(properties.contains(&"-DLaunchModifierFlagCapsLock=false".to_string()));
        assert!(properties.contains(&"-DLaunchModifierFlagFunction=false".to_string()));
    }
}
