use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderScope {
    User,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFolder {
    Library,
    Documents,
    ApplicationSupport,
    Caches,
    Applications,
    Desktop,
    Downloads,
    Movies,
    Music,
    Pictures,
    SharedPublic,
    Users,
}

/// System property name for each special folder, in emission order.
pub const SPECIAL_FOLDER_PROPERTIES: [(&str, SpecialFolder, FolderScope); 16] = [
    ("LibraryDirectory", SpecialFolder::Library, FolderScope::User),
    ("DocumentsDirectory", SpecialFolder::Documents, FolderScope::User),
    ("ApplicationSupportDirectory", SpecialFolder::ApplicationSupport, FolderScope::User),
    ("CachesDirectory", SpecialFolder::Caches, FolderScope::User),
    ("ApplicationsDirectory", SpecialFolder::Applications, FolderScope::User),
    ("DesktopDirectory", SpecialFolder::Desktop, FolderScope::User),
    ("DownloadsDirectory", SpecialFolder::Downloads, FolderScope::User),
    ("MoviesDirectory", SpecialFolder::Movies, FolderScope::User),
    ("MusicDirectory", SpecialFolder::Music, FolderScope::User),
    ("PicturesDirectory", SpecialFolder::Pictures, FolderScope::User),
    ("SharedPublicDirectory", SpecialFolder::SharedPublic, FolderScope::User),
    ("SystemLibraryDirectory", SpecialFolder::Library, FolderScope::System),
    ("SystemApplicationSupportDirectory", SpecialFolder::ApplicationSupport, FolderScope::System),
    ("SystemCachesDirectory", SpecialFolder::Caches, FolderScope::System),
    ("SystemApplicationsDirectory", SpecialFolder::Applications, FolderScope::System),
    ("SystemUserDirectory", SpecialFolder::Users, FolderScope::System),
];

pub fn resolve(folder: SpecialFolder, scope: FolderScope) -> Option<PathBuf> {
    match scope {
        FolderScope::User => user_folder(folder),
        FolderScope::System => system_folder(folder),
    }
}

fn user_folder(folder: SpecialFolder) -> Option<PathBuf> {
    match folder {
        SpecialFolder::Library => existing_dir(dirs::home_dir()?.join("Library")),
        SpecialFolder::Documents => dirs::document_dir(),
        SpecialFolder::ApplicationSupport => dirs::data_dir(),
        SpecialFolder::Caches => dirs::cache_dir(),
        SpecialFolder::Applications => existing_dir(dirs::home_dir()?.join("Applications")),
        SpecialFolder::Desktop => dirs::desktop_dir(),
        SpecialFolder::Downloads => dirs::download_dir(),
        SpecialFolder::Movies => dirs::video_dir(),
        SpecialFolder::Music => dirs::audio_dir(),
        SpecialFolder::Pictures => dirs::picture_dir(),
        SpecialFolder::SharedPublic => dirs::public_dir(),
        SpecialFolder::Users => None,
    }
}

fn system_folder(folder: SpecialFolder) -> Option<PathBuf> {
    let path = match folder {
        SpecialFolder::Library => "/Library",
        SpecialFolder::ApplicationSupport => "/Library/Application Support",
        SpecialFolder::Caches => "/Library/Caches",
        SpecialFolder::Applications => "/Applications",
        SpecialFolder::Users => "/Users",
        _ => return None,
    };
    existing_dir(PathBuf::from(path))
}

fn existing_dir(path: PathBuf) -> Option<PathBuf> {
    path.is_dir().then_some(path)
}

/// Sandboxing is on when the user Library directory has a `Containers` subdirectory.
pub fn is_sandbox_container(library_dir: &Path) -> bool {
    library_dir.join("Containers").is_dir()
}
