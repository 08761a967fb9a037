// Small filesystem helpers: existence checks and the current-version symlink.

use crate::libs::errors::{GetGoError, Result};
use crate::log_debug;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the symlink, next to the version directories, that points at the active one.
pub const CURRENT_LINK: &str = ".path";

/// Like `Path::try_exists`, but errors other than "not found" are reported as
/// filesystem failures instead of being folded into `false`.
pub fn path_exists(path: &Path) -> Result<bool> {
    path.try_exists()
        .map_err(|e| GetGoError::io("checking", path, e))
}

/// Points `<parent of install_dir>/.path` at `install_dir`.
///
/// Whatever already sits at that path (a live or dangling symlink, a file) is
/// removed first. The new link's target is the base name of `install_dir`, so it
/// only resolves relative to its own directory.
///
/// # Returns
/// * `Ok(link_path)` on success.
/// * `Err(GetGoError::Io)` if the old entry cannot be removed or the link cannot be created.
pub fn update_current_link(install_dir: &Path) -> Result<PathBuf> {
    let parent = install_dir.parent().unwrap_or_else(|| Path::new("."));
    let link = parent.join(CURRENT_LINK);
    let target = install_dir
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| {
            GetGoError::io(
                "linking",
                install_dir,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "no directory name"),
            )
        })?;

    // symlink_metadata so a dangling link still counts as present.
    if let Ok(existing) = fs::symlink_metadata(&link) {
        remove_existing(&link, &existing).map_err(|e| GetGoError::io("removing", &link, e))?;
        log_debug!("[Link] Removed old {}", link.display().to_string().dimmed());
    }

    create_dir_link(&target, &link)
        .map_err(|e| GetGoError::io("creating symlink", &link, e))?;
    log_debug!(
        "[Link] {} -> {}",
        link.display().to_string().cyan(),
        target.display().to_string().green()
    );
    Ok(link)
}

/// Removes whatever occupies the link path. Directory symlinks on Windows are
/// directories as far as removal goes, so they need `remove_dir`.
fn remove_existing(path: &Path, existing: &fs::Metadata) -> std::io::Result<()> {
    let file_type = existing.file_type();
    if file_type.is_dir() || (cfg!(windows) && file_type.is_symlink() && is_dir_link(existing)) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(windows)]
fn is_dir_link(existing: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    // FILE_ATTRIBUTE_DIRECTORY is kept on the link itself for symlink_dir links.
    existing.file_attributes() & 0x10 != 0
}

#[cfg(not(windows))]
fn is_dir_link(_existing: &fs::Metadata) -> bool {
    false
}

#[cfg(unix)]
fn create_dir_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_dir_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn link_points_at_version_by_base_name() {
        let root = TempDir::new().unwrap();
        let version_dir = root.path().join("1.22.3");
        fs::create_dir(&version_dir).unwrap();
        fs::write(version_dir.join("VERSION"), "go1.22.3").unwrap();

        let link = update_current_link(&version_dir).unwrap();

        assert_eq!(link, root.path().join(".path"));
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("1.22.3"));
        assert_eq!(fs::read_to_string(link.join("VERSION")).unwrap(), "go1.22.3");
    }

    #[test]
    fn existing_link_is_replaced() {
        let root = TempDir::new().unwrap();
        let old = root.path().join("1.21.0");
        let new = root.path().join("1.22.3");
        fs::create_dir(&old).unwrap();
        fs::create_dir(&new).unwrap();

        update_current_link(&old).unwrap();
        let link = update_current_link(&new).unwrap();
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("1.22.3"));

        // Running again with the same version leaves an identical link.
        let again = update_current_link(&new).unwrap();
        assert_eq!(fs::read_link(&again).unwrap(), PathBuf::from("1.22.3"));
    }

    #[test]
    fn dangling_link_is_replaced() {
        let root = TempDir::new().unwrap();
        let version_dir = root.path().join("1.22.3");
        fs::create_dir(&version_dir).unwrap();
        std::os::unix::fs::symlink("1.0.0-gone", root.path().join(".path")).unwrap();

        let link = update_current_link(&version_dir).unwrap();
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("1.22.3"));
    }

    #[test]
    fn empty_directory_in_the_way_is_replaced() {
        let root = TempDir::new().unwrap();
        let version_dir = root.path().join("1.22.3");
        fs::create_dir(&version_dir).unwrap();
        fs::create_dir(root.path().join(".path")).unwrap();

        let link = update_current_link(&version_dir).unwrap();
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("1.22.3"));
    }

    #[test]
    fn existence_check_distinguishes_missing_paths() {
        let root = TempDir::new().unwrap();
        assert!(path_exists(root.path()).unwrap());
        assert!(!path_exists(&root.path().join("1.22.3")).unwrap());
    }
}
