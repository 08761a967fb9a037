// Unpacks a Go release archive straight into its version directory.
//
// Every entry name is expected to start with one top-level directory (`go/`),
// which is dropped; the rest is joined onto the install directory. Only
// directories and regular files are accepted.

// Our error type; every failure below is reported through it.
use crate::libs::errors::{GetGoError, Result};
// Which container format the matched release uses.
use crate::libs::utilities::platform::ArchiveFormat;
// Debug-level logging, only visible with `--debug`.
use crate::log_debug;
// The 'colored' crate makes paths and counts stand out in the debug output.
use colored::Colorize;
// `MultiGzDecoder` keeps reading past the end of the first gzip member,
// so archives written as several concatenated members unpack completely.
use flate2::read::MultiGzDecoder;
// Directory creation, file creation and permission changes.
use std::fs::{self, File};
// Streaming copies, plus `Seek` to rewind the spooled zip file.
use std::io::{self, Read, Seek, SeekFrom};
// Component-wise path mapping keeps entries inside the install directory.
use std::path::{Component, Path, PathBuf};
// Entry-by-entry tar reader; `EntryType` drives the dispatch below.
use tar::{Archive, EntryType};
// Reader for the `.zip` releases published for Windows.
use zip::ZipArchive;

/// Permissions for every directory the extractor creates.
const DIR_MODE: u32 = 0o755;

/// Extracts `body` (an archive in `format`) into `install_dir`.
///
/// Each mapped path is printed to stdout as it is written.
///
/// # Returns
/// * `Ok(count)` with the number of entries written.
/// * `Err(..)` on the first entry that cannot be mapped, is of an unsupported
///   type, or fails to write. Entries already written are left in place.
pub fn extract_archive(format: ArchiveFormat, body: impl Read, install_dir: &Path) -> Result<usize> {
    log_debug!(
        "[Extract] Unpacking {} archive into {}",
        format.extension().green(),
        install_dir.display().to_string().cyan()
    );
    match format {
        ArchiveFormat::TarGz => extract_tar_gz(body, install_dir),
        ArchiveFormat::Zip => extract_zip(body, install_dir),
    }
}

/// Streams a gzip-compressed tar archive into `install_dir`, one entry at a time.
pub fn extract_tar_gz(body: impl Read, install_dir: &Path) -> Result<usize> {
    // gzip first, then tar, both reading lazily from the network stream.
    let mut archive = Archive::new(MultiGzDecoder::new(body));
    let entries = archive.entries().map_err(archive_error)?;

    let mut count = 0;
    // Single forward pass; the iterator ends cleanly at the end of the archive.
    for entry in entries {
        let mut entry = entry.map_err(archive_error)?;

        // Raw header bytes (long GNU/PAX names already applied by `tar`).
        let name = {
            let raw = entry.path_bytes();
            let name = match std::str::from_utf8(&raw) {
                Ok(name) => name.to_string(),
                Err(_) => {
                    return Err(GetGoError::ArchivePath {
                        entry: String::from_utf8_lossy(&raw).into_owned(),
                        reason: "name is not valid UTF-8",
                    });
                }
            };
            name
        };
        let path = local_install_path(install_dir, &name)?;
        println!("{}", path.display()); // Progress line on stdout, one per entry.

        match entry.header().entry_type() {
            EntryType::Directory => create_dir(&path)?, // mkdir -p, idempotent.
            EntryType::Regular => {
                // Keep the mode recorded in the archive (e.g. 0755 for `bin/go`).
                let mode = entry.header().mode().map_err(archive_error)?;
                write_file(&path, mode, &mut entry)?;
            }
            // Symlinks, hard links, devices, FIFOs: nothing we know how to place.
            other => {
                return Err(GetGoError::UnsupportedEntry {
                    path,
                    kind: format!("{other:?}"),
                });
            }
        }
        count += 1;
    }

    log_debug!("[Extract] {} entries written", count.to_string().green());
    Ok(count)
}

/// Extracts a zip archive into `install_dir`.
///
/// Zip keeps its index at the end of the file, so the body is spooled into an
/// anonymous temporary file first.
pub fn extract_zip(mut body: impl Read, install_dir: &Path) -> Result<usize> {
    let mut spool = tempfile::tempfile().map_err(|e| GetGoError::io("creating", std::env::temp_dir(), e))?;
    let spooled = io::copy(&mut body, &mut spool)
        .map_err(|e| GetGoError::io("spooling archive into", std::env::temp_dir(), e))?;
    spool
        .seek(SeekFrom::Start(0))
        .map_err(|e| GetGoError::io("rewinding", std::env::temp_dir(), e))?;
    log_debug!("[Extract] Spooled {} bytes of zip archive", spooled);

    let mut archive = ZipArchive::new(spool).map_err(zip_error)?;
    // Zip entries come in central-directory order, which is archive order.
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(zip_error)?;
        let name = file.name().to_string();
        let path = local_install_path(install_dir, &name)?;
        println!("{}", path.display());

        // Only archives written on Unix carry a mode; check it for symlinks.
        let unix_mode = file.unix_mode();
        if unix_mode.is_some_and(|mode| mode & 0o170000 == 0o120000) {
            return Err(GetGoError::UnsupportedEntry {
                path,
                kind: "Symlink".to_string(),
            });
        }

        if file.is_dir() {
            create_dir(&path)?;
        } else {
            write_file(&path, unix_mode.unwrap_or(0o644), &mut file)?;
        }
    }

    Ok(archive.len())
}

/// Maps an archive entry name onto the filesystem: the first `/`-separated
/// segment is dropped and the remainder is joined onto `install_dir`.
///
/// A name with no `/` has no place to go and is rejected, as is any remainder
/// containing `..`, a root or a drive prefix.
pub fn local_install_path(install_dir: &Path, entry_name: &str) -> Result<PathBuf> {
    let reject = |reason| GetGoError::ArchivePath {
        entry: entry_name.to_string(),
        reason,
    };

    // `go/bin/gofmt` -> `bin/gofmt`; `go/` -> `` (the install dir itself).
    let (_, rest) = entry_name
        .split_once('/')
        .ok_or_else(|| reject("no top-level directory to strip"))?;

    let mut path = install_dir.to_path_buf();
    for component in Path::new(rest).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(reject("parent directory reference")),
            Component::RootDir | Component::Prefix(_) => return Err(reject("absolute path")),
        }
    }
    Ok(path)
}

fn create_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|e| GetGoError::io("creating directory", path, e))
}

/// Creates `path` (and its parents), applies `mode`, then copies `contents` in.
/// The handle is closed when it goes out of scope, on error paths too.
fn write_file(path: &Path, mode: u32, contents: &mut impl Read) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }

    // Create (or truncate), set the mode on the open handle, then fill it.
    let mut file = File::create(path).map_err(|e| GetGoError::io("opening", path, e))?;
    set_mode(&file, mode).map_err(|e| GetGoError::io("setting permissions on", path, e))?;
    io::copy(contents, &mut file).map_err(|e| GetGoError::io("writing", path, e))?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode & 0o7777))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}

fn archive_error(e: io::Error) -> GetGoError {
    GetGoError::Archive {
        message: e.to_string(),
    }
}

fn zip_error(e: zip::result::ZipError) -> GetGoError {
    GetGoError::Archive {
        message: e.to_string(),
    }
}
