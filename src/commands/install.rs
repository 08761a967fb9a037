// The whole getgo run: listing -> link -> version dir -> download -> extract -> symlink.

// Pipeline error type.
use crate::libs::errors::Result;
// Step 1: find the download link for this platform.
use crate::libs::listing::{fetch_listing, find_candidate};
// Step 2: where that version lives on disk.
use crate::libs::paths::install_path;
// Network access, injected by the caller.
use crate::libs::utilities::assets::Transport;
// Step 3: stream the archive onto disk.
use crate::libs::utilities::compression::extract_archive;
// Step 4: the "already installed" check and the `.path` symlink.
use crate::libs::utilities::file_operations::{path_exists, update_current_link};
// Suffix and container format for the target platform.
use crate::libs::utilities::platform::{ArchiveFormat, archive_suffix};
// Injected settings and the run result.
use crate::schemas::config::InstallerConfig;
use crate::schemas::release::Outcome;
// Logging macros and colors.
use crate::{log_debug, log_info};
use colored::Colorize;

/// Installs the newest release for `config.platform`, unless it is already there.
///
/// Only the first download link whose filename ends with the platform suffix is
/// considered. If its version directory exists nothing is downloaded. Otherwise
/// the archive is streamed into `<install_root>/<version>` and `<install_root>/.path`
/// is pointed at it.
///
/// # Returns
/// * `Ok(Outcome::Installed { .. })` after a fresh install.
/// * `Ok(Outcome::AlreadyInstalled { .. })` if the version directory already existed.
/// * `Ok(Outcome::NoMatchingRelease { .. })` if the listing has nothing for this platform.
/// * `Err(..)` on the first transport, parse or filesystem failure. A failed
///   extraction leaves whatever was already written in place.
pub fn run(config: &InstallerConfig, transport: &dyn Transport) -> Result<Outcome> {
    let suffix = archive_suffix(&config.platform);
    log_debug!("[Install] Looking for archives ending in {}", suffix.green());

    // Fetch and scan the downloads page.
    let page = fetch_listing(transport, &config.listing_url)?;
    let Some(candidate) = find_candidate(&page, &config.listing_url, &suffix)? else {
        return Ok(Outcome::NoMatchingRelease { suffix });
    };
    println!("filename = {}", candidate.filename);

    // Home is only needed from here on: a listing with no match never touches it.
    let install_root = config.install_root()?;
    let (version, install_dir) = install_path(&install_root, &candidate.filename)?;
    // An existing version directory is taken as a complete install.
    if path_exists(&install_dir)? {
        println!("already have this version");
        return Ok(Outcome::AlreadyInstalled {
            version,
            path: install_dir,
        });
    }

    let format = ArchiveFormat::from_filename(&candidate.filename)?;
    println!("url = {}", candidate.url);
    // The body is consumed as it arrives; nothing is buffered in memory.
    let body = transport.get(&candidate.url)?;
    let written = extract_archive(format, body, &install_dir)?;
    log_info!(
        "Extracted {} entries into {}",
        written,
        install_dir.display().to_string().cyan()
    );

    // Only after a complete extraction does `.path` move.
    update_current_link(&install_dir)?;

    Ok(Outcome::Installed {
        version,
        path: install_dir,
    })
}
