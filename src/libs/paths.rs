// Turns a release filename into the directory that version installs into.

use crate::libs::errors::{GetGoError, Result};
use crate::log_debug;
use colored::Colorize;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"go(?P<version>\d+(\.\d+)+)").expect("version pattern is a valid regex")
});

/// Extracts the dotted version that follows the literal `go` in a release filename.
///
/// `go1.22.3.linux-amd64.tar.gz` gives `1.22.3`, `go1.21.linux-386.tar.gz` gives `1.21`.
pub fn parse_version(filename: &str) -> Result<String> {
    VERSION_PATTERN
        .captures(filename)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| GetGoError::MissingVersion {
            filename: filename.to_string(),
        })
}

/// Resolves `<install_root>/<version>` for a release filename.
///
/// # Returns
/// * `Ok((version, install_dir))`
/// * `Err(GetGoError::MissingVersion)` if the filename carries no version.
pub fn install_path(install_root: &Path, filename: &str) -> Result<(String, PathBuf)> {
    let version = parse_version(filename)?;
    let install_dir = install_root.join(&version);
    log_debug!(
        "[Paths] {} installs into {}",
        filename.bold(),
        install_dir.display().to_string().cyan()
    );
    Ok((version, install_dir))
}
