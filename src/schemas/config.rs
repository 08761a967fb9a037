// Runtime configuration for a getgo run.
//
// Nothing in the pipeline reads the process environment directly. The host
// platform, the install root and the listing URL are all resolved once here
// and handed down as an `InstallerConfig`, so tests can pretend to be any
// platform and install anywhere.

use crate::libs::errors::{GetGoError, Result};
use crate::libs::utilities::platform::{normalize_arch, normalize_os};
use crate::log_debug;
use colored::Colorize;
use std::env::consts;
use std::path::PathBuf;
use url::Url;

/// The downloads index scanned for release archives.
pub const DEFAULT_LISTING_URL: &str = "https://go.dev/dl/";

/// An operating system / CPU architecture pair, spelled the way Go spells them
/// in release filenames (`linux`/`amd64`, `darwin`/`arm64`, `windows`/`386`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Platform {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary was built for.
    pub fn host() -> Self {
        Platform::new(normalize_os(consts::OS), normalize_arch(consts::ARCH))
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }
}

/// Everything a run needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Page listing every release archive.
    pub listing_url: Url,
    /// Parent directory of all per-version directories and of the `.path` symlink.
    /// `None` means `<home>/opt/go`, looked up only once a release has matched.
    pub install_root: Option<PathBuf>,
    /// Platform whose archive should be installed.
    pub platform: Platform,
}

impl InstallerConfig {
    /// Builds the configuration from optional command-line overrides.
    ///
    /// # Arguments
    /// * `install_root`: Overrides `~/opt/go`. A leading `~` is expanded.
    /// * `listing_url`: Overrides `https://go.dev/dl/`.
    ///
    /// # Returns
    /// * `Ok(InstallerConfig)` for the host platform. The home directory is not
    ///   consulted here; see [`InstallerConfig::install_root`].
    /// * `Err(GetGoError::InvalidUrl)` if the listing URL does not parse.
    pub fn resolve(install_root: Option<&str>, listing_url: Option<&str>) -> Result<Self> {
        // `~` expansion falls back to the literal path when home is unknown.
        let install_root = install_root.map(|root| PathBuf::from(shellexpand::tilde(root).as_ref()));

        let listing = listing_url.unwrap_or(DEFAULT_LISTING_URL);
        let listing_url = Url::parse(listing).map_err(|source| GetGoError::InvalidUrl {
            input: listing.to_string(),
            source,
        })?;

        let platform = Platform::host();
        log_debug!(
            "[Config] root={} listing={} platform={}-{}",
            install_root
                .as_deref()
                .map_or("~/opt/go".to_string(), |root| root.display().to_string())
                .cyan(),
            listing_url.as_str().blue(),
            platform.os,
            platform.arch
        );

        Ok(InstallerConfig {
            listing_url,
            install_root,
            platform,
        })
    }

    /// The directory versions install into: the override if one was given,
    /// otherwise `<home>/opt/go`.
    ///
    /// # Returns
    /// * `Err(GetGoError::HomeDirectory)` if no override was given and the home directory is unknown.
    pub fn install_root(&self) -> Result<PathBuf> {
        match &self.install_root {
            Some(root) => Ok(root.clone()),
            None => default_install_root(),
        }
    }
}

/// `<home>/opt/go`
pub fn default_install_root() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(GetGoError::HomeDirectory)?;
    Ok(home.join("opt").join("go"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_overrides_are_used() {
        let config =
            InstallerConfig::resolve(Some("/srv/toolchains/go"), Some("http://mirror.test/dl/"))
                .unwrap();

        assert_eq!(config.install_root().unwrap(), PathBuf::from("/srv/toolchains/go"));
        assert_eq!(config.listing_url.as_str(), "http://mirror.test/dl/");
        assert_eq!(config.platform, Platform::host());
    }

    #[test]
    fn malformed_listing_url_is_rejected() {
        let err = InstallerConfig::resolve(Some("/tmp/go"), Some("not a url")).unwrap_err();
        assert!(matches!(err, GetGoError::InvalidUrl { .. }));
    }

    #[test]
    fn tilde_in_root_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            let config = InstallerConfig::resolve(Some("~/sdk/go"), None).unwrap();
            assert_eq!(config.install_root().unwrap(), home.join("sdk/go"));
            assert_eq!(config.listing_url.as_str(), DEFAULT_LISTING_URL);
        }
    }

    #[test]
    fn default_root_is_not_looked_up_while_resolving() {
        let config = InstallerConfig::resolve(None, None).unwrap();
        assert_eq!(config.install_root, None);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.install_root().unwrap(), home.join("opt").join("go"));
        }
    }
}
