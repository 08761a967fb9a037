// Values that flow between the listing scan and the installer.

use std::path::PathBuf;
use url::Url;

/// A download link picked from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The `href` resolved against the listing URL.
    pub url: Url,
    /// Last path segment of the link, e.g. `go1.22.3.linux-amd64.tar.gz`.
    pub filename: String,
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The archive was downloaded, extracted and made current.
    Installed { version: String, path: PathBuf },
    /// The version directory already existed; nothing was downloaded.
    AlreadyInstalled { version: String, path: PathBuf },
    /// No download link on the listing ends with the platform suffix.
    NoMatchingRelease { suffix: String },
}
