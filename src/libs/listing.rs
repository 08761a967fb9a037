// Finds the release archive for a platform on the downloads page.

// Our error type and result alias.
use crate::libs::errors::{GetGoError, Result};
// The HTTP seam: production uses ureq, tests serve canned pages.
use crate::libs::utilities::assets::{Transport, read_page};
// Debug-level logging for skipped links.
use crate::log_debug;
// The (url, filename) pair handed to the installer.
use crate::schemas::release::Candidate;
// Colors for the debug output.
use colored::Colorize;
// 'scraper' parses the HTML and runs CSS selectors over it.
use scraper::{Html, Selector};
// Relative hrefs are resolved against the listing URL.
use url::Url;

/// Anchors the downloads page marks as archive links.
const DOWNLOAD_LINKS: &str = "a.download";

/// Fetches the listing page and returns its HTML.
pub fn fetch_listing(transport: &dyn Transport, listing_url: &Url) -> Result<String> {
    let body = transport.get(listing_url)?; // Non-200 is already an error here.
    let page = read_page(listing_url, body)?;
    log_debug!("[Listing] Fetched {} bytes from {}", page.len(), listing_url.as_str().blue());
    Ok(page)
}

/// Scans download anchors in document order and returns the first whose
/// filename ends with `suffix`.
///
/// Each `href` is resolved against `base`; the filename is the last path segment
/// of the resolved URL. Anchors without an `href` are skipped. An `href` that does
/// not parse as a URL is an error even when an earlier anchor could have matched
/// later, mirroring the in-order scan.
///
/// # Returns
/// * `Ok(Some(candidate))` for the first match.
/// * `Ok(None)` if no anchor matches.
pub fn find_candidate(page: &str, base: &Url, suffix: &str) -> Result<Option<Candidate>> {
    let document = Html::parse_document(page);
    let selector =
        Selector::parse(DOWNLOAD_LINKS).map_err(|e| GetGoError::Selector(format!("{e:?}")))?;

    // `select` yields anchors in document order, which is newest release first.
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let url = base.join(href).map_err(|source| GetGoError::InvalidUrl {
            input: href.to_string(),
            source,
        })?;
        // Same as `path.Base` of the link: the last segment, still percent-encoded.
        let filename = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        if !filename.ends_with(suffix) {
            log_debug!("[Listing] Skipping {}", filename.dimmed());
            continue;
        }

        // First match wins; later anchors are never looked at.
        return Ok(Some(Candidate { url, filename }));
    }

    Ok(None)
}
