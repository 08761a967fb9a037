// Lower-level helpers: HTTP, archives, filesystem and platform detection.

// HTTP transport and response reading.
pub mod assets;
// Streaming tar.gz / zip extraction.
pub mod compression;
// Existence checks and the current-version symlink.
pub mod file_operations;
// Host platform names and archive suffixes.
pub mod platform;
