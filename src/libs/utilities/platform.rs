// Maps the host operating system and CPU architecture onto the names used in
// Go release filenames, and from there onto the archive suffix to look for.

use crate::libs::errors::{GetGoError, Result};
use crate::log_warn;
use crate::schemas::config::Platform;
use colored::Colorize;

/// Container format of a Go release archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    Zip,
}

impl ArchiveFormat {
    /// Windows releases ship as `.zip`, every other platform as `.tar.gz`.
    pub fn for_platform(platform: &Platform) -> Self {
        if platform.is_windows() {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    /// Picks the format from a release filename.
    pub fn from_filename(filename: &str) -> Result<Self> {
        if filename.ends_with(".tar.gz") {
            Ok(ArchiveFormat::TarGz)
        } else if filename.ends_with(".zip") {
            Ok(ArchiveFormat::Zip)
        } else {
            Err(GetGoError::UnknownFormat {
                filename: filename.to_string(),
            })
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }
}

/// Returns the filename ending that identifies the release archive for `platform`,
/// e.g. `linux-amd64.tar.gz` or `windows-amd64.zip`.
pub fn archive_suffix(platform: &Platform) -> String {
    format!(
        "{}-{}.{}",
        platform.os,
        platform.arch,
        ArchiveFormat::for_platform(platform).extension()
    )
}

/// Normalizes a Rust target OS name (`std::env::consts::OS`) into the name
/// Go uses in its release filenames.
///
/// # Arguments
/// * `os`: The Rust OS name (e.g. "macos", "linux", "windows").
///
/// # Returns
/// * `String`: The Go OS name (e.g. "darwin", "linux", "windows").
///             Unknown names are passed through unchanged.
pub fn normalize_os(os: &str) -> String {
    match os {
        "macos" => "darwin".to_string(),
        "linux" | "windows" | "freebsd" | "netbsd" | "openbsd" | "dragonfly" | "illumos"
        | "solaris" | "android" | "ios" | "aix" => os.to_string(),
        other => {
            log_warn!(
                "[Platform] Unknown OS variant '{}', using as-is. No release may match.",
                other.purple()
            );
            other.to_string()
        }
    }
}

/// Normalizes a Rust target architecture (`std::env::consts::ARCH`) into the
/// name Go uses in its release filenames.
///
/// 32-bit ARM maps to `armv6l`, the only ARM flavour published on the downloads page.
/// `powerpc64` maps to `ppc64le` or `ppc64` depending on the build's endianness.
pub fn normalize_arch(arch: &str) -> String {
    match arch {
        "x86_64" => "amd64".to_string(),
        "x86" => "386".to_string(),
        "aarch64" => "arm64".to_string(),
        "arm" => "armv6l".to_string(),
        "loongarch64" => "loong64".to_string(),
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le".to_string(),
        "powerpc64" => "ppc64".to_string(),
        "riscv64" | "s390x" | "mips" | "mipsle" | "mips64" | "mips64le" => arch.to_string(),
        other => {
            log_warn!(
                "[Platform] Unknown ARCH variant '{}', using as-is. No release may match.",
                other.purple()
            );
            other.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_suffix_only_for_windows() {
        let cases = [
            ("linux", "amd64", "linux-amd64.tar.gz"),
            ("linux", "arm64", "linux-arm64.tar.gz"),
            ("darwin", "arm64", "darwin-arm64.tar.gz"),
            ("freebsd", "386", "freebsd-386.tar.gz"),
            ("windows", "amd64", "windows-amd64.zip"),
            ("windows", "arm64", "windows-arm64.zip"),
        ];

        for (os, arch, expected) in cases {
            let platform = Platform::new(os, arch);
            assert_eq!(archive_suffix(&platform), expected);
        }
    }

    #[test]
    fn rust_names_map_to_go_names() {
        assert_eq!(normalize_os("macos"), "darwin");
        assert_eq!(normalize_os("linux"), "linux");
        assert_eq!(normalize_arch("x86_64"), "amd64");
        assert_eq!(normalize_arch("aarch64"), "arm64");
        assert_eq!(normalize_arch("x86"), "386");
        assert_eq!(normalize_arch("arm"), "armv6l");
    }

    #[test]
    fn format_is_taken_from_filename() {
        assert_eq!(
            ArchiveFormat::from_filename("go1.22.3.linux-amd64.tar.gz").unwrap(),
            ArchiveFormat::TarGz
        );
        assert_eq!(
            ArchiveFormat::from_filename("go1.22.3.windows-amd64.zip").unwrap(),
            ArchiveFormat::Zip
        );
        assert!(ArchiveFormat::from_filename("go1.22.3.windows-amd64.msi").is_err());
    }
}
