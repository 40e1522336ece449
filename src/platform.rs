use crate::error::{FetchError, Result};
use std::fmt;

/// Archive names published under the rclone download root, keyed by
/// `(os, arch)` as the host reports them.
static ARCHIVES: &[(&str, &str, &str)] = &[
    ("linux", "x86_64", "rclone-current-linux-amd64.zip"),
    ("linux", "i386", "rclone-current-linux-386.zip"),
    ("linux", "armv5", "rclone-current-linux-arm.zip"),
    ("linux", "armv6", "rclone-current-linux-arm-v6.zip"),
    ("linux", "armv7", "rclone-current-linux-arm-v7.zip"),
    ("linux", "aarch64", "rclone-current-linux-arm64.zip"),
    ("linux", "mips", "rclone-current-linux-mips.zip"),
    ("linux", "mipsle", "rclone-current-linux-mipsle.zip"),
    ("windows", "amd64", "rclone-current-windows-amd64.zip"),
    ("windows", "x86", "rclone-current-windows-386.zip"),
    ("windows", "arm64", "rclone-current-windows-arm64.zip"),
    ("darwin", "x86_64", "rclone-current-osx-amd64.zip"),
    ("darwin", "arm64", "rclone-current-osx-arm64.zip"),
    ("freebsd", "x86_64", "rclone-current-freebsd-amd64.zip"),
    ("freebsd", "i386", "rclone-current-freebsd-386.zip"),
    ("freebsd", "arm", "rclone-current-freebsd-arm.zip"),
    ("freebsd", "armv6", "rclone-current-freebsd-arm-v6.zip"),
    ("freebsd", "armv7", "rclone-current-freebsd-arm-v7.zip"),
    ("netbsd", "x86_64", "rclone-current-netbsd-amd64.zip"),
    ("netbsd", "i386", "rclone-current-netbsd-386.zip"),
    ("netbsd", "arm", "rclone-current-netbsd-arm.zip"),
    ("netbsd", "armv6", "rclone-current-netbsd-arm-v6.zip"),
    ("netbsd", "armv7", "rclone-current-netbsd-arm-v7.zip"),
    ("openbsd", "x86_64", "rclone-current-openbsd-amd64.zip"),
    ("openbsd", "i386", "rclone-current-openbsd-386.zip"),
    ("plan9", "amd64", "rclone-current-plan9-amd64.zip"),
    ("plan9", "x86", "rclone-current-plan9-386.zip"),
    ("solaris", "amd64", "rclone-current-solaris-amd64.zip"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl AsRef<str>, arch: impl AsRef<str>) -> Self {
        Self {
            os: os.as_ref().to_lowercase(),
            arch: arch.as_ref().to_lowercase(),
        }
    }

    /// The host platform, named the way the archive table expects.
    pub fn detect() -> Self {
        let os = get_os_name();
        let arch = get_cpu_arch(&os);
        Self::new(os, arch)
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Executable name inside the archive and on disk.
    pub fn binary_name(&self) -> &'static str {
        if self.is_windows() {
            "rclone.exe"
        } else {
            "rclone"
        }
    }

    pub fn archive_name(&self) -> Result<&'static str> {
        ARCHIVES
            .iter()
            .find(|(os, arch, _)| *os == self.os && *arch == self.arch)
            .map(|(_, _, archive)| *archive)
            .ok_or_else(|| FetchError::unsupported_platform(self.os.as_str(), self.arch.as_str()))
    }

    pub fn download_url(&self, base_url: &str) -> Result<String> {
        let archive = self.archive_name()?;
        if base_url.ends_with('/') {
            Ok(format!("{base_url}{archive}"))
        } else {
            Ok(format!("{base_url}/{archive}"))
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Every `(os, arch, archive)` row the download root publishes.
pub fn supported_platforms() -> impl Iterator<Item = (&'static str, &'static str, &'static str)> {
    ARCHIVES.iter().copied()
}

pub fn get_os_name() -> String {
    match std::env::consts::OS {
        "macos" => "darwin".to_string(),
        other => other.to_string(),
    }
}

pub fn get_cpu_arch(os: &str) -> String {
    machine_name(os, std::env::consts::ARCH).to_string()
}

fn machine_name<'a>(os: &str, arch: &'a str) -> &'a str {
    match (os, arch) {
        ("windows", "x86_64") => "amd64",
        ("windows", "aarch64") | ("darwin", "aarch64") => "arm64",
        ("windows", "x86") => "x86",
        (_, "x86") => "i386",
        (_, "arm") => "armv7",
        (_, other) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_name_known_pairs() {
        let cases = [
            ("linux", "x86_64", "rclone-current-linux-amd64.zip"),
            ("linux", "armv5", "rclone-current-linux-arm.zip"),
            ("linux", "aarch64", "rclone-current-linux-arm64.zip"),
            ("linux", "mipsle", "rclone-current-linux-mipsle.zip"),
            ("windows", "amd64", "rclone-current-windows-amd64.zip"),
            ("windows", "x86", "rclone-current-windows-386.zip"),
            ("darwin", "arm64", "rclone-current-osx-arm64.zip"),
            ("darwin", "x86_64", "rclone-current-osx-amd64.zip"),
            ("freebsd", "armv7", "rclone-current-freebsd-arm-v7.zip"),
            ("netbsd", "arm", "rclone-current-netbsd-arm.zip"),
            ("openbsd", "i386", "rclone-current-openbsd-386.zip"),
            ("plan9", "x86", "rclone-current-plan9-386.zip"),
            ("solaris", "amd64", "rclone-current-solaris-amd64.zip"),
        ];

        for (os, arch, expected) in cases {
            assert_eq!(Platform::new(os, arch).archive_name().unwrap(), expected);
        }
    }

    #[test]
    fn test_every_table_row_resolves() {
        for (os, arch, archive) in supported_platforms() {
            assert_eq!(Platform::new(os, arch).archive_name().unwrap(), archive);
        }
        assert_eq!(supported_platforms().count(), 28);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let platform = Platform::new("Linux", "X86_64");
        assert_eq!(
            platform.archive_name().unwrap(),
            "rclone-current-linux-amd64.zip"
        );
    }

    #[test]
    fn test_unknown_pair_is_rejected() {
        let err = Platform::new("darwin", "i386").archive_name().unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedPlatform { .. }));
        assert_eq!(err.to_string(), "No binary available for darwin on i386");

        assert!(Platform::new("haiku", "x86_64").archive_name().is_err());
    }

    #[test]
    fn test_download_url_joins_base() {
        let platform = Platform::new("linux", "x86_64");
        assert_eq!(
            platform.download_url("https://downloads.rclone.org/").unwrap(),
            "https://downloads.rclone.org/rclone-current-linux-amd64.zip"
        );
        assert_eq!(
            platform.download_url("http://127.0.0.1:8080").unwrap(),
            "http://127.0.0.1:8080/rclone-current-linux-amd64.zip"
        );
    }

    #[test]
    fn test_binary_name() {
        assert_eq!(Platform::new("windows", "amd64").binary_name(), "rclone.exe");
        assert_eq!(Platform::new("linux", "x86_64").binary_name(), "rclone");
        assert_eq!(Platform::new("darwin", "arm64").binary_name(), "rclone");
    }

    #[test]
    fn test_machine_name() {
        assert_eq!(machine_name("windows", "x86_64"), "amd64");
        assert_eq!(machine_name("windows", "aarch64"), "arm64");
        assert_eq!(machine_name("windows", "x86"), "x86");
        assert_eq!(machine_name("darwin", "aarch64"), "arm64");
        assert_eq!(machine_name("darwin", "x86_64"), "x86_64");
        assert_eq!(machine_name("linux", "aarch64"), "aarch64");
        assert_eq!(machine_name("linux", "x86"), "i386");
        assert_eq!(machine_name("freebsd", "arm"), "armv7");
        assert_eq!(machine_name("linux", "mips"), "mips");
    }

    #[test]
    fn test_detect_uses_table_names() {
        let platform = Platform::detect();
        assert_ne!(platform.os, "macos");
        assert_eq!(platform.os, platform.os.to_lowercase());
    }
}
