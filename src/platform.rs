//! Operating systems the sweeper knows how to handle.

use std::fmt;

/// The closed set of platforms a browser path table is keyed by.
///
/// Everything that is neither macOS nor Windows shares [`Platform::Other`],
/// for which no browser has a known favicon location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOs,
    Windows,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name onto a platform.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Other => write!(f, "other"),
        }
    }
}
