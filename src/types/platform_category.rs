use serde::{Deserialize, Serialize};

/// Coarse operating-system class, independent of the marketing version name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformCategory {
    Windows,
    MacOs,
    Linux,
    Unix,
    Ios,
    Android,
    ChromeOs,
    BlackBerry,
    Symbian,
    Generic,
}

impl PlatformCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Unix => "unix",
            Self::Ios => "ios",
            Self::Android => "android",
            Self::ChromeOs => "chromeos",
            Self::BlackBerry => "blackberry",
            Self::Symbian => "symbian",
            Self::Generic => "generic",
        }
    }

    /// Only these platforms carry a mobile device family.
    pub fn has_mobile_devices(&self) -> bool {
        matches!(self, Self::Ios | Self::Android)
    }
}
