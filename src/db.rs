use indexmap::IndexMap;
use serde::Deserialize;

use super::types::PlatformCategory;

// ---------------------------------------------------------------------------
// Robots  (regexes/robots.yml)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RobotEntry {
    pub regex: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Browsers  (regexes/browsers.yml)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BrowserEntry {
    pub regex: String,
    pub name: String,
    /// Marker pattern the version token follows (e.g. `Version/` for Safari).
    /// When absent the version token follows the rule's own match.
    #[serde(default)]
    pub version: Option<String>,
}

// ---------------------------------------------------------------------------
// Platforms  (regexes/platforms.yml)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlatformEntry {
    pub regex: String,
    pub name: String,
    pub category: PlatformCategory,
    /// Capture group 1 → marketing name (e.g. NT `6.1` → `Windows 7`).
    /// Uncaptured or unknown keys fall back to `name`.
    #[serde(default)]
    pub versions: Option<IndexMap<String, String>>,
    /// Constant device label for every UA on this platform.
    #[serde(default)]
    pub device: Option<String>,
    /// Ordered device token → label map; first token present wins.
    #[serde(default)]
    pub devices: Option<IndexMap<String, String>>,
}
