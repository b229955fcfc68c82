use indexmap::IndexMap;

use super::parser::Matcher;
use super::types::PlatformCategory;

// ---------------------------------------------------------------------------
// Internal data structs carried inside CompiledParser<T>
// ---------------------------------------------------------------------------

pub(crate) struct RobotData {
    pub name: String,
}

pub(crate) struct BrowserData {
    pub name: String,
    /// Where the version token starts when it is not right after the rule's
    /// own match (Safari reads `Version/`, not `Safari/`).
    pub version_marker: Option<Matcher>,
}

pub(crate) struct PlatformData {
    pub name: String,
    pub category: PlatformCategory,
    pub versions: Option<IndexMap<String, String>>,
    pub device: Option<String>,
    pub devices: Option<IndexMap<String, String>>,
}
