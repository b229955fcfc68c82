use std::path::Path;

use serde::de::DeserializeOwned;

use super::db;
use super::error::{Error, Result};

const BUILTIN_ROBOTS: &str = include_str!("../regexes/robots.yml");
const BUILTIN_BROWSERS: &str = include_str!("../regexes/browsers.yml");
const BUILTIN_PLATFORMS: &str = include_str!("../regexes/platforms.yml");

/// The three ordered rule tables, as read from YAML and not yet compiled.
///
/// Order inside each table is precedence: the first rule that matches wins.
#[derive(Debug, Clone, Default)]
pub struct CatalogSource {
    pub(crate) robots: Vec<db::RobotEntry>,
    pub(crate) browsers: Vec<db::BrowserEntry>,
    pub(crate) platforms: Vec<db::PlatformEntry>,
}

impl CatalogSource {
    /// The rule tables embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_strs(BUILTIN_ROBOTS, BUILTIN_BROWSERS, BUILTIN_PLATFORMS)
    }

    /// Parse the three tables from YAML documents.
    pub fn from_yaml_strs(robots: &str, browsers: &str, platforms: &str) -> Result<Self> {
        Ok(Self {
            robots: parse_table(robots)?,
            browsers: parse_table(browsers)?,
            platforms: parse_table(platforms)?,
        })
    }

    /// Load `robots.yml`, `browsers.yml` and `platforms.yml` from `dir`.
    /// A missing file yields an empty table.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            robots: load_table(&dir.join("robots.yml"))?,
            browsers: load_table(&dir.join("browsers.yml"))?,
            platforms: load_table(&dir.join("platforms.yml"))?,
        })
    }

    /// Put `overrides`' rules ahead of this source's rules in every table, so
    /// they take precedence.
    pub fn with_overrides(self, overrides: CatalogSource) -> Self {
        fn front<T>(mut first: Vec<T>, rest: Vec<T>) -> Vec<T> {
            first.extend(rest);
            first
        }
        Self {
            robots: front(overrides.robots, self.robots),
            browsers: front(overrides.browsers, self.browsers),
            platforms: front(overrides.platforms, self.platforms),
        }
    }

    pub fn robot_rules(&self) -> usize {
        self.robots.len()
    }
    pub fn browser_rules(&self) -> usize {
        self.browsers.len()
    }
    pub fn platform_rules(&self) -> usize {
        self.platforms.len()
    }

    /// Reject rules that would break the result invariants: empty names, and
    /// device labels on platforms that are not iOS or Android.
    pub(crate) fn validate(&self) -> Result<()> {
        for (index, r) in self.robots.iter().enumerate() {
            if r.name.trim().is_empty() {
                return Err(invalid("robot", index, "empty name"));
            }
        }
        for (index, b) in self.browsers.iter().enumerate() {
            if b.name.trim().is_empty() {
                return Err(invalid("browser", index, "empty name"));
            }
        }
        for (index, p) in self.platforms.iter().enumerate() {
            if p.name.trim().is_empty() {
                return Err(invalid("platform", index, "empty name"));
            }
            let has_devices = p.device.is_some() || p.devices.is_some();
            if has_devices && !p.category.has_mobile_devices() {
                return Err(invalid(
                    "platform",
                    index,
                    format!("device labels on {} platform", p.category.as_str()),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(table: &'static str, index: usize, reason: impl Into<String>) -> Error {
    Error::InvalidRule {
        table,
        index,
        reason: reason.into(),
    }
}

/// An empty document deserializes to an empty table.
fn parse_table<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let table: Option<Vec<T>> = serde_yaml::from_str(content)?;
    Ok(table.unwrap_or_default())
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_table(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
