use std::path::Path;
use std::sync::OnceLock;

use super::catalog::CatalogSource;
use super::db;
use super::device::extract_device;
use super::error::{Error, Result};
use super::parser::{CompiledParser, Matcher};
use super::parser_data::*;
use super::platform;
use super::types::*;
use super::version;

/// Compiled rule catalog plus the classification pipeline.
///
/// Immutable once built; share one instance (or [`Classifier::builtin`])
/// between threads.
pub struct Classifier {
    robot_parser: CompiledParser<RobotData>,
    browser_parser: CompiledParser<BrowserData>,
    platform_parser: CompiledParser<PlatformData>,
}

impl Classifier {
    /// The classifier for the rule tables embedded in the crate, compiled on
    /// first use and shared for the rest of the process.
    pub fn builtin() -> &'static Classifier {
        static BUILTIN: OnceLock<Classifier> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            CatalogSource::builtin()
                .and_then(Self::from_source)
                .expect("embedded rule catalog must compile")
        })
    }

    /// Validate and compile `source`. The three tables compile concurrently.
    pub fn from_source(source: CatalogSource) -> Result<Self> {
        source.validate()?;
        let CatalogSource {
            robots,
            browsers,
            platforms,
        } = source;

        let (robot_parser, (browser_parser, platform_parser)) = rayon::join(
            || {
                CompiledParser::build(
                    "robot",
                    robots
                        .into_iter()
                        .map(|r| (r.regex, RobotData { name: r.name })),
                )
            },
            || {
                rayon::join(
                    || build_browser_parser(browsers),
                    || {
                        CompiledParser::build(
                            "platform",
                            platforms.into_iter().map(|p| {
                                (
                                    p.regex,
                                    PlatformData {
                                        name: p.name,
                                        category: p.category,
                                        versions: p.versions,
                                        device: p.device,
                                        devices: p.devices,
                                    },
                                )
                            }),
                        )
                    },
                )
            },
        );

        let classifier = Self {
            robot_parser: robot_parser?,
            browser_parser: browser_parser?,
            platform_parser: platform_parser?,
        };
        tracing::debug!(
            robots = classifier.robot_parser.len(),
            browsers = classifier.browser_parser.len(),
            platforms = classifier.platform_parser.len(),
            "classifier ready"
        );
        Ok(classifier)
    }

    /// Built-in rules with the rule files found in `dir` (`robots.yml`,
    /// `browsers.yml`, `platforms.yml`, each optional) placed ahead of them.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let overrides = CatalogSource::from_dir(dir)?;
        Self::from_source(CatalogSource::builtin()?.with_overrides(overrides))
    }

    /// Classify a User-Agent string.
    ///
    /// Robots are checked first: bot UAs routinely embed a complete browser
    /// string. Only browsers get a version, platform and device.
    pub fn classify<'a>(&'a self, ua: &'a str) -> Classification<'a> {
        if let Some(name) = self.match_robot(ua) {
            tracing::trace!(user_agent = ua, name, "robot");
            return Classification::robot(ua, name);
        }

        let Some((name, version)) = self.match_browser(ua) else {
            tracing::trace!(user_agent = ua, "unknown user agent");
            return Classification::unknown(ua);
        };

        let platform_match = self.platform_parser.match_first(ua);
        let platform = platform_match.as_ref().map(platform::resolve);
        let mobile_device = platform_match
            .as_ref()
            .and_then(|m| extract_device(ua, m.data));

        tracing::trace!(
            user_agent = ua,
            name,
            version,
            platform = platform.as_ref().map(|p| p.name.as_ref()),
            mobile_device,
            "browser"
        );
        Classification::browser(ua, name, version, platform, mobile_device)
    }

    /// Classify an optional header value. An absent value is an error,
    /// distinct from a value no rule recognizes.
    pub fn parse_header<'a>(&'a self, value: Option<&'a str>) -> Result<Classification<'a>> {
        value
            .map(|ua| self.classify(ua))
            .ok_or(Error::MissingUserAgent)
    }

    /// Canonical name of the first robot rule matching `ua`.
    pub fn match_robot<'a>(&'a self, ua: &'a str) -> Option<&'a str> {
        self.robot_parser
            .match_first(ua)
            .map(|m| m.data.name.as_str())
    }

    /// Canonical name and raw version token of the first browser rule
    /// matching `ua`.
    pub fn match_browser<'a>(&'a self, ua: &'a str) -> Option<(&'a str, Option<&'a str>)> {
        let m = self.browser_parser.match_first(ua)?;
        let start = match &m.data.version_marker {
            Some(marker) => marker.find_end(ua),
            None => m.captures.end(0),
        };
        let version = start.and_then(|start| version::token_at(ua, start));
        Some((m.data.name.as_str(), version))
    }

    /// Platform of the first platform rule matching `ua`.
    pub fn match_platform<'a>(&'a self, ua: &'a str) -> Option<Platform<'a>> {
        self.platform_parser
            .match_first(ua)
            .map(|m| platform::resolve(&m))
    }
}

fn build_browser_parser(entries: Vec<db::BrowserEntry>) -> Result<CompiledParser<BrowserData>> {
    let items = entries
        .into_iter()
        .map(|e| -> Result<_> {
            let version_marker = e.version.as_deref().map(Matcher::compile).transpose()?;
            Ok((
                e.regex,
                BrowserData {
                    name: e.name,
                    version_marker,
                },
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    CompiledParser::build("browser", items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(robots: &str, browsers: &str, platforms: &str) -> Classifier {
        let source = CatalogSource::from_yaml_strs(robots, browsers, platforms).unwrap();
        Classifier::from_source(source).unwrap()
    }

    #[test]
    fn robot_beats_browser_tokens() {
        let c = custom(
            "- { regex: 'Googlebot', name: Googlebot }",
            "- { regex: 'Chrome/', name: Chrome }",
            "- { regex: 'Android', name: Android, category: android, device: Android }",
        );
        let ua = "Mozilla/5.0 (Linux; Android 6.0.1) Chrome/1.2.3 (compatible; Googlebot/2.1)";
        let r = c.classify(ua);
        assert!(r.is_robot());
        assert_eq!(r.name(), Some("Googlebot"));
        assert_eq!(r.version(), None);
        assert!(r.platform().is_none());
        assert!(r.mobile_device().is_none());
    }

    #[test]
    fn version_marker_moves_the_token() {
        let c = custom(
            "",
            "- { regex: 'Safari/', name: Safari, version: 'Version/' }",
            "",
        );
        let ua = "AppleWebKit/603.1.30 (KHTML, like Gecko) Version/11.0 Safari/605.1.15";
        assert_eq!(c.match_browser(ua), Some(("Safari", Some("11.0"))));
        // Without a Version/ token there is no version at all.
        assert_eq!(
            c.match_browser("AppleWebKit/603.1.30 Safari/605.1.15"),
            Some(("Safari", None))
        );
    }

    #[test]
    fn browser_without_platform() {
        let c = custom("", "- { regex: 'Lynx/', name: Lynx }", "");
        let r = c.classify("Lynx/2.8.9rel.1 libwww-FM/2.14");
        assert!(r.is_browser());
        assert_eq!(r.version(), Some("2.8.9rel.1"));
        assert!(r.platform().is_none());
        assert!(!r.is_mobile());
    }

    #[test]
    fn nothing_matches_is_unknown() {
        let c = custom("", "", "");
        let r = c.classify("curl/8.0.1");
        assert!(r.is_unknown());
        assert_eq!(r.name(), None);
        assert_eq!(r.user_agent(), "curl/8.0.1");
    }

    #[test]
    fn missing_header_is_an_error() {
        let c = custom("", "", "");
        assert!(matches!(c.parse_header(None), Err(Error::MissingUserAgent)));
        assert!(c.parse_header(Some("")).unwrap().is_unknown());
    }

    #[test]
    fn invalid_rule_fails_the_build() {
        let source =
            CatalogSource::from_yaml_strs("- { regex: '(unclosed', name: Broken }", "", "").unwrap();
        assert!(matches!(
            Classifier::from_source(source),
            Err(Error::FancyRegex(_))
        ));
    }

    #[test]
    fn from_dir_rules_take_precedence() {
        let dir = std::env::temp_dir().join(format!(
            "http-user-agent-parser-overrides-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("browsers.yml"),
            "- { regex: 'Chrome/.*Brand/', name: Brand Browser }\n",
        )
        .unwrap();

        let c = Classifier::from_dir(&dir).unwrap();
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0.0.0 Safari/537.36 Brand/3";
        let r = c.classify(ua);
        assert_eq!(r.name(), Some("Brand Browser"));
        assert_eq!(r.version(), Some("3"));
        assert_eq!(r.platform().map(|p| p.name.as_ref()), Some("Linux"));

        // Built-in rules still apply to everything else.
        let r = c.classify("Mozilla/5.0 (compatible; Googlebot/2.1)");
        assert_eq!(r.name(), Some("Googlebot"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
