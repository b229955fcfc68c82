use std::borrow::Cow;

use serde::Serialize;

use super::{PlatformCategory, UserAgentKind};

/// Outcome of classifying one User-Agent string.
///
/// Fields are private so the kind-dependent invariants hold for every value:
/// robots never carry a version, platform or device, and a device label only
/// appears next to an iOS or Android platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    user_agent: Cow<'a, str>,
    kind: UserAgentKind,
    name: Option<Cow<'a, str>>,
    version: Option<Cow<'a, str>>,
    platform: Option<Platform<'a>>,
    mobile_device: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform<'a> {
    pub name: Cow<'a, str>,
    pub category: PlatformCategory,
}

impl<'a> Classification<'a> {
    pub(crate) fn robot(user_agent: &'a str, name: &'a str) -> Self {
        Self {
            user_agent: Cow::Borrowed(user_agent),
            kind: UserAgentKind::Robot,
            name: Some(Cow::Borrowed(name)),
            version: None,
            platform: None,
            mobile_device: None,
        }
    }

    pub(crate) fn browser(
        user_agent: &'a str,
        name: &'a str,
        version: Option<&'a str>,
        platform: Option<Platform<'a>>,
        mobile_device: Option<&'a str>,
    ) -> Self {
        let mobile_device = match &platform {
            Some(p) if p.category.has_mobile_devices() => mobile_device.map(Cow::Borrowed),
            _ => None,
        };
        Self {
            user_agent: Cow::Borrowed(user_agent),
            kind: UserAgentKind::Browser,
            name: Some(Cow::Borrowed(name)),
            version: version.map(Cow::Borrowed),
            platform,
            mobile_device,
        }
    }

    pub(crate) fn unknown(user_agent: &'a str) -> Self {
        Self {
            user_agent: Cow::Borrowed(user_agent),
            kind: UserAgentKind::Unknown,
            name: None,
            version: None,
            platform: None,
            mobile_device: None,
        }
    }

    /// The input string, exactly as given.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub fn kind(&self) -> UserAgentKind {
        self.kind
    }
    /// Canonical browser or robot name; `None` only for unknown agents.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
    pub fn platform(&self) -> Option<&Platform<'a>> {
        self.platform.as_ref()
    }
    pub fn mobile_device(&self) -> Option<&str> {
        self.mobile_device.as_deref()
    }

    pub fn is_browser(&self) -> bool {
        self.kind == UserAgentKind::Browser
    }
    pub fn is_robot(&self) -> bool {
        self.kind == UserAgentKind::Robot
    }
    pub fn is_unknown(&self) -> bool {
        self.kind == UserAgentKind::Unknown
    }
    pub fn is_mobile(&self) -> bool {
        self.mobile_device.is_some()
    }

    /// Detach the result from the input string and the catalog it came from.
    pub fn into_owned(self) -> Classification<'static> {
        Classification {
            user_agent: Cow::Owned(self.user_agent.into_owned()),
            kind: self.kind,
            name: self.name.map(|n| Cow::Owned(n.into_owned())),
            version: self.version.map(|v| Cow::Owned(v.into_owned())),
            platform: self.platform.map(|p| Platform {
                name: Cow::Owned(p.name.into_owned()),
                category: p.category,
            }),
            mobile_device: self.mobile_device.map(|d| Cow::Owned(d.into_owned())),
        }
    }
}
