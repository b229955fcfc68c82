use super::helpers::contains_ignore_ascii_case;
use super::parser_data::PlatformData;

/// Device-family label for a UA on an iOS or Android platform.
///
/// A rule's ordered `devices` map is scanned first (the first token present
/// wins); otherwise its constant `device` label applies. Model identifiers in
/// the UA are never surfaced. Other platform categories have no device.
pub(crate) fn extract_device<'a>(ua: &str, platform: &'a PlatformData) -> Option<&'a str> {
    if !platform.category.has_mobile_devices() {
        return None;
    }
    platform
        .devices
        .as_ref()
        .and_then(|devices| {
            devices
                .iter()
                .find(|(token, _)| contains_ignore_ascii_case(ua, token))
                .map(|(_, label)| label.as_str())
        })
        .or(platform.device.as_deref())
}
