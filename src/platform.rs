use std::borrow::Cow;

use super::parser::MatchResult;
use super::parser_data::PlatformData;
use super::types::Platform;

/// Turn a platform rule match into the reported `{name, category}`.
///
/// Rules with a `versions` table look up capture group 1 (e.g. the NT
/// number in `Windows NT 6.1`). A missing or unlisted capture falls back to
/// the rule's own name, so `Windows NT 11.0` reports the generic `Windows`.
pub(crate) fn resolve<'a>(m: &MatchResult<'a, PlatformData>) -> Platform<'a> {
    let data = m.data;
    let name = data
        .versions
        .as_ref()
        .zip(m.captures.get_str(1))
        .and_then(|(versions, key)| versions.get(key))
        .unwrap_or(&data.name);

    Platform {
        name: Cow::Borrowed(name.as_str()),
        category: data.category,
    }
}
