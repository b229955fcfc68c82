mod catalog;
mod classifier;
mod db;
mod device;
mod error;
mod helpers;
mod literal;
mod parser;
mod parser_data;
mod platform;
mod types;
mod version;

pub use catalog::CatalogSource;
pub use classifier::Classifier;
pub use error::{Error, Result};
pub use types::*;

/// Classify `user_agent` with the built-in rule catalog.
///
/// Never fails: strings no rule recognizes come back as
/// [`UserAgentKind::Unknown`].
pub fn classify(user_agent: &str) -> Classification<'_> {
    Classifier::builtin().classify(user_agent)
}
