#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    FancyRegex(#[from] fancy_regex::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    #[error("invalid {table} rule #{index}: {reason}")]
    InvalidRule {
        table: &'static str,
        index: usize,
        reason: String,
    },
    #[error("no User-Agent value supplied")]
    MissingUserAgent,
}

pub type Result<T> = std::result::Result<T, Error>;
