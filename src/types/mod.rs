mod classification;
mod platform_category;
mod user_agent_kind;

pub use classification::*;
pub use platform_category::*;
pub use user_agent_kind::*;
