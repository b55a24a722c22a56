mod cache;
mod client;
mod core;

pub use self::core::{GitHubProvider, DEFAULT_API_URL};
