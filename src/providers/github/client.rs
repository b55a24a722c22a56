mod core;
mod pull_requests;
mod workflow_runs;

pub use self::core::GitHubClient;
