use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoraLensError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("GitHub token not found. Set GITHUB_TOKEN or add it to .env")]
    MissingToken,

    #[error("No data found. Check repository permissions.")]
    NoData,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DoraLensError>;
