#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid delta JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid page setup: {0}")]
    InvalidPageSetup(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
