use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WebviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("webview engine error: {0}")]
    Engine(String),

    #[error("no native window is available")]
    MissingWindow,

    #[error("invalid window size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid binding name: {0:?}")]
    InvalidBindingName(String),

    #[error("binding already exists: {0}")]
    AlreadyBound(String),

    #[error("no such binding: {0}")]
    NotBound(String),

    #[error("no pending call with sequence {0}")]
    UnknownSequence(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}
