use thiserror::Error;

/// Result type for conformance operations
pub type Result<T> = std::result::Result<T, ConformanceError>;

/// Errors raised while loading cases or configuration
#[derive(Error, Debug)]
pub enum ConformanceError {
    /// A case line could not be parsed
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Invalid runner configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text is neither JSON nor TOML
    #[error("Config is not valid JSON or TOML ({json}); TOML parse error: {toml}")]
    ConfigFormat { json: String, toml: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConformanceError {
    /// Create a parse error
    pub fn parse(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            column,
            message: msg.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
