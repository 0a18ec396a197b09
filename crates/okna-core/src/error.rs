use thiserror::Error;

#[derive(Debug, Error)]
pub enum OknaError {
    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("unknown {field}: {value:?}")]
    UnknownOption { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
