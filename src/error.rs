use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset has no header line")]
    EmptyHeader,
    /// The `/N` bucketing rule was applied to a value that is not an integer.
    #[error("cannot pretreat value {value:?} with option {option:?}")]
    Pretreat { value: String, option: String },
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, Error>;
