use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrossForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Word list is empty")]
    EmptyWordList,

    #[error("Invalid word '{0}': words need at least 2 letters and only alphabetic characters")]
    InvalidWord(String),

    #[error("Word '{0}' appears more than once in the input")]
    DuplicateWord(String),

    #[error("Search worker stopped unexpectedly")]
    WorkerPanicked,
}

pub type CfResult<T> = Result<T, CrossForgeError>;
