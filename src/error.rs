use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid landmarks: expected {expected} points, got {actual}")]
    InvalidLandmarks { expected: usize, actual: usize },

    #[error("Degenerate mouth geometry: horizontal gap is zero")]
    DegenerateGeometry,

    #[error("Frame source exhausted")]
    SourceExhausted,

    #[error("Replay error on line {line}: {message}")]
    Replay { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
        }
    }
}
