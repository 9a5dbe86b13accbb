use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrvError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular system: zero pivot at row {row}")]
    SingularSystem { row: usize },

    #[error("Invalid tolerance: {0} (expected a finite value > 0)")]
    InvalidTolerance(f64),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, CrvError>;
