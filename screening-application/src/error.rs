use screening_domain::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("failed to load transactions: {0}")]
    Load(#[from] LoadError),
}
