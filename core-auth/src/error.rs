use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Not authenticated")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, AuthError>;
