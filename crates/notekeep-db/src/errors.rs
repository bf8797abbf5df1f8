use thiserror::Error;

/// Failures of the user and note repositories that callers need to tell apart.
///
/// Everything else (connectivity, constraint violations we don't classify)
/// ends up in `Other` with the failing operation attached as context.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("username is already taken")]
    UsernameTaken,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
