pub mod attendance;
pub mod employee;

use derive_more::Display;

#[derive(Debug, Display)]
pub enum RepoError {
    #[display(fmt = "record not found")]
    NotFound,

    /// A unique index rejected the write.
    #[display(fmt = "unique constraint violated")]
    Conflict,

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for RepoError {}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => RepoError::Conflict,
            _ => RepoError::Database(err),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
