use crate::application::repos::RepoError;

pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepoError::unavailable(err),
        sqlx::Error::Io(io) => RepoError::unavailable(io),
        other => RepoError::from_persistence(other),
    }
}
