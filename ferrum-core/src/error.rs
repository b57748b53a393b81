use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the store and reporting layers.
///
/// `NotFound` deliberately carries only the entity kind: a row that does
/// not exist and a row owned by another user are indistinguishable to the
/// caller.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }
}

/// Classify a driver error raised by an INSERT.
///
/// A foreign-key violation means the payload referenced a row that does
/// not exist, which is a caller mistake, not a storage fault. `fk_field`
/// names the referencing field for the message.
pub(crate) fn insert_error(e: sqlx::Error, fk_field: &str) -> Error {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return Error::Conflict(db.message().to_string());
        }
        if db.is_foreign_key_violation() {
            return Error::Validation(format!("{fk_field} does not reference an existing row"));
        }
    }
    Error::Storage(e)
}
