use database::mongodb::MongoError;
use mongodb::error::ErrorKind;
use thiserror::Error;
use tonic::Status;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Item payload is missing")]
    MissingPayload,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl ItemError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ItemError::NotFound(_))
    }

    /// Status for this error with Internal messages prefixed by `context`,
    /// e.g. `"Failed to add item"`.
    pub fn into_status(self, context: &str) -> Status {
        match self {
            ItemError::NotFound(_) => Status::not_found("Item not found"),
            other => Status::internal(format!("{}: {}", context, other)),
        }
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::BsonDeserialization(_) => ItemError::Decode(err.to_string()),
            _ => ItemError::Database(err.to_string()),
        }
    }
}

impl From<MongoError> for ItemError {
    fn from(err: MongoError) -> Self {
        ItemError::Connection(err.to_string())
    }
}
