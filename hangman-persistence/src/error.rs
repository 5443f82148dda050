use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("A user named {name} already exists")]
    DuplicateUser { name: String },
    #[error("Game {game_id} was modified by another request")]
    StaleGame { game_id: Uuid },
    #[error("Stored record is invalid: {0}")]
    InvalidRecord(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
