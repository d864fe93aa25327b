use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to open database at {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Item {0} not found in Items table")]
    ItemNotFound(i64),

    #[error("No auction data for {item} in the last {window_days} days")]
    NoData { item: String, window_days: i64 },

    #[error("Invalid bucket timestamp '{value}': {source}")]
    BucketParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
