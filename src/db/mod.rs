pub mod lookup;
pub mod models;
pub mod query;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use tracing::info;

use crate::error::{AppError, Result};

/// Opens the auction database read-only. A missing file is an error, never created.
pub async fn open(db_path: &str) -> Result<SqliteConnection> {
    let connection_error = |source| AppError::Connection {
        path: db_path.to_string(),
        source,
    };

    let conn = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
        .map_err(connection_error)?
        .read_only(true)
        .create_if_missing(false)
        .connect()
        .await
        .map_err(connection_error)?;

    info!(db_path, "Opened auction database");
    Ok(conn)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let err = open(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, AppError::Connection { .. }));
    }
}
