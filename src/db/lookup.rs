use sqlx::SqliteConnection;
use tracing::{debug, warn};

use crate::db::models::{ConnectedRealmRow, FactionRow, ItemRow};
use crate::error::{AppError, Result};
use crate::types::Faction;

/// Resolves an item's display name. Zero matches is `ItemNotFound`; a row
/// whose name is NULL or blank is `InvalidData`.
pub async fn item_name(conn: &mut SqliteConnection, item_id: i64) -> Result<String> {
    let row = sqlx::query_as::<_, ItemRow>("SELECT item_id, name FROM Items WHERE item_id = ?")
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(ItemRow {
            item_id,
            name: Some(name),
        }) if !name.trim().is_empty() => {
            debug!(item_id, name = %name, "Resolved item");
            Ok(name)
        }
        Some(_) => Err(AppError::InvalidData(format!("item {item_id} has no name"))),
        None => Err(AppError::ItemNotFound(item_id)),
    }
}

/// Best-effort realm name. Falls back to `realm {id}` when the realm table is
/// absent or has no usable row, since only `Items` and `Auctions` are required.
pub async fn realm_name(conn: &mut SqliteConnection, realm_id: i64) -> String {
    let fallback = format!("realm {realm_id}");

    let row = sqlx::query_as::<_, ConnectedRealmRow>(
        "SELECT connected_realm_id, name FROM ConnectedRealms WHERE connected_realm_id = ?",
    )
    .bind(realm_id)
    .fetch_optional(&mut *conn)
    .await;

    match row {
        Ok(Some(ConnectedRealmRow {
            connected_realm_id,
            name: Some(name),
        })) if !name.is_empty() => {
            debug!(connected_realm_id, name = %name, "Resolved realm");
            name
        }
        Ok(_) => fallback,
        Err(e) => {
            warn!(realm_id, "Realm lookup unavailable, using id: {e}");
            fallback
        }
    }
}

/// Best-effort faction name from the `Factions` table, falling back to the
/// built-in names for ids 0..=2.
pub async fn faction_name(conn: &mut SqliteConnection, faction_id: i64) -> String {
    let row = sqlx::query_as::<_, FactionRow>(
        "SELECT faction_id, faction_name FROM Factions WHERE faction_id = ?",
    )
    .bind(faction_id)
    .fetch_optional(&mut *conn)
    .await;

    match row {
        Ok(Some(FactionRow {
            faction_id,
            faction_name: Some(name),
        })) if !name.is_empty() => {
            debug!(faction_id, name = %name, "Resolved faction");
            name
        }
        Ok(_) => Faction::from_id(faction_id).to_string(),
        Err(e) => {
            warn!(faction_id, "Faction lookup unavailable, using built-in name: {e}");
            Faction::from_id(faction_id).to_string()
        }
    }
}
