/// Database row types for the blackwater auction schema.
/// Used by sqlx for typed queries.

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct HourlyAggregateRow {
    /// Bucket start as `%Y-%m-%d %H:%M:%S` (UTC).
    pub date_hour: String,
    pub min_buyout: i64,
    pub total_quantity: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ItemRow {
    pub item_id: i64,
    pub name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ConnectedRealmRow {
    pub connected_realm_id: i64,
    pub name: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct FactionRow {
    pub faction_id: i64,
    pub faction_name: Option<String>,
}
