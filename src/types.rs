use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which auction house series to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesFilter {
    pub item_id: i64,
    pub faction_id: i64,
    pub realm_id: i64,
}

/// Built-in faction names, used when the database has no `Factions` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Alliance,
    Horde,
    Neutral,
    Other(i64),
}

impl Faction {
    pub fn from_id(id: i64) -> Self {
        match id {
            0 => Faction::Alliance,
            1 => Faction::Horde,
            2 => Faction::Neutral,
            other => Faction::Other(other),
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Alliance => write!(f, "Alliance"),
            Faction::Horde => write!(f, "Horde"),
            Faction::Neutral => write!(f, "Neutral"),
            Faction::Other(id) => write!(f, "faction {id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Enriched series
// ---------------------------------------------------------------------------

/// One aggregated bucket, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPoint {
    /// Start of the bucket (UTC).
    pub bucket: DateTime<Utc>,
    pub weekday: String,
    /// Lowest non-zero buyout in the bucket, in copper.
    pub min_buyout: u64,
    pub formatted_min_buyout: String,
    pub total_quantity: u64,
    pub hover_text: String,
}

/// Everything the renderers need besides the points themselves.
#[derive(Debug, Clone, Serialize)]
pub struct ChartMeta {
    pub item_name: String,
    pub realm_name: String,
    pub faction: String,
    pub window_days: i64,
    pub bucket_secs: i64,
}

impl ChartMeta {
    pub fn title(&self) -> String {
        format!("Min Buyout for {}", self.item_name)
    }

    pub fn subtitle(&self) -> String {
        format!(
            "{} / {} / last {} days",
            self.realm_name, self.faction, self.window_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faction_ids_map_to_names() {
        assert_eq!(Faction::from_id(0).to_string(), "Alliance");
        assert_eq!(Faction::from_id(1).to_string(), "Horde");
        assert_eq!(Faction::from_id(2).to_string(), "Neutral");
        assert_eq!(Faction::from_id(7), Faction::Other(7));
    }
}
