use super::squad::SquadSlotMap;
use crate::player::aggregate::{aggregate, star_rating};
use serde::{Deserialize, Serialize};

/// A named, timestamped copy of a squad and its formation.
///
/// Snapshots own their slot map outright; nothing in the store hands out a
/// mutable reference to one after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Time-derived, strictly increasing within a store
    pub id: u64,
    pub name: String,
    /// Creation time (unix milliseconds)
    #[serde(rename = "timestamp", alias = "createdAt")]
    pub created_at: u64,
    #[serde(alias = "slotMap")]
    pub squad: SquadSlotMap,
    #[serde(alias = "formationId")]
    pub formation: String,
}

impl Snapshot {
    pub fn summary(&self) -> SnapshotSummary {
        let rating = aggregate(&self.squad).map(|stats| stats.rating);
        SnapshotSummary {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            formation: self.formation.clone(),
            player_count: self.squad.len(),
            rating,
            stars: star_rating(rating.unwrap_or(0)),
        }
    }
}

/// List entry for the saved-squads view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub id: u64,
    pub name: String,
    pub created_at: u64,
    pub formation: String,
    pub player_count: usize,
    pub rating: Option<i32>,
    pub stars: f32,
}

impl SnapshotSummary {
    pub fn format_created_at(&self) -> String {
        use time::{format_description::well_known::Rfc3339, OffsetDateTime};

        OffsetDateTime::from_unix_timestamp_nanos(self.created_at as i128 * 1_000_000)
            .ok()
            .and_then(|t| t.format(&Rfc3339).ok())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn get_display_text(&self) -> String {
        match self.rating {
            Some(rating) => format!(
                "{} ({}, {} players, {} OVR, {:.1}★)",
                self.name, self.formation, self.player_count, rating, self.stars
            ),
            None => format!("{} ({}, empty)", self.name, self.formation),
        }
    }
}
