//! Squad State Manager
//!
//! `SquadStore` is the session's single source of truth for slot assignments,
//! the active formation and saved snapshots. Every mutation completes in memory
//! first and is then written through to the injected repository before the
//! call returns. Persistence is a best-effort mirror: a failed write is logged
//! and queued as a [`PersistWarning`], never rolled back.
//!
//! Mutations take `&mut self`, so a store has exactly one writer. Callers that
//! share a store across threads must serialize access themselves (e.g. behind
//! a `Mutex`).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::chemistry::ChemistryEngine;
use crate::config::StoreConfig;
use crate::data::FormationProvider;
use crate::error::{Result, SquadError};
use crate::models::{CardStats, PlayerRecord, Snapshot, SnapshotSummary, SquadSlotMap, StatOverride};
use crate::player::aggregate::{aggregate, aggregate_in_formation, star_rating_of};
use crate::save::{
    current_timestamp, decode_record, encode_record, parse_import, SaveError, SquadExport,
    StateRepository,
};

/// A persistence problem that did not affect the in-memory state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistWarning {
    pub key: String,
    pub message: String,
    /// Retrying later may succeed (I/O); otherwise the record itself is bad
    pub recoverable: bool,
}

impl PersistWarning {
    fn new(key: &str, err: &SaveError) -> Self {
        Self { key: key.to_string(), message: err.to_string(), recoverable: err.is_recoverable() }
    }
}

/// Derived view of the live squad
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadReport {
    pub formation_id: String,
    /// Average card stats of placed players; `None` for an empty pitch
    pub stats: Option<CardStats>,
    pub stars: f32,
    /// 0..=100; 0 for an unknown formation
    pub chemistry: u32,
    /// Occupied slots that the active formation does not have
    pub orphan_slots: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record {
    Squad,
    Formation,
    Snapshots,
}

pub struct SquadStore<R: StateRepository> {
    repo: R,
    config: StoreConfig,
    squad: SquadSlotMap,
    formation_id: String,
    /// Most recent first
    snapshots: Vec<Snapshot>,
    last_snapshot_id: u64,
    warnings: Vec<PersistWarning>,
}

impl<R: StateRepository> SquadStore<R> {
    /// Open a store with the default configuration.
    pub fn open(repo: R) -> Self {
        Self::with_config(repo, StoreConfig::default())
    }

    /// Load the three persisted records once; anything missing or unreadable
    /// starts from its default.
    pub fn with_config(repo: R, config: StoreConfig) -> Self {
        let mut warnings = Vec::new();

        let squad: SquadSlotMap =
            load_record(&repo, &config.keys.squad, &mut warnings).unwrap_or_default();
        let formation_id = load_record::<String>(&repo, &config.keys.formation, &mut warnings)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| config.default_formation.clone());
        let snapshots: Vec<Snapshot> =
            load_record(&repo, &config.keys.snapshots, &mut warnings).unwrap_or_default();
        let last_snapshot_id = snapshots.iter().map(|s| s.id).max().unwrap_or(0);

        log::info!(
            "Squad store opened: {} players, formation {}, {} snapshots",
            squad.len(),
            formation_id,
            snapshots.len()
        );

        Self { repo, config, squad, formation_id, snapshots, last_snapshot_id, warnings }
    }

    // ========================
    // Accessors
    // ========================

    pub fn squad(&self) -> &SquadSlotMap {
        &self.squad
    }

    pub fn player(&self, slot_id: &str) -> Option<&PlayerRecord> {
        self.squad.get(slot_id)
    }

    pub fn formation_id(&self) -> &str {
        &self.formation_id
    }

    /// Most recent first
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    // ========================
    // Squad Management
    // ========================

    /// Place a player in a slot, replacing any occupant. The slot id is not
    /// checked against the active formation.
    pub fn assign_player(&mut self, slot_id: &str, player: PlayerRecord) {
        self.squad.assign(slot_id, player);
        self.persist(&[Record::Squad]);
    }

    /// Empty a slot; no-op if it is already empty.
    pub fn clear_slot(&mut self, slot_id: &str) {
        if self.squad.clear_slot(slot_id).is_some() {
            self.persist(&[Record::Squad]);
        }
    }

    pub fn reset_all(&mut self) {
        self.squad.clear();
        self.persist(&[Record::Squad]);
    }

    /// Switch formation. Slots the new formation lacks are kept as orphans.
    pub fn set_formation(&mut self, formation_id: &str) {
        self.formation_id = formation_id.to_string();
        self.persist(&[Record::Formation]);
    }

    /// Replace the stored record for a slot (stat editor flow).
    pub fn update_player_override(&mut self, slot_id: &str, updated_player: PlayerRecord) {
        self.squad.assign(slot_id, updated_player);
        self.persist(&[Record::Squad]);
    }

    /// Merge edited stats into the player in `slot_id`. Returns false when the
    /// slot is empty.
    pub fn apply_override(&mut self, slot_id: &str, overrides: StatOverride) -> bool {
        let Some(player) = self.squad.get(slot_id) else {
            return false;
        };
        let updated = player.clone().with_override(overrides);
        self.update_player_override(slot_id, updated);
        true
    }

    /// Drop edited stats so the player shows the synthesized card again.
    /// Returns false when the slot is empty.
    pub fn reset_player_stats(&mut self, slot_id: &str) -> bool {
        let Some(player) = self.squad.get(slot_id) else {
            return false;
        };
        let mut updated = player.clone();
        updated.clear_override();
        self.update_player_override(slot_id, updated);
        true
    }

    // ========================
    // Snapshots
    // ========================

    /// Save a copy of the live squad and formation. A blank name becomes
    /// "Squad {n}".
    pub fn save_snapshot(&mut self, name: &str) -> &Snapshot {
        let now = current_timestamp();
        let id = now.max(self.last_snapshot_id + 1);
        let name = if name.trim().is_empty() {
            format!("Squad {}", self.snapshots.len() + 1)
        } else {
            name.to_string()
        };

        let snapshot = Snapshot {
            id,
            name,
            created_at: now,
            squad: self.squad.clone(),
            formation: self.formation_id.clone(),
        };
        log::info!("Saved snapshot {} \"{}\" ({} players)", id, snapshot.name, snapshot.squad.len());

        self.last_snapshot_id = id;
        self.snapshots.insert(0, snapshot);
        self.persist(&[Record::Snapshots]);
        &self.snapshots[0]
    }

    pub fn snapshot(&self, id: u64) -> Result<&Snapshot> {
        self.snapshots.iter().find(|s| s.id == id).ok_or(SquadError::NotFound { id })
    }

    /// Replace squad and formation with copies of a snapshot's values.
    pub fn load_snapshot(&mut self, id: u64) -> Result<()> {
        let snapshot = self.snapshot(id)?;
        let squad = snapshot.squad.clone();
        let formation = snapshot.formation.clone();

        self.squad = squad;
        self.formation_id = formation;
        log::info!("Loaded snapshot {}", id);
        self.persist(&[Record::Squad, Record::Formation]);
        Ok(())
    }

    /// Remove a snapshot; no-op if absent. Returns whether one was removed.
    pub fn delete_snapshot(&mut self, id: u64) -> bool {
        let before = self.snapshots.len();
        self.snapshots.retain(|s| s.id != id);
        let removed = self.snapshots.len() != before;
        if removed {
            self.persist(&[Record::Snapshots]);
        }
        removed
    }

    pub fn snapshot_summaries(&self) -> Vec<SnapshotSummary> {
        self.snapshots.iter().map(Snapshot::summary).collect()
    }

    // ========================
    // Import / Export
    // ========================

    pub fn export_state(&self) -> SquadExport {
        SquadExport {
            app_identifier: self.config.app_identifier.clone(),
            schema_version: self.config.schema_version.clone(),
            exported_at: current_timestamp(),
            slot_map: self.squad.clone(),
            formation_id: self.formation_id.clone(),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        self.export_state().to_json()
    }

    /// Replace squad and formation from an exported file. On error nothing
    /// changes.
    pub fn import_state(&mut self, raw: &str) -> Result<()> {
        let imported = parse_import(raw)?;
        if let Some(app) = imported.app_identifier.as_deref() {
            if app != self.config.app_identifier {
                log::warn!("Importing squad exported by '{}'", app);
            }
        }

        self.squad = imported.slot_map;
        self.formation_id = imported.formation_id;
        log::info!("Imported squad: {} players, formation {}", self.squad.len(), self.formation_id);
        self.persist(&[Record::Squad, Record::Formation]);
        Ok(())
    }

    // ========================
    // Reporting
    // ========================

    pub fn report(&self, provider: &impl FormationProvider) -> SquadReport {
        let formation = provider.formation(&self.formation_id);
        let stats = match formation {
            Some(formation) => aggregate_in_formation(&self.squad, formation),
            None => aggregate(&self.squad),
        };
        let orphan_slots = match formation {
            Some(formation) => self.squad.orphan_slots(formation).map(str::to_string).collect(),
            None => Vec::new(),
        };

        SquadReport {
            formation_id: self.formation_id.clone(),
            stars: star_rating_of(stats.as_ref()),
            stats,
            chemistry: ChemistryEngine::chemistry(&self.squad, &self.formation_id, provider),
            orphan_slots,
        }
    }

    // ========================
    // Persistence
    // ========================

    /// Drain warnings collected since the last call.
    pub fn take_warnings(&mut self) -> Vec<PersistWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// End the session and hand back the repository.
    pub fn close(mut self) -> R {
        if let Err(e) = self.repo.close() {
            log::warn!("Failed to close state repository: {}", e);
        }
        self.repo
    }

    fn persist(&mut self, records: &[Record]) {
        for record in records {
            let (key, encoded) = match record {
                Record::Squad => (&self.config.keys.squad, encode_record(&self.squad)),
                Record::Formation => (&self.config.keys.formation, encode_record(&self.formation_id)),
                Record::Snapshots => (&self.config.keys.snapshots, encode_record(&self.snapshots)),
            };

            let result = encoded.and_then(|bytes| self.repo.save(key, &bytes));
            if let Err(e) = result {
                log::warn!("Failed to persist '{}': {}", key, e);
                self.warnings.push(PersistWarning::new(key, &e));
            }
        }
    }
}

fn load_record<T: DeserializeOwned>(
    repo: &impl StateRepository,
    key: &str,
    warnings: &mut Vec<PersistWarning>,
) -> Option<T> {
    let result = repo.load(key).and_then(|bytes| bytes.map(|b| decode_record::<T>(&b)).transpose());
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Discarding unreadable record '{}': {}", key, e);
            warnings.push(PersistWarning::new(key, &e));
            None
        }
    }
}

#[cfg(test)]
mod tests;
