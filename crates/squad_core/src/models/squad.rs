use super::formation::Formation;
use super::player::PlayerRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot id → player. An absent key is an empty slot.
///
/// The map does not know which formation is active; keys that are not part of
/// the current formation ("orphan" slots) are kept until cleared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquadSlotMap(BTreeMap<String, PlayerRecord>);

impl SquadSlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the previous occupant.
    pub fn assign(&mut self, slot_id: impl Into<String>, player: PlayerRecord) -> Option<PlayerRecord> {
        self.0.insert(slot_id.into(), player)
    }

    pub fn clear_slot(&mut self, slot_id: &str) -> Option<PlayerRecord> {
        self.0.remove(slot_id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, slot_id: &str) -> Option<&PlayerRecord> {
        self.0.get(slot_id)
    }

    pub fn is_occupied(&self, slot_id: &str) -> bool {
        self.0.contains_key(slot_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerRecord)> {
        self.0.iter().map(|(slot, player)| (slot.as_str(), player))
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.0.values()
    }

    /// Occupied slots that exist in `formation`, in formation order.
    pub fn in_formation<'a>(
        &'a self,
        formation: &'a Formation,
    ) -> impl Iterator<Item = (&'a str, &'a PlayerRecord)> + 'a {
        formation
            .slots
            .iter()
            .filter_map(move |slot| self.0.get(&slot.id).map(|p| (slot.id.as_str(), p)))
    }

    /// Occupied slot ids missing from `formation`.
    pub fn orphan_slots<'a>(&'a self, formation: &'a Formation) -> impl Iterator<Item = &'a str> + 'a {
        self.0.keys().map(String::as_str).filter(move |id| !formation.contains_slot(id))
    }
}

impl FromIterator<(String, PlayerRecord)> for SquadSlotMap {
    fn from_iter<T: IntoIterator<Item = (String, PlayerRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
