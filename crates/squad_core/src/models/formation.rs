use serde::{Deserialize, Serialize};

/// Pitch coordinate in percent of the pitch (left, top), as drawn by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchCoord {
    pub left: f32,
    pub top: f32,
}

impl PitchCoord {
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// A named position within a formation that may hold one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Stable key used in the squad map (e.g. "lcb")
    pub id: String,
    /// Short position label (e.g. "CB")
    pub label: String,
    #[serde(flatten)]
    pub coord: PitchCoord,
}

impl Slot {
    pub fn new(id: &str, label: &str, left: f32, top: f32) -> Self {
        Self { id: id.to_string(), label: label.to_string(), coord: PitchCoord::new(left, top) }
    }
}

/// Immutable formation layout, selected by its code (e.g. "4-4-2").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: String,
    pub name: String,
    #[serde(rename = "positions")]
    pub slots: Vec<Slot>,
}

impl Formation {
    pub fn new(id: &str, name: &str, slots: Vec<Slot>) -> Self {
        Self { id: id.to_string(), name: name.to_string(), slots }
    }

    pub fn slot(&self, slot_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    pub fn contains_slot(&self, slot_id: &str) -> bool {
        self.slot(slot_id).is_some()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slots must have unique ids.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("formation id must not be empty".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for slot in &self.slots {
            if !seen.insert(slot.id.as_str()) {
                return Err(format!("duplicate slot id '{}' in formation {}", slot.id, self.id));
            }
        }
        Ok(())
    }
}
