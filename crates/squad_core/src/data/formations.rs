//! Formation catalog
//!
//! Coordinates are percent of the pitch (left, top) with the goalkeeper at the
//! bottom, matching how the pitch view lays out cards.

use crate::models::{Formation, Slot};
use once_cell::sync::Lazy;
use serde::Deserialize;

pub const DEFAULT_FORMATION_ID: &str = "4-4-2";

/// Read-only source of formation layouts, keyed by formation code.
pub trait FormationProvider {
    fn formation(&self, formation_id: &str) -> Option<&Formation>;

    /// Known formation codes, in display order.
    fn formation_ids(&self) -> Vec<&str>;
}

/// Formations shipped with the builder
pub static BUILTIN_FORMATIONS: Lazy<FormationCatalog> = Lazy::new(FormationCatalog::builtin);

#[derive(Debug, Clone, Default)]
pub struct FormationCatalog {
    formations: Vec<Formation>,
}

impl FormationCatalog {
    pub fn new(formations: Vec<Formation>) -> Result<Self, String> {
        let mut catalog = Self::default();
        for formation in formations {
            catalog.insert(formation)?;
        }
        Ok(catalog)
    }

    pub fn builtin() -> Self {
        Self { formations: vec![Self::create_f442(), Self::create_f433(), Self::create_f352()] }
    }

    /// Load a catalog from a JSON array of `{id, name, positions: [...]}`.
    pub fn from_json(json: &str) -> Result<Self, String> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            List(Vec<Formation>),
            Map(std::collections::BTreeMap<String, Formation>),
        }

        let raw: Raw =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse formations: {e}"))?;
        let formations = match raw {
            Raw::List(list) => list,
            Raw::Map(map) => map.into_values().collect(),
        };
        Self::new(formations)
    }

    /// Add a formation; ids must be unique and slots valid.
    pub fn insert(&mut self, formation: Formation) -> Result<(), String> {
        formation.validate()?;
        if self.formations.iter().any(|f| f.id == formation.id) {
            return Err(format!("duplicate formation id '{}'", formation.id));
        }
        self.formations.push(formation);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formation> {
        self.formations.iter()
    }

    // ============================================================================
    // Formation Definitions
    // ============================================================================

    /// 4-4-2 Flat
    fn create_f442() -> Formation {
        Formation::new(
            "4-4-2",
            "4-4-2 Flat",
            vec![
                Slot::new("gk", "GK", 50.0, 85.0),
                Slot::new("lb", "LB", 15.0, 60.0),
                Slot::new("lcb", "CB", 35.0, 65.0),
                Slot::new("rcb", "CB", 65.0, 65.0),
                Slot::new("rb", "RB", 85.0, 60.0),
                Slot::new("lm", "LM", 15.0, 40.0),
                Slot::new("lcm", "CM", 38.0, 45.0),
                Slot::new("rcm", "CM", 62.0, 45.0),
                Slot::new("rm", "RM", 85.0, 40.0),
                Slot::new("lst", "ST", 35.0, 15.0),
                Slot::new("rst", "ST", 65.0, 15.0),
            ],
        )
    }

    /// 4-3-3 Attack
    fn create_f433() -> Formation {
        Formation::new(
            "4-3-3",
            "4-3-3 Attack",
            vec![
                Slot::new("gk", "GK", 50.0, 85.0),
                Slot::new("lb", "LB", 15.0, 60.0),
                Slot::new("lcb", "CB", 35.0, 65.0),
                Slot::new("rcb", "CB", 65.0, 65.0),
                Slot::new("rb", "RB", 85.0, 60.0),
                Slot::new("lcm", "CM", 30.0, 35.0),
                Slot::new("cam", "CAM", 50.0, 50.0),
                Slot::new("rcm", "CM", 70.0, 35.0),
                Slot::new("lw", "LW", 15.0, 20.0),
                Slot::new("st", "ST", 50.0, 15.0),
                Slot::new("rw", "RW", 85.0, 20.0),
            ],
        )
    }

    /// 3-5-2
    fn create_f352() -> Formation {
        Formation::new(
            "3-5-2",
            "3-5-2",
            vec![
                Slot::new("gk", "GK", 50.0, 85.0),
                Slot::new("lcb", "CB", 30.0, 65.0),
                Slot::new("cb", "CB", 50.0, 70.0),
                Slot::new("rcb", "CB", 70.0, 65.0),
                Slot::new("lm", "LM", 10.0, 40.0),
                Slot::new("ldm", "CDM", 35.0, 55.0),
                Slot::new("rdm", "CDM", 65.0, 55.0),
                Slot::new("cam", "CAM", 50.0, 45.0),
                Slot::new("rm", "RM", 90.0, 40.0),
                Slot::new("lst", "ST", 35.0, 15.0),
                Slot::new("rst", "ST", 65.0, 15.0),
            ],
        )
    }
}

impl FormationProvider for FormationCatalog {
    fn formation(&self, formation_id: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.id == formation_id)
    }

    fn formation_ids(&self) -> Vec<&str> {
        self.formations.iter().map(|f| f.id.as_str()).collect()
    }
}
