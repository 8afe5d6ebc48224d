use serde::{Deserialize, Serialize};

/// One of the seven card fields: six sub-attributes plus the overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Pac,
    Sho,
    Pas,
    Dri,
    Def,
    Phy,
    Rating,
}

impl StatKind {
    pub const ALL: [StatKind; 7] = [
        StatKind::Pac,
        StatKind::Sho,
        StatKind::Pas,
        StatKind::Dri,
        StatKind::Def,
        StatKind::Phy,
        StatKind::Rating,
    ];

    pub const SUB_ATTRIBUTES: [StatKind; 6] =
        [StatKind::Pac, StatKind::Sho, StatKind::Pas, StatKind::Dri, StatKind::Def, StatKind::Phy];

    /// Suffix appended to the player identity before hashing.
    pub fn salt(self) -> &'static str {
        match self {
            StatKind::Pac => "pac",
            StatKind::Sho => "sho",
            StatKind::Pas => "pas",
            StatKind::Dri => "dri",
            StatKind::Def => "def",
            StatKind::Phy => "phy",
            StatKind::Rating => "rating",
        }
    }

    /// Card label (e.g. "PAC")
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Pac => "PAC",
            StatKind::Sho => "SHO",
            StatKind::Pas => "PAS",
            StatKind::Dri => "DRI",
            StatKind::Def => "DEF",
            StatKind::Phy => "PHY",
            StatKind::Rating => "OVR",
        }
    }

    pub fn is_rating(self) -> bool {
        matches!(self, StatKind::Rating)
    }
}

/// Resolved card values for a player or a squad average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardStats {
    pub pac: i32,
    pub sho: i32,
    pub pas: i32,
    pub dri: i32,
    pub def: i32,
    pub phy: i32,
    pub rating: i32,
}

impl CardStats {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Pac => self.pac,
            StatKind::Sho => self.sho,
            StatKind::Pas => self.pas,
            StatKind::Dri => self.dri,
            StatKind::Def => self.def,
            StatKind::Phy => self.phy,
            StatKind::Rating => self.rating,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: i32) {
        match kind {
            StatKind::Pac => self.pac = value,
            StatKind::Sho => self.sho = value,
            StatKind::Pas => self.pas = value,
            StatKind::Dri => self.dri = value,
            StatKind::Def => self.def = value,
            StatKind::Phy => self.phy = value,
            StatKind::Rating => self.rating = value,
        }
    }

    /// Card display order: (label, value) pairs for the six sub-attributes.
    pub fn sub_attributes(&self) -> [(&'static str, i32); 6] {
        StatKind::SUB_ATTRIBUTES.map(|kind| (kind.label(), self.get(kind)))
    }
}
