//! Chemistry scoring
//!
//! Each placed player earns up to 10 points: positional fit to the slot plus a
//! link bonus for sharing a club or nation with a teammate. The squad total is
//! capped at 100, so eleven perfect players (110) still read as 100.

mod position_fit;

pub use position_fit::{PositionCategory, PositionFit};

use crate::data::FormationProvider;
use crate::models::{Formation, PlayerRecord, SquadSlotMap};
use serde::Serialize;

pub const MAX_PLAYER_CHEMISTRY: u32 = 10;
pub const MAX_SQUAD_CHEMISTRY: u32 = 100;

/// Teammate link earned by a player. Club and nation links never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkKind {
    Club,
    Nation,
    None,
}

impl LinkKind {
    pub fn score(self) -> u32 {
        match self {
            LinkKind::Club => 3,
            LinkKind::Nation => 1,
            LinkKind::None => 0,
        }
    }
}

/// Chemistry contribution of one placed player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerChemistry {
    pub slot_id: String,
    pub slot_label: String,
    pub position_fit: PositionFit,
    pub link: LinkKind,
    /// min(10, position + link)
    pub chemistry: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemistryReport {
    pub formation_id: String,
    pub players: Vec<PlayerChemistry>,
    /// Sum of player chemistry, capped at 100
    pub total: u32,
}

impl ChemistryReport {
    /// Sum before the squad cap is applied
    pub fn uncapped_total(&self) -> u32 {
        self.players.iter().map(|p| p.chemistry).sum()
    }
}

pub struct ChemistryEngine;

impl ChemistryEngine {
    /// Squad chemistry in [0, 100]; 0 when the formation is unknown.
    pub fn chemistry(
        squad: &SquadSlotMap,
        formation_id: &str,
        provider: &impl FormationProvider,
    ) -> u32 {
        Self::report(squad, formation_id, provider).map_or(0, |report| report.total)
    }

    pub fn report(
        squad: &SquadSlotMap,
        formation_id: &str,
        provider: &impl FormationProvider,
    ) -> Option<ChemistryReport> {
        let formation = provider.formation(formation_id)?;
        Some(Self::report_for(squad, formation))
    }

    /// Per-slot breakdown. Slots missing from `formation` neither score nor link.
    pub fn report_for(squad: &SquadSlotMap, formation: &Formation) -> ChemistryReport {
        let placed: Vec<(&str, &str, &PlayerRecord)> = formation
            .slots
            .iter()
            .filter_map(|slot| {
                squad.get(&slot.id).map(|player| (slot.id.as_str(), slot.label.as_str(), player))
            })
            .collect();

        let players: Vec<PlayerChemistry> = placed
            .iter()
            .map(|(slot_id, slot_label, player)| {
                let position_fit = PositionFit::evaluate(player.position.as_deref(), slot_label);
                let link = Self::link_for(slot_id, player, &placed);
                PlayerChemistry {
                    slot_id: slot_id.to_string(),
                    slot_label: slot_label.to_string(),
                    position_fit,
                    link,
                    chemistry: (position_fit.score() + link.score()).min(MAX_PLAYER_CHEMISTRY),
                }
            })
            .collect();

        let total = players.iter().map(|p| p.chemistry).sum::<u32>().min(MAX_SQUAD_CHEMISTRY);
        log::debug!(
            "Chemistry for {} ({} placed): {}",
            formation.id,
            players.len(),
            total
        );

        ChemistryReport { formation_id: formation.id.clone(), players, total }
    }

    fn link_for(slot_id: &str, player: &PlayerRecord, placed: &[(&str, &str, &PlayerRecord)]) -> LinkKind {
        let teammates = || placed.iter().filter(|(other, _, _)| *other != slot_id).map(|(_, _, p)| *p);

        if shares(&player.club, teammates().map(|p| &p.club)) {
            LinkKind::Club
        } else if shares(&player.nationality, teammates().map(|p| &p.nationality)) {
            LinkKind::Nation
        } else {
            LinkKind::None
        }
    }
}

/// A missing or blank value never links, not even to a teammate whose value
/// is missing as well.
fn shares<'a>(value: &Option<String>, mut others: impl Iterator<Item = &'a Option<String>>) -> bool {
    match value.as_deref() {
        Some(v) if !v.is_empty() => others.any(|o| o.as_deref() == Some(v)),
        _ => false,
    }
}
