//! Squad-wide averages and star classification

use super::synthesizer::resolve;
use crate::models::{CardStats, Formation, PlayerRecord, SquadSlotMap, StatKind};

/// Average card stats over every occupied slot.
///
/// `None` means "no squad", which is different from a squad rated 0.
pub fn aggregate(squad: &SquadSlotMap) -> Option<CardStats> {
    average(squad.players())
}

/// Average over occupied slots that belong to `formation`, skipping orphans.
pub fn aggregate_in_formation(squad: &SquadSlotMap, formation: &Formation) -> Option<CardStats> {
    average(squad.in_formation(formation).map(|(_, player)| player))
}

fn average<'a>(players: impl Iterator<Item = &'a PlayerRecord>) -> Option<CardStats> {
    let mut totals = [0i64; 7];
    let mut count = 0i64;

    for player in players {
        let stats = resolve(player);
        for (total, kind) in totals.iter_mut().zip(StatKind::ALL) {
            *total += stats.get(kind) as i64;
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let mut result = CardStats::default();
    for (total, kind) in totals.iter().zip(StatKind::ALL) {
        // f64::round rounds half away from zero
        result.set(kind, (*total as f64 / count as f64).round() as i32);
    }
    Some(result)
}

/// Half-star classification of an average rating; 0 when there is no rating.
pub fn star_rating(rating: i32) -> f32 {
    match rating {
        0 => 0.0,
        r if r >= 80 => 5.0,
        r if r >= 75 => 4.5,
        r if r >= 70 => 4.0,
        r if r >= 65 => 3.5,
        r if r >= 60 => 3.0,
        _ => 2.5,
    }
}

pub fn star_rating_of(stats: Option<&CardStats>) -> f32 {
    stats.map_or(0.0, |s| star_rating(s.rating))
}
