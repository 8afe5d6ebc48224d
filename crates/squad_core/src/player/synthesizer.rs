//! Deterministic card stats
//!
//! Every player gets the same card wherever it is shown or exported without
//! storing an attribute blob: each field is derived from a string hash of the
//! player's identity plus a per-field salt.
//!
//! The hash is pinned to 32-bit signed wraparound arithmetic over UTF-16 code
//! units, so any implementation reproduces the exact same values.

use crate::models::{CardStats, PlayerRecord, StatKind, StatOverride};
use std::ops::RangeInclusive;

/// Lower bound of synthesized sub-attributes
pub const SUB_ATTRIBUTE_BASE: i32 = 60;
/// Number of distinct sub-attribute values (60..=98)
pub const SUB_ATTRIBUTE_SPAN: i32 = 39;
/// Lower bound of the synthesized overall rating
pub const RATING_BASE: i32 = 95;
/// Number of distinct rating values (95..=99)
pub const RATING_SPAN: i32 = 5;

/// `hash = c + ((hash << 5) - hash)` over the UTF-16 code units of `input`.
pub fn identity_hash(input: &str) -> i32 {
    fold_hash(input.encode_utf16())
}

fn salted_hash(identity: &str, salt: &str) -> i32 {
    fold_hash(identity.encode_utf16().chain(salt.encode_utf16()))
}

fn fold_hash(units: impl Iterator<Item = u16>) -> i32 {
    units.fold(0i32, |hash, unit| (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash)))
}

/// Synthesized value of one field, ignoring overrides.
pub fn synthesize_stat(identity: &str, kind: StatKind) -> i32 {
    let (base, span) = AttributeSynthesizer::base_and_span(kind);
    // `%` keeps the dividend's sign; abs() of a value below `span` cannot overflow
    base + (salted_hash(identity, kind.salt()) % span).abs()
}

/// Card stats for `identity`, with any present override field taking precedence.
pub fn synthesize(identity: &str, overrides: Option<&StatOverride>) -> CardStats {
    let mut stats = CardStats::default();
    for kind in StatKind::ALL {
        let value = overrides
            .and_then(|o| o.get(kind))
            .unwrap_or_else(|| synthesize_stat(identity, kind));
        stats.set(kind, value);
    }
    stats
}

/// Effective card stats for a stored player.
///
/// `customStats.rating` wins over the top-level `customRating`; the top-level
/// value only applies when the override carries no rating of its own.
pub fn resolve(player: &PlayerRecord) -> CardStats {
    let mut stats = synthesize(player.identity(), player.overrides.as_ref());
    if let Some(rating) = player.rating_override() {
        stats.rating = rating;
    }
    stats
}

/// Calculator facade over the synthesis functions
pub struct AttributeSynthesizer;

impl AttributeSynthesizer {
    pub fn synthesize(identity: &str, overrides: Option<&StatOverride>) -> CardStats {
        synthesize(identity, overrides)
    }

    pub fn resolve(player: &PlayerRecord) -> CardStats {
        resolve(player)
    }

    /// Range a synthesized value of `kind` always falls in.
    pub fn range(kind: StatKind) -> RangeInclusive<i32> {
        let (base, span) = Self::base_and_span(kind);
        base..=base + span - 1
    }

    fn base_and_span(kind: StatKind) -> (i32, i32) {
        if kind.is_rating() {
            (RATING_BASE, RATING_SPAN)
        } else {
            (SUB_ATTRIBUTE_BASE, SUB_ATTRIBUTE_SPAN)
        }
    }
}
