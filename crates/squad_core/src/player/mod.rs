//! Player rating system
//!
//! - Deterministic card stats synthesized from a player's identity
//! - Squad-wide averages and star classification

pub mod aggregate;
pub mod synthesizer;

pub use aggregate::{aggregate, aggregate_in_formation, star_rating, star_rating_of};
pub use synthesizer::{identity_hash, resolve, synthesize, synthesize_stat, AttributeSynthesizer};
