//! Reference data
//!
//! Formation layouts consumed read-only by the chemistry engine and the UI.

pub mod formations;

pub use formations::{FormationCatalog, FormationProvider, BUILTIN_FORMATIONS, DEFAULT_FORMATION_ID};
