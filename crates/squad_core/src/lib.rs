//! # squad_core - Squad Builder Core
//!
//! Squad-building engine for card-style football rosters: players are placed
//! into formation slots, rated, and scored for chemistry.
//!
//! ## Features
//! - Deterministic card stats synthesized from a player's identity
//! - Squad averages and star classification
//! - Chemistry from positional fit plus club/nation links
//! - Snapshots, JSON export/import and durable state behind a repository

pub mod chemistry;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod player;
pub mod save;
pub mod state;

pub use error::{Result, SquadError};

// Re-export rating system
pub use player::{aggregate, resolve, star_rating, synthesize, AttributeSynthesizer};

// Re-export chemistry
pub use chemistry::{ChemistryEngine, ChemistryReport, LinkKind, PositionFit};

// Re-export models
pub use models::{
    CardStats, Formation, PlayerRecord, Slot, Snapshot, SnapshotSummary, SquadSlotMap, StatKind,
    StatOverride,
};

// Re-export formations
pub use data::{FormationCatalog, FormationProvider, BUILTIN_FORMATIONS, DEFAULT_FORMATION_ID};

// Re-export save system
pub use save::{FileRepository, MemoryRepository, SaveError, SquadExport, StateRepository};

// Re-export state management
pub use config::StoreConfig;
pub use state::{PersistWarning, SquadReport, SquadStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
