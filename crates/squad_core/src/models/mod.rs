pub mod formation;
pub mod player;
pub mod snapshot;
pub mod squad;
pub mod stats;

pub use formation::{Formation, PitchCoord, Slot};
pub use player::{PlayerRecord, StatOverride};
pub use snapshot::{Snapshot, SnapshotSummary};
pub use squad::SquadSlotMap;
pub use stats::{CardStats, StatKind};
