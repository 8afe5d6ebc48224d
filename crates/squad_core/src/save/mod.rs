// Persistence for the squad store
// Keyed binary records (MessagePack + LZ4 + SHA-256) and JSON transfer files

pub mod error;
pub mod format;
pub mod repository;
pub mod transfer;

pub use error::SaveError;
pub use format::{current_timestamp, decode_record, encode_record};
pub use repository::{FileRepository, MemoryRepository, StateRepository};
pub use transfer::{parse_import, ImportedSquad, SquadExport};

/// Envelope version written into every persisted record
pub const RECORD_VERSION: u32 = 1;
