//! Binary record codec for persisted state
//!
//! Layout: LZ4 block (size prepended) of a MessagePack envelope
//! `{version, payload}` with field names, followed by a SHA-256 checksum of
//! the compressed bytes.

use super::error::SaveError;
use super::RECORD_VERSION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

const CHECKSUM_LEN: usize = 32;
/// LZ4 size prefix
const HEADER_LEN: usize = 4;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    payload: T,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    version: u32,
}

/// Serialize, compress and checksum one persisted record.
pub fn encode_record<T: Serialize>(value: &T) -> Result<Vec<u8>, SaveError> {
    let msgpack = to_vec_named(&EnvelopeRef { version: RECORD_VERSION, payload: value })?;

    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

/// Verify, decompress and deserialize one persisted record.
pub fn decode_record<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SaveError> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    if hasher.finalize()[..] != *checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    let header: EnvelopeHeader = from_slice(&msgpack)?;
    if header.version > RECORD_VERSION {
        return Err(SaveError::VersionMismatch { found: header.version, expected: RECORD_VERSION });
    }

    let envelope: Envelope<T> = from_slice(&msgpack)?;
    Ok(envelope.payload)
}

/// Unix milliseconds
pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}
