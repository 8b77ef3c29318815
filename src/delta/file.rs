//! .deltas.bin file format reading and writing
//!
//! ```text
//! [ magic u32 = DEADBEEF ] [ deltas u32 ] [ payload_len u32 ] [ zlib(payload) ]
//! payload = deltas x record
//! record  = { id u32, command u32, pos u32, size u32 } followed by
//!           size literal bytes if command == ADD, else nothing
//! ```
//!
//! All integers are big-endian. `payload_len` is the uncompressed payload
//! size; the record `id` equals the record's index.

use super::{Delta, DeltaOp, COMMAND_ADD, COMMAND_KEEP, DELTA_MAGIC, DELTA_RECORD_LEN};
use crate::compress;
use crate::error::{Error, Result};
use crate::fileio;
use std::path::Path;

/// Fixed header: magic + record count + uncompressed payload length
const HEADER_LEN: usize = 12;

/// Write a delta stream to a file
pub fn write_delta(delta: &Delta, path: &Path) -> Result<()> {
    let bytes = write_delta_to_bytes(delta)?;
    fileio::save(path, &bytes)
}

/// Serialize a delta stream to bytes
pub fn write_delta_to_bytes(delta: &Delta) -> Result<Vec<u8>> {
    let literal_total: usize = delta
        .operations
        .iter()
        .map(|op| match op {
            DeltaOp::Add { data, .. } => data.len(),
            DeltaOp::Keep { .. } => 0,
        })
        .sum();
    let payload_len = delta.operations.len() * DELTA_RECORD_LEN + literal_total;

    let mut payload = Vec::with_capacity(payload_len);
    for (id, op) in delta.operations.iter().enumerate() {
        payload.extend_from_slice(&(id as u32).to_be_bytes());
        payload.extend_from_slice(&op.command().to_be_bytes());
        match op {
            DeltaOp::Add { pos, data } => {
                payload.extend_from_slice(&pos.to_be_bytes());
                payload.extend_from_slice(&(data.len() as u32).to_be_bytes());
                payload.extend_from_slice(data);
            }
            DeltaOp::Keep { pos, size } => {
                payload.extend_from_slice(&pos.to_be_bytes());
                payload.extend_from_slice(&size.to_be_bytes());
            }
        }
    }

    let compressed = compress::compress(&payload)?;

    let mut out = Vec::with_capacity(HEADER_LEN + compressed.len());
    out.extend_from_slice(&DELTA_MAGIC.to_be_bytes());
    out.extend_from_slice(&(delta.operations.len() as u32).to_be_bytes());
    out.extend_from_slice(&(payload_len as u32).to_be_bytes());
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Read a delta stream from a file
pub fn read_delta(path: &Path) -> Result<Delta> {
    let bytes = fileio::load(path)?;
    read_delta_from_bytes(&bytes)
}

/// Parse a delta stream from bytes
pub fn read_delta_from_bytes(data: &[u8]) -> Result<Delta> {
    if data.len() < HEADER_LEN {
        return Err(Error::malformed("delta file shorter than its header"));
    }

    let magic = u32::from_be_bytes(data[0..4].try_into().unwrap());
    if magic != DELTA_MAGIC {
        return Err(Error::bad_delta(format!("unexpected magic {:#010x}", magic)));
    }

    let count = u32::from_be_bytes(data[4..8].try_into().unwrap()) as usize;
    let payload_len = u32::from_be_bytes(data[8..12].try_into().unwrap()) as usize;
    if payload_len == 0 {
        return Err(Error::malformed("delta file declares an empty payload"));
    }

    let payload = compress::decompress(&data[HEADER_LEN..], payload_len)?;

    let mut delta = Delta::default();
    let mut cursor = 0usize;

    for _ in 0..count {
        if cursor + DELTA_RECORD_LEN > payload.len() {
            return Err(Error::malformed("delta record overruns the payload"));
        }
        let command = u32::from_be_bytes(payload[cursor + 4..cursor + 8].try_into().unwrap());
        let pos = u32::from_be_bytes(payload[cursor + 8..cursor + 12].try_into().unwrap());
        let size = u32::from_be_bytes(payload[cursor + 12..cursor + 16].try_into().unwrap());
        cursor += DELTA_RECORD_LEN;

        match command {
            COMMAND_ADD => {
                let len = size as usize;
                if cursor + len > payload.len() {
                    return Err(Error::malformed("literal bytes overrun the payload"));
                }
                delta.add_literal(pos, payload[cursor..cursor + len].to_vec());
                cursor += len;
            }
            COMMAND_KEEP => {
                delta.add_keep(pos, size);
            }
            other => {
                return Err(Error::InvalidCommand { command: other });
            }
        }
    }

    delta.target_size = delta.bytes_reused + delta.bytes_new;
    Ok(delta)
}
