//! Delta computation: align the new version against base block signatures
//!
//! The scan is greedy and anchored on the base file's block order. For each
//! signature in turn it searches the unconsumed tail of the target with a
//! rolling hash; a match turns the gap into an ADD and the block into a
//! KEEP. Signatures that no longer occur past the cursor are dropped.

use super::Delta;
use crate::error::{Error, Result};
use crate::hash::RollingHash;
use crate::signature::SignatureIndex;

/// Compute the delta that rebuilds `target` from `source`
///
/// `signatures` must describe `source`; each matched window is byte-compared
/// against the actual base block, so a rolling-hash collision cannot smuggle
/// corrupt data into the stream. Any target bytes left past the last match
/// are emitted as a closing ADD.
pub fn compute_delta(
    source: &[u8],
    target: &[u8],
    signatures: &SignatureIndex,
) -> Result<Delta> {
    if target.len() > u32::MAX as usize {
        return Err(Error::malformed("target exceeds 32-bit addressing"));
    }

    tracing::debug!(
        source_size = source.len(),
        target_size = target.len(),
        blocks = signatures.len(),
        "starting delta computation"
    );

    let mut delta = Delta::new(target.len() as u64);
    let mut offset = 0usize;
    let mut matched = 0usize;

    for sig in signatures.iter() {
        let start = sig.pos as usize;
        let end = start + sig.size as usize;
        if end > source.len() {
            return Err(Error::malformed(format!(
                "signature block {} spans {}..{} beyond source length {}",
                sig.id,
                start,
                end,
                source.len()
            )));
        }
        let block = &source[start..end];

        let Some(pos) = search(&target[offset..], sig.hash, block) else {
            tracing::trace!(block = sig.id, "block not found past cursor, dropping");
            continue;
        };

        if pos > 0 {
            delta.add_literal(offset as u32, target[offset..offset + pos].to_vec());
        }
        delta.add_keep(sig.pos, sig.size);
        matched += 1;
        offset += pos + sig.size as usize;
    }

    // Target bytes past the last matched block are literal
    if offset < target.len() {
        delta.add_literal(offset as u32, target[offset..].to_vec());
    }

    tracing::debug!(
        matched,
        ops = delta.operation_count(),
        bytes_reused = delta.bytes_reused,
        bytes_new = delta.bytes_new,
        "delta computation complete"
    );

    Ok(delta)
}

/// Find the smallest offset where `block` occurs in `buffer`
///
/// Slides a rolling hash one byte at a time; a hash hit only counts once
/// the window bytes equal the block bytes.
fn search(buffer: &[u8], block_hash: u32, block: &[u8]) -> Option<usize> {
    let size = block.len();
    if size == 0 || size > buffer.len() {
        return None;
    }

    let mut rolling = RollingHash::new(&buffer[..size]);
    let last = buffer.len() - size;

    for offset in 0..=last {
        if rolling.value() == block_hash && &buffer[offset..offset + size] == block {
            return Some(offset);
        }
        if offset < last {
            rolling.roll(buffer[offset], buffer[offset + size]);
        }
    }

    None
}
