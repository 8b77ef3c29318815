//! Backup façade: signature generation plus delta computation for two file
//! versions
//!
//! `run_backup` leaves two artifacts next to the inputs: `<v1>.sig.bin`
//! describing the base version, and `<v2>.deltas.bin` describing how to
//! rebuild the newer version from it.

use crate::delta::{compute_delta, write_delta_to_bytes};
use crate::error::Result;
use crate::fileio;
use crate::format::BackupReport;
use crate::signature::{generate_signature_from_bytes, read_signature, write_signature_to_bytes};
use std::path::{Path, PathBuf};

/// Suffix appended to the base file's name for the signature artifact
pub const SIGNATURE_SUFFIX: &str = ".sig.bin";

/// Suffix appended to the new file's name for the delta artifact
pub const DELTA_SUFFIX: &str = ".deltas.bin";

/// Signature artifact path for a base file
pub fn signature_path(v1: &Path) -> PathBuf {
    let mut os = v1.as_os_str().to_os_string();
    os.push(SIGNATURE_SUFFIX);
    PathBuf::from(os)
}

/// Delta artifact path for a newer file
pub fn delta_path(v2: &Path) -> PathBuf {
    let mut os = v2.as_os_str().to_os_string();
    os.push(DELTA_SUFFIX);
    PathBuf::from(os)
}

/// Create the signature file for `v1` and the delta file describing `v2`
pub fn run_backup(v1: &Path, v2: &Path, chunk_size: u32) -> Result<BackupReport> {
    let base = fileio::load(v1)?;
    tracing::info!(
        path = %v1.display(),
        size = base.len(),
        chunk_size,
        "building signature index"
    );
    let signatures = generate_signature_from_bytes(&base, chunk_size)?;

    let sig_bytes = write_signature_to_bytes(&signatures)?;
    let sig_path = signature_path(v1);
    fileio::save(&sig_path, &sig_bytes)?;
    tracing::info!(
        path = %sig_path.display(),
        blocks = signatures.len(),
        "signature file saved"
    );

    // the delta engine consumes the persisted artifact, not the in-memory index
    let target = fileio::load(v2)?;
    let signatures = read_signature(&sig_path)?;
    let delta = compute_delta(&base, &target, &signatures)?;

    let delta_bytes = write_delta_to_bytes(&delta)?;
    let out_path = delta_path(v2);
    fileio::save(&out_path, &delta_bytes)?;
    tracing::info!(
        path = %out_path.display(),
        ops = delta.operation_count(),
        savings = format!("{:.1}%", delta.savings_percent()),
        "delta file saved"
    );

    Ok(BackupReport {
        base_size: base.len() as u64,
        target_size: target.len() as u64,
        block_count: signatures.len(),
        operation_count: delta.operation_count(),
        bytes_reused: delta.bytes_reused,
        bytes_new: delta.bytes_new,
        signature_file_size: sig_bytes.len() as u64,
        delta_file_size: delta_bytes.len() as u64,
    })
}
