//! Replay a delta stream against the base file

use crate::delta::{self, Delta, DeltaOp};
use crate::error::{Error, Result};
use crate::fileio;
use crate::format::RestoreReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Replay `delta` against `source`, appending the output to `out`
///
/// ADD ops emit their literal bytes; KEEP ops emit the referenced base
/// range. The sink is append-only, so the write offset is implicit.
pub fn apply_delta<W: Write>(source: &[u8], delta: &Delta, out: &mut W) -> Result<()> {
    for op in &delta.operations {
        match op {
            DeltaOp::Add { data, .. } => {
                out.write_all(data)
                    .map_err(|e| Error::io("writing literal bytes", e))?;
            }
            DeltaOp::Keep { pos, size } => {
                let start = *pos as usize;
                let end = start + *size as usize;
                if end > source.len() {
                    return Err(Error::malformed(format!(
                        "keep range {}..{} beyond source length {}",
                        start,
                        end,
                        source.len()
                    )));
                }
                out.write_all(&source[start..end])
                    .map_err(|e| Error::io("writing kept block", e))?;
            }
        }
    }

    Ok(())
}

/// Restore façade: rebuild the newer version at `dest` from the base file
/// and a delta file
pub fn run_restore(v1: &Path, delta_path: &Path, dest: &Path) -> Result<RestoreReport> {
    let source = fileio::load(v1)?;

    tracing::info!(path = %delta_path.display(), "loading delta file");
    let delta = delta::read_delta(delta_path)?;

    let file = File::create(dest)
        .map_err(|e| Error::io(format!("creating {}", dest.display()), e))?;
    let mut writer = BufWriter::new(file);
    apply_delta(&source, &delta, &mut writer)?;
    writer
        .flush()
        .map_err(|e| Error::io(format!("flushing {}", dest.display()), e))?;

    tracing::info!(
        dest = %dest.display(),
        bytes = delta.target_size,
        ops = delta.operation_count(),
        "restore complete"
    );

    Ok(RestoreReport {
        operations: delta.operation_count(),
        bytes_written: delta.target_size,
    })
}
