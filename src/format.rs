//! Human-readable reports for backup and restore runs

/// Format a byte count in human-readable form
pub fn format_size(bytes: u64) -> String {
    human_bytes::human_bytes(bytes as f64)
}

/// Format a percentage
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Summary of a completed backup
pub struct BackupReport {
    pub base_size: u64,
    pub target_size: u64,
    pub block_count: usize,
    pub operation_count: usize,
    pub bytes_reused: u64,
    pub bytes_new: u64,
    pub signature_file_size: u64,
    pub delta_file_size: u64,
}

impl BackupReport {
    /// Share of the new version covered by reused base blocks
    pub fn savings_percent(&self) -> f64 {
        if self.target_size == 0 {
            0.0
        } else {
            (self.bytes_reused as f64 / self.target_size as f64) * 100.0
        }
    }

    /// Format the backup report
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Backup Complete ===".to_string());
        lines.push(String::new());
        lines.push(format!("Base version:   {}", format_size(self.base_size)));
        lines.push(format!("New version:    {}", format_size(self.target_size)));
        lines.push(format!("Blocks indexed: {}", self.block_count));
        lines.push(format!("Delta records:  {}", self.operation_count));
        lines.push(String::new());
        lines.push(format!(
            "Bytes reused:   {} ({})",
            format_size(self.bytes_reused),
            format_percent(self.savings_percent())
        ));
        lines.push(format!("Literal bytes:  {}", format_size(self.bytes_new)));
        lines.push(format!(
            "Signature file: {}",
            format_size(self.signature_file_size)
        ));
        lines.push(format!(
            "Delta file:     {}",
            format_size(self.delta_file_size)
        ));

        lines.join("\n")
    }

    /// Print the report to stdout
    pub fn print(&self) {
        println!("{}", self.format());
    }
}

/// Summary of a completed restore
#[derive(Debug)]
pub struct RestoreReport {
    pub operations: usize,
    pub bytes_written: u64,
}

impl RestoreReport {
    /// Format the restore report
    pub fn format(&self) -> String {
        format!(
            "=== Restore Complete ===\n\nReplayed:  {} records\nWritten:   {}",
            self.operations,
            format_size(self.bytes_written)
        )
    }

    /// Print the report to stdout
    pub fn print(&self) {
        println!("{}", self.format());
    }
}
