//! Progress math for the lifecycle driver.
//!
//! Consumers compute rate = step bytes / tick seconds and
//! ETA = remaining bytes / rate, formatted `HH:MM:SS` for the record.

/// ETA string used before a rate is known.
pub const ETA_UNKNOWN: &str = "--:--:--";

/// Snapshot of byte progress for one download.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot {
    /// Bytes simulated so far.
    pub downloaded: u64,
    /// Total size in bytes.
    pub total: u64,
}

impl ProgressSnapshot {
    /// Percent complete in [0.0, 100.0]. A zero-byte download counts as done.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.downloaded as f64 / self.total as f64 * 100.0).min(100.0)
    }

    /// Bytes not yet simulated.
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.downloaded)
    }
}

/// Estimated seconds remaining (None if the rate is unusable).
pub fn eta_secs(remaining: u64, bytes_per_sec: f64) -> Option<f64> {
    if remaining == 0 {
        return Some(0.0);
    }
    if bytes_per_sec <= 0.0 {
        return None;
    }
    Some(remaining as f64 / bytes_per_sec)
}

/// Formats seconds as `HH:MM:SS` (hours keep growing past 99).
pub fn format_hms(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
