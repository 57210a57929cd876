// crates/network/src/progress.rs
//! Download progress tracking

use std::sync::{Arc, Mutex};

/// Download progress information
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    /// Total bytes to download (if known)
    pub total_bytes: Option<u64>,
    /// Bytes downloaded so far
    pub downloaded_bytes: u64,
    last_reported_quarter: u8,
}

impl DownloadProgress {
    /// Creates a new progress record
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes,
            downloaded_bytes: 0,
            last_reported_quarter: 0,
        }
    }

    /// Adds newly received bytes
    pub fn update(&mut self, additional_bytes: u64) {
        self.downloaded_bytes += additional_bytes;

        if let Some(pct) = self.percentage() {
            let quarter = (pct / 25.0).floor().min(4.0) as u8;
            if quarter > self.last_reported_quarter {
                self.last_reported_quarter = quarter;
                log::debug!(
                    "Download {:.0}% ({} bytes)",
                    pct.min(100.0),
                    self.downloaded_bytes
                );
            }
        }
    }

    /// Returns completion percentage if the size is known
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.downloaded_bytes as f64 / total as f64) * 100.0
            }
        })
    }

    /// Returns true if download is complete
    pub fn is_complete(&self) -> bool {
        self.total_bytes
            .is_some_and(|total| self.downloaded_bytes >= total)
    }
}

/// Thread-safe progress tracker
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    inner: Arc<Mutex<DownloadProgress>>,
}

impl ProgressTracker {
    /// Creates a new progress tracker
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DownloadProgress::new(total_bytes))),
        }
    }

    /// Updates progress
    pub fn update(&self, bytes: u64) {
        if let Ok(mut progress) = self.inner.lock() {
            progress.update(bytes);
        }
    }

    /// Gets current progress
    pub fn get(&self) -> Option<DownloadProgress> {
        self.inner.lock().ok().map(|p| p.clone())
    }

    /// Gets progress percentage
    pub fn percentage(&self) -> Option<f64> {
        self.inner.lock().ok().and_then(|p| p.percentage())
    }

    /// Checks if download is complete
    pub fn is_complete(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|p| p.is_complete())
            .unwrap_or(false)
    }
}
