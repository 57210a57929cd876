//! HTTP identification and timeout settings

use crate::check::{Checker, Section};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings applied to every outgoing request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// User-Agent header sent to every catalog
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub max_redirects: usize,
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: "book-downloader/2.0".to_string(),
            timeout_secs: 30,
            max_redirects: 10,
        }
    }
}

impl Section for NetworkConfig {
    const NAME: &'static str = "network";

    fn check(&self, checker: &mut Checker<'_>) {
        checker.filled("user_agent", &self.user_agent);
        checker.range("timeout_secs", self.timeout_secs, 1..=600);
        checker.range("max_redirects", self.max_redirects, 0..=50);
    }
}
