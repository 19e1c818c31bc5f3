/// Library statistics
use super::game::GameStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entry counts grouped by status and platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    /// Number of entries; always the sum of `by_status`
    pub total: u64,
    /// Every status, including those with no entries
    pub by_status: BTreeMap<GameStatus, u64>,
    /// Entries per platform name; an entry counts once for each platform it lists
    pub by_platform: BTreeMap<String, u64>,
}

impl LibraryStats {
    /// Build stats from grouped counts
    pub fn from_counts(
        status_counts: impl IntoIterator<Item = (GameStatus, u64)>,
        platform_counts: impl IntoIterator<Item = (String, u64)>,
    ) -> Self {
        let mut by_status: BTreeMap<GameStatus, u64> =
            GameStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for (status, count) in status_counts {
            *by_status.entry(status).or_default() += count;
        }

        let mut by_platform = BTreeMap::new();
        for (platform, count) in platform_counts {
            *by_platform.entry(platform).or_default() += count;
        }

        Self {
            total: by_status.values().sum(),
            by_status,
            by_platform,
        }
    }

    /// Count for a single status
    pub fn count(&self, status: GameStatus) -> u64 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

impl Default for LibraryStats {
    fn default() -> Self {
        Self::from_counts(Vec::new(), Vec::new())
    }
}
