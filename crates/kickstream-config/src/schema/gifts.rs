//! Gift classification and heart-tap settings.

use serde::{Deserialize, Serialize};

/// Alias lists used to classify incoming gift names.
///
/// Matching is case-insensitive and substring-tolerant, so `"Rose"` also
/// matches `"Red Rose"`. Rose aliases are checked before perfume aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftsConfig {
    pub rose_aliases: Vec<String>,
    pub perfume_aliases: Vec<String>,
}

impl Default for GiftsConfig {
    fn default() -> Self {
        Self {
            rose_aliases: vec!["Rose".into(), "Hoa hồng".into()],
            perfume_aliases: vec!["Perfume".into(), "Nước hoa".into()],
        }
    }
}

/// Heart-tap accumulator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartsConfig {
    /// Taps collected before a winner is drawn (valid range: 1-10000).
    pub capacity: u32,
}

impl Default for HeartsConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}
