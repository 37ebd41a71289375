//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKPILE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stockpile_core::{LaneQuantityRule, DEFAULT_EXPORT_FILE};
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Storage directory override.
    /// Default: none (platform data directory)
    pub data_dir: Option<PathBuf>,

    /// Pause between a card entering Animating and the status commit.
    pub enter_delay_ms: u64,

    /// Pause between the status commit and the card returning to Idle.
    pub settle_delay_ms: u64,

    /// File name used by export when no path is given
    pub export_file: String,

    /// Quantity adjustment applied when a card changes lane
    pub lane_quantity_rule: LaneQuantityRule,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Data dir: platform default
    /// - Delays: 100ms enter, 300ms settle
    /// - Export file: `inventory.json`
    /// - Lane rule: preserve quantity
    fn default() -> Self {
        ConfigState {
            data_dir: None,
            enter_delay_ms: 100,
            settle_delay_ms: 300,
            export_file: DEFAULT_EXPORT_FILE.to_string(),
            lane_quantity_rule: LaneQuantityRule::Preserve,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKPILE_DATA_DIR`: Storage directory
    /// - `STOCKPILE_ENTER_DELAY_MS`: Enter delay in milliseconds
    /// - `STOCKPILE_SETTLE_DELAY_MS`: Settle delay in milliseconds
    /// - `STOCKPILE_EXPORT_FILE`: Default export file name
    /// - `STOCKPILE_ZERO_OUT_OF_STOCK`: `1`/`true` zeroes quantity on moves
    ///   into Out of Stock
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    ///
    /// Unparseable values are logged and the default kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(dir) = lookup("STOCKPILE_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup("STOCKPILE_ENTER_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.enter_delay_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid STOCKPILE_ENTER_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("STOCKPILE_SETTLE_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.settle_delay_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid STOCKPILE_SETTLE_DELAY_MS"),
            }
        }

        if let Some(file) = lookup("STOCKPILE_EXPORT_FILE").filter(|f| !f.trim().is_empty()) {
            config.export_file = file;
        }

        if let Some(raw) = lookup("STOCKPILE_ZERO_OUT_OF_STOCK") {
            match parse_flag(&raw) {
                Some(true) => config.lane_quantity_rule = LaneQuantityRule::ZeroOutOfStock,
                Some(false) => config.lane_quantity_rule = LaneQuantityRule::Preserve,
                None => warn!(value = %raw, "Ignoring invalid STOCKPILE_ZERO_OUT_OF_STOCK"),
            }
        }

        config
    }

    pub fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.enter_delay(), Duration::from_millis(100));
        assert_eq!(config.settle_delay(), Duration::from_millis(300));
        assert_eq!(config.export_file, "inventory.json");
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("STOCKPILE_DATA_DIR", "/tmp/stockpile"),
            ("STOCKPILE_ENTER_DELAY_MS", "0"),
            ("STOCKPILE_SETTLE_DELAY_MS", " 50 "),
            ("STOCKPILE_EXPORT_FILE", "backup.json"),
            ("STOCKPILE_ZERO_OUT_OF_STOCK", "true"),
        ]));

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/stockpile")));
        assert_eq!(config.enter_delay_ms, 0);
        assert_eq!(config.settle_delay_ms, 50);
        assert_eq!(config.export_file, "backup.json");
        assert_eq!(config.lane_quantity_rule, LaneQuantityRule::ZeroOutOfStock);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ConfigState::from_lookup(lookup(&[
            ("STOCKPILE_ENTER_DELAY_MS", "fast"),
            ("STOCKPILE_SETTLE_DELAY_MS", "-1"),
            ("STOCKPILE_ZERO_OUT_OF_STOCK", "sometimes"),
            ("STOCKPILE_DATA_DIR", "  "),
        ]));
        assert_eq!(config, ConfigState::default());
    }
}
