use log::LevelFilter;
use serde::Deserialize;

use crate::hand::BLACKJACK;

fn default_dealer_stands_on() -> u32 {
    17
}

fn default_dealer_tick_ms() -> u32 {
    1_000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TableConfig {
    #[serde(default = "default_dealer_stands_on")]
    pub dealer_stands_on: u32,
    #[serde(default = "default_dealer_tick_ms")]
    pub dealer_tick_ms: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            dealer_stands_on: default_dealer_stands_on(),
            dealer_tick_ms: default_dealer_tick_ms(),
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl TableConfig {
    pub fn normalized(mut self) -> Self {
        self.dealer_stands_on = self.dealer_stands_on.clamp(2, BLACKJACK);
        self.dealer_tick_ms = self.dealer_tick_ms.max(1);
        self
    }

    /// Unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: TableConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.dealer_stands_on, 17);
        assert_eq!(config.dealer_tick_ms, 1_000);
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn normalizes_out_of_range_values() {
        let config: TableConfig =
            serde_json::from_str(r#"{"dealer_stands_on": 40, "dealer_tick_ms": 0, "seed": 9}"#).unwrap();
        let config = config.normalized();
        assert_eq!(config.dealer_stands_on, 21);
        assert_eq!(config.dealer_tick_ms, 1);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        let config = TableConfig {
            log_level: "DEBUG".to_string(),
            ..TableConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Debug);

        let config = TableConfig {
            log_level: "chatty".to_string(),
            ..TableConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
