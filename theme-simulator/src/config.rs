use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub min_action_interval_secs: u64,
    pub max_action_interval_secs: u64,
    pub switch_weight: u32,
    pub customize_weight: u32,
    pub reset_weight: u32,
    pub refresh_weight: u32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub stats_update_interval_secs: u64,
    pub show_snapshot_details: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_action_interval_secs: 3,
            max_action_interval_secs: 15,
            switch_weight: 3,
            customize_weight: 3,
            reset_weight: 1,
            refresh_weight: 3,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            stats_update_interval_secs: 60,
            show_snapshot_details: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match std::fs::read_to_string("config.toml") {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                println!("ℹ️  No config.toml found, using simulator defaults");
                Config::default()
            }
            Err(e) => return Err(e.into()),
        };

        // Allow environment variable overrides
        if let Ok(min_interval) = env::var("SIMULATOR_MIN_INTERVAL_SECS") {
            config.session.min_action_interval_secs = min_interval
                .parse()
                .unwrap_or(config.session.min_action_interval_secs);
        }
        if let Ok(max_interval) = env::var("SIMULATOR_MAX_INTERVAL_SECS") {
            config.session.max_action_interval_secs = max_interval
                .parse()
                .unwrap_or(config.session.max_action_interval_secs);
        }
        if let Ok(stats_interval) = env::var("SIMULATOR_STATS_INTERVAL_SECS") {
            config.display.stats_update_interval_secs = stats_interval
                .parse()
                .unwrap_or(config.display.stats_update_interval_secs);
        }

        if config.session.min_action_interval_secs > config.session.max_action_interval_secs {
            return Err(format!(
                "min_action_interval_secs ({}) exceeds max_action_interval_secs ({})",
                config.session.min_action_interval_secs, config.session.max_action_interval_secs
            )
            .into());
        }

        Ok(config)
    }
}
