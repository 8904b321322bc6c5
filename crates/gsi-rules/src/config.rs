//! Rule engine configuration.
//!
//! Every threshold has a serde default, so an empty `[rules]` section yields
//! the stock rule set.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::strategy::{default_windows, StrategyTable, StrategyWindow};

/// Configuration for the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Opening gold/last-hit goal.
    #[serde(default)]
    pub early_economy: EarlyEconomyConfig,
    /// Health and mana sustain alerts.
    #[serde(default)]
    pub sustain: SustainConfig,
    /// Wand readiness alert.
    #[serde(default)]
    pub wand: WandConfig,
    /// Teleport availability alert.
    #[serde(default)]
    pub teleport: TeleportConfig,
    /// Hint shown when no window matches.
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,
    /// Strategy windows in priority order.
    #[serde(default = "default_windows")]
    pub strategies: Vec<StrategyWindow>,
}

fn default_fallback_text() -> String {
    "Focus on farm / lane control".to_string()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            early_economy: EarlyEconomyConfig::default(),
            sustain: SustainConfig::default(),
            wand: WandConfig::default(),
            teleport: TeleportConfig::default(),
            fallback_text: default_fallback_text(),
            strategies: default_windows(),
        }
    }
}

impl RulesConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> RulesResult<()> {
        StrategyTable::new(self.strategies.clone())?;

        if self.sustain.mana_window_start_secs > self.sustain.mana_window_end_secs {
            return Err(RulesError::ConfigError(format!(
                "mana sustain window start ({}) must not exceed end ({})",
                self.sustain.mana_window_start_secs, self.sustain.mana_window_end_secs
            )));
        }

        let lists = [
            ("sustain.hp_items", &self.sustain.hp_items),
            ("sustain.mana_items", &self.sustain.mana_items),
            ("wand.families", &self.wand.families),
            ("teleport.substitutes", &self.teleport.substitutes),
        ];
        for (name, list) in lists {
            if list.iter().any(|s| s.is_empty()) {
                return Err(RulesError::ConfigError(format!(
                    "{name} contains an empty item name"
                )));
            }
        }

        if self.teleport.scroll.is_empty() {
            return Err(RulesError::ConfigError(
                "teleport.scroll must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Opening economy goal (enough gold for the first key item).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyEconomyConfig {
    /// Goal tracking applies while `0 <= clock <= window_end_secs`.
    #[serde(default = "default_early_window_end_secs")]
    pub window_end_secs: i32,
    #[serde(default = "default_target_gold")]
    pub target_gold: i32,
    #[serde(default = "default_target_last_hits")]
    pub target_last_hits: i32,
}

fn default_early_window_end_secs() -> i32 {
    80
}

fn default_target_gold() -> i32 {
    675 // Bottle
}

fn default_target_last_hits() -> i32 {
    6
}

impl Default for EarlyEconomyConfig {
    fn default() -> Self {
        Self {
            window_end_secs: default_early_window_end_secs(),
            target_gold: default_target_gold(),
            target_last_hits: default_target_last_hits(),
        }
    }
}

/// Sustain item alerts. Item names are matched by substring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainConfig {
    /// HP alert applies while `0 < clock < hp_window_end_secs`.
    #[serde(default = "default_sustain_window_end_secs")]
    pub hp_window_end_secs: i32,
    #[serde(default = "default_hp_items")]
    pub hp_items: Vec<String>,
    /// Mana alert applies while `mana_window_start_secs <= clock < mana_window_end_secs`.
    #[serde(default = "default_mana_window_start_secs")]
    pub mana_window_start_secs: i32,
    #[serde(default = "default_sustain_window_end_secs")]
    pub mana_window_end_secs: i32,
    #[serde(default = "default_mana_items")]
    pub mana_items: Vec<String>,
}

fn default_sustain_window_end_secs() -> i32 {
    300
}

fn default_mana_window_start_secs() -> i32 {
    120
}

fn default_hp_items() -> Vec<String> {
    vec![
        "item_bottle".to_string(),
        "item_flask".to_string(), // Healing Salve
        "item_tango".to_string(),
    ]
}

fn default_mana_items() -> Vec<String> {
    vec![
        "item_bottle".to_string(),
        "item_enchanted_mango".to_string(),
        "item_clarity".to_string(),
    ]
}

impl Default for SustainConfig {
    fn default() -> Self {
        Self {
            hp_window_end_secs: default_sustain_window_end_secs(),
            hp_items: default_hp_items(),
            mana_window_start_secs: default_mana_window_start_secs(),
            mana_window_end_secs: default_sustain_window_end_secs(),
            mana_items: default_mana_items(),
        }
    }
}

/// Charge-based wand alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WandConfig {
    /// Item family substrings.
    #[serde(default = "default_wand_families")]
    pub families: Vec<String>,
    #[serde(default = "default_wand_min_charges")]
    pub min_charges: i32,
    /// Alert only while health percent is strictly below this value.
    #[serde(default = "default_wand_health_percent_below")]
    pub health_percent_below: i32,
}

fn default_wand_families() -> Vec<String> {
    vec!["magic_wand".to_string(), "magic_stick".to_string()]
}

fn default_wand_min_charges() -> i32 {
    10
}

fn default_wand_health_percent_below() -> i32 {
    40
}

impl Default for WandConfig {
    fn default() -> Self {
        Self {
            families: default_wand_families(),
            min_charges: default_wand_min_charges(),
            health_percent_below: default_wand_health_percent_below(),
        }
    }
}

/// Teleport availability alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeleportConfig {
    /// Exact item name expected in the dedicated teleport slot.
    #[serde(default = "default_teleport_scroll")]
    pub scroll: String,
    /// Equipment granting teleport, matched by substring in the generic slots.
    #[serde(default = "default_teleport_substitutes")]
    pub substitutes: Vec<String>,
}

fn default_teleport_scroll() -> String {
    "item_tpscroll".to_string()
}

fn default_teleport_substitutes() -> Vec<String> {
    vec!["item_travel_boots".to_string()]
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self {
            scroll: default_teleport_scroll(),
            substitutes: default_teleport_substitutes(),
        }
    }
}
