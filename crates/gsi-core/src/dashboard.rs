//! Derived dashboard state.
//!
//! These types are serialized as JSON and pushed to every viewer. Field names
//! are the wire contract with the viewer UI.

use serde::{Deserialize, Serialize};

/// Advisory state derived from one snapshot.
///
/// Built fresh each tick; only `clock_time` is meaningful for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Hero name (`"---"` before a hero is picked).
    pub hero_name: String,
    /// Match clock in seconds.
    pub clock_time: i32,
    /// Clock formatted as `MM:SS`.
    pub clock_display: String,
    /// Active strategy hint.
    pub strategy_text: String,
    /// Whether the strategy hint is a warning.
    pub strategy_warn: bool,
    pub health_percent: i32,
    pub mana_percent: i32,
    pub gold: i32,
    pub last_hits: i32,
    pub denies: i32,
    /// Buyback affordability.
    pub buyback_status: BuybackStatus,
    /// Gold missing for buyback (0 unless `NO_GOLD`).
    pub buyback_missing: i32,
    pub gpm: i32,
    /// `kills/deaths/assists`.
    pub kda: String,
    /// Charged wand while low on health.
    pub wand_alert: bool,
    /// No teleport available.
    pub tp_alert: bool,
    /// No health sustain item in the early game.
    pub hp_regen_alert: bool,
    /// No mana sustain item in the early game.
    pub mana_regen_alert: bool,
}

/// Buyback affordability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuybackStatus {
    /// Buyback available (or not yet priced).
    #[serde(rename = "READY")]
    Ready,
    /// Buyback used recently.
    #[serde(rename = "COOLDOWN")]
    Cooldown,
    /// Not enough gold.
    #[serde(rename = "NO_GOLD")]
    InsufficientFunds,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> DashboardState {
        DashboardState {
            hero_name: "npc_dota_hero_puck".to_string(),
            clock_time: 610,
            clock_display: "10:10".to_string(),
            strategy_text: "Power rune".to_string(),
            strategy_warn: true,
            health_percent: 25,
            mana_percent: 80,
            gold: 200,
            last_hits: 58,
            denies: 9,
            buyback_status: BuybackStatus::InsufficientFunds,
            buyback_missing: 300,
            gpm: 410,
            kda: "3/1/7".to_string(),
            wand_alert: true,
            tp_alert: true,
            hp_regen_alert: false,
            mana_regen_alert: false,
        }
    }

    #[test]
    fn test_state_wire_field_names() {
        let json = serde_json::to_value(sample_state()).unwrap();
        let obj = json.as_object().unwrap();

        for field in [
            "hero_name",
            "clock_time",
            "clock_display",
            "strategy_text",
            "strategy_warn",
            "health_percent",
            "mana_percent",
            "gold",
            "last_hits",
            "denies",
            "buyback_status",
            "buyback_missing",
            "gpm",
            "kda",
            "wand_alert",
            "tp_alert",
            "hp_regen_alert",
            "mana_regen_alert",
        ] {
            assert!(obj.contains_key(field), "missing field {field}");
        }
        assert_eq!(obj.len(), 18);
        assert_eq!(json["buyback_status"], "NO_GOLD");
    }

    #[test]
    fn test_buyback_status_strings() {
        assert_eq!(
            serde_json::to_string(&BuybackStatus::Ready).unwrap(),
            "\"READY\""
        );
        assert_eq!(
            serde_json::to_string(&BuybackStatus::Cooldown).unwrap(),
            "\"COOLDOWN\""
        );
    }
}
