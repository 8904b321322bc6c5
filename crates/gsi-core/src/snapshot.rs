//! Raw game-state snapshot as pushed by the game client.
//!
//! The client posts one JSON document per tick. Sections are omitted early
//! in a match (no hero before picks, no items before the horn), so every
//! section and field falls back to its zero value.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One tick of game state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    pub map: MapState,
    pub player: PlayerStats,
    pub hero: HeroVitals,
    pub items: ItemSlots,
}

impl RawSnapshot {
    /// Decode a snapshot from the raw bytes taken off the queue.
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Match clock in seconds (negative during the pre-game countdown).
    pub fn clock(&self) -> i32 {
        self.map.clock_time
    }

    /// Current game phase.
    pub fn phase(&self) -> GamePhase {
        self.map.game_state
    }
}

/// Match clock and phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapState {
    pub clock_time: i32,
    pub game_state: GamePhase,
}

/// Player economy and score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub name: String,
    pub gold: i32,
    pub gpm: i32,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub last_hits: i32,
    pub denies: i32,
}

/// Hero vitals and buyback state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroVitals {
    pub name: String,
    pub level: i32,
    pub alive: bool,
    pub health: i32,
    pub max_health: i32,
    pub health_percent: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub mana_percent: i32,
    pub buyback_cost: i32,
    pub buyback_cooldown: i32,
}

/// Inventory: six generic slots plus the dedicated teleport slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSlots {
    pub slot0: Item,
    pub slot1: Item,
    pub slot2: Item,
    pub slot3: Item,
    pub slot4: Item,
    pub slot5: Item,
    #[serde(rename = "teleport0")]
    pub teleport: Item,
}

impl ItemSlots {
    /// Generic inventory slots in slot order. The teleport slot is excluded.
    pub fn inventory(&self) -> [&Item; 6] {
        [
            &self.slot0,
            &self.slot1,
            &self.slot2,
            &self.slot3,
            &self.slot4,
            &self.slot5,
        ]
    }

    /// Mutable access to a generic slot by index (0..6).
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Item> {
        match index {
            0 => Some(&mut self.slot0),
            1 => Some(&mut self.slot1),
            2 => Some(&mut self.slot2),
            3 => Some(&mut self.slot3),
            4 => Some(&mut self.slot4),
            5 => Some(&mut self.slot5),
            _ => None,
        }
    }
}

/// A single item slot. An empty name means nothing is equipped; the client
/// also reports vacant slots as `"empty"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name: String,
    pub charges: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, charges: i32) -> Self {
        Self {
            name: name.into(),
            charges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() || self.name == "empty"
    }
}

/// Game phase as reported by the client (`DOTA_GAMERULES_STATE_*`).
///
/// Unrecognised strings decode to `Unknown` so a client update never turns
/// every tick into a malformed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GamePhase {
    Init,
    WaitForPlayersToLoad,
    HeroSelection,
    StrategyTime,
    TeamShowcase,
    WaitForMapToLoad,
    PreGame,
    GameInProgress,
    PostGame,
    Disconnect,
    #[default]
    Unknown,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "DOTA_GAMERULES_STATE_INIT",
            Self::WaitForPlayersToLoad => "DOTA_GAMERULES_STATE_WAIT_FOR_PLAYERS_TO_LOAD",
            Self::HeroSelection => "DOTA_GAMERULES_STATE_HERO_SELECTION",
            Self::StrategyTime => "DOTA_GAMERULES_STATE_STRATEGY_TIME",
            Self::TeamShowcase => "DOTA_GAMERULES_STATE_TEAM_SHOWCASE",
            Self::WaitForMapToLoad => "DOTA_GAMERULES_STATE_WAIT_FOR_MAP_TO_LOAD",
            Self::PreGame => "DOTA_GAMERULES_STATE_PRE_GAME",
            Self::GameInProgress => "DOTA_GAMERULES_STATE_GAME_IN_PROGRESS",
            Self::PostGame => "DOTA_GAMERULES_STATE_POST_GAME",
            Self::Disconnect => "DOTA_GAMERULES_STATE_DISCONNECT",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Phases before the match has loaded; no advisory state is produced.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Init | Self::WaitForPlayersToLoad)
    }
}

impl From<String> for GamePhase {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DOTA_GAMERULES_STATE_INIT" => Self::Init,
            "DOTA_GAMERULES_STATE_WAIT_FOR_PLAYERS_TO_LOAD" => Self::WaitForPlayersToLoad,
            "DOTA_GAMERULES_STATE_HERO_SELECTION" => Self::HeroSelection,
            "DOTA_GAMERULES_STATE_STRATEGY_TIME" => Self::StrategyTime,
            "DOTA_GAMERULES_STATE_TEAM_SHOWCASE" => Self::TeamShowcase,
            "DOTA_GAMERULES_STATE_WAIT_FOR_MAP_TO_LOAD" => Self::WaitForMapToLoad,
            "DOTA_GAMERULES_STATE_PRE_GAME" => Self::PreGame,
            "DOTA_GAMERULES_STATE_GAME_IN_PROGRESS" => Self::GameInProgress,
            "DOTA_GAMERULES_STATE_POST_GAME" => Self::PostGame,
            "DOTA_GAMERULES_STATE_DISCONNECT" => Self::Disconnect,
            _ => Self::Unknown,
        }
    }
}

impl From<GamePhase> for String {
    fn from(phase: GamePhase) -> Self {
        phase.as_str().to_string()
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
