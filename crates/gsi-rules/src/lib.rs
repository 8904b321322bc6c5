//! Rule engine for the game-state coaching pipeline.
//!
//! Turns one `RawSnapshot` into one `DashboardState`:
//! - Timing-window strategy hints (first-match table scan)
//! - Early-economy goal tracking
//! - Health/mana sustain alerts
//! - Buyback affordability
//! - Wand readiness and teleport availability alerts
//!
//! The engine is a pure mapping with no cross-tick state.

pub mod alerts;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod strategy;

pub use clock::format_clock;
pub use config::{EarlyEconomyConfig, RulesConfig, SustainConfig, TeleportConfig, WandConfig};
pub use engine::RuleEngine;
pub use error::{RulesError, RulesResult};
pub use strategy::{default_windows, StrategyTable, StrategyWindow};
