//! Core domain types for the game-state coaching pipeline.
//!
//! This crate provides the two schemas every other crate speaks:
//! - `RawSnapshot`: one tick of game state as pushed by the game client
//! - `DashboardState`: the advisory state derived from one snapshot
//! - `GamePhase`, `BuybackStatus`: the enums both schemas rely on

pub mod dashboard;
pub mod error;
pub mod snapshot;

pub use dashboard::{BuybackStatus, DashboardState};
pub use error::{CoreError, Result};
pub use snapshot::{GamePhase, HeroVitals, Item, ItemSlots, MapState, PlayerStats, RawSnapshot};
