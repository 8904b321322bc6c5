//! Rule engine implementation.

use gsi_core::{DashboardState, GamePhase, RawSnapshot};
use tracing::trace;

use crate::alerts::{
    buyback_status, hp_sustain_alert, mana_sustain_alert, teleport_alert, wand_alert,
};
use crate::clock::format_clock;
use crate::config::RulesConfig;
use crate::error::RulesResult;
use crate::strategy::StrategyTable;

const GOAL_MET_TEXT: &str = "BOTTLE SECURED! Buy it now!";
const PRE_GAME_TEXT: &str = "PREPARATION: check your items and rune positions!";
const NO_HERO_NAME: &str = "---";

/// Derives a `DashboardState` from a single snapshot.
///
/// Holds only configuration; evaluation has no side effects and no memory of
/// previous ticks.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: RulesConfig,
    strategies: StrategyTable,
}

impl RuleEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: RulesConfig) -> RulesResult<Self> {
        config.validate()?;
        let strategies = StrategyTable::new(config.strategies.clone())?;
        Ok(Self { config, strategies })
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn strategies(&self) -> &StrategyTable {
        &self.strategies
    }

    /// Evaluate one snapshot.
    ///
    /// Returns `None` while the match is still loading: there is nothing to
    /// show for that tick and callers must not broadcast a placeholder.
    pub fn evaluate(&self, snapshot: &RawSnapshot) -> Option<DashboardState> {
        let phase = snapshot.phase();
        if phase.is_loading() {
            trace!(%phase, "Match not loaded, no output this tick");
            return None;
        }

        let clock = snapshot.clock();
        let player = &snapshot.player;
        let hero = &snapshot.hero;
        let items = &snapshot.items;

        let (strategy_text, strategy_warn) = self.strategy(snapshot);
        let (buyback_status, buyback_missing) = buyback_status(player.gold, hero);

        let hero_name = if hero.name.is_empty() {
            NO_HERO_NAME.to_string()
        } else {
            hero.name.clone()
        };

        Some(DashboardState {
            hero_name,
            clock_time: clock,
            clock_display: format_clock(clock),
            strategy_text,
            strategy_warn,
            health_percent: hero.health_percent,
            mana_percent: hero.mana_percent,
            gold: player.gold,
            last_hits: player.last_hits,
            denies: player.denies,
            buyback_status,
            buyback_missing,
            gpm: player.gpm,
            kda: format!("{}/{}/{}", player.kills, player.deaths, player.assists),
            wand_alert: wand_alert(items, hero.health_percent, &self.config.wand),
            tp_alert: teleport_alert(clock, items, &self.config.teleport),
            hp_regen_alert: hp_sustain_alert(clock, items, &self.config.sustain),
            mana_regen_alert: mana_sustain_alert(clock, items, &self.config.sustain),
        })
    }

    /// Pick the strategy hint: early-economy goal, then pre-game reminder,
    /// then the timing table, then the fallback.
    fn strategy(&self, snapshot: &RawSnapshot) -> (String, bool) {
        let clock = snapshot.clock();
        let economy = &self.config.early_economy;

        if (0..=economy.window_end_secs).contains(&clock) {
            let gold_missing = economy.target_gold.saturating_sub(snapshot.player.gold);
            if gold_missing <= 0 {
                return (GOAL_MET_TEXT.to_string(), true);
            }
            let last_hits_missing =
                economy
                    .target_last_hits
                    .saturating_sub(snapshot.player.last_hits)
                    .max(0);
            return (
                format!(
                    "BOTTLE GOAL: {gold_missing} gold short (~{last_hits_missing} last hits)"
                ),
                false,
            );
        }

        if snapshot.phase() == GamePhase::PreGame {
            return (PRE_GAME_TEXT.to_string(), true);
        }

        match self.strategies.lookup(clock) {
            Some(window) => (window.message.clone(), window.warning),
            None => (self.config.fallback_text.clone(), false),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            config: RulesConfig::default(),
            strategies: StrategyTable::default(),
        }
    }
}
