//! Timing-window strategy table.
//!
//! A hand-authored, ordered list of `[start, end]` windows (inclusive, in
//! match seconds). Windows may overlap; lookup is a linear scan and the
//! first window containing the clock wins.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// A single strategy hint active between two match times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyWindow {
    /// First second the hint applies (inclusive).
    pub start_secs: i32,
    /// Last second the hint applies (inclusive).
    pub end_secs: i32,
    /// Hint shown to the player.
    pub message: String,
    /// Whether the hint is rendered as a warning.
    #[serde(default)]
    pub warning: bool,
}

impl StrategyWindow {
    pub fn new(start_secs: i32, end_secs: i32, message: impl Into<String>, warning: bool) -> Self {
        Self {
            start_secs,
            end_secs,
            message: message.into(),
            warning,
        }
    }

    /// Check whether the window contains the clock (both bounds inclusive).
    pub fn contains(&self, clock: i32) -> bool {
        (self.start_secs..=self.end_secs).contains(&clock)
    }
}

/// Immutable, validated strategy table.
#[derive(Debug, Clone)]
pub struct StrategyTable {
    windows: Vec<StrategyWindow>,
}

impl StrategyTable {
    /// Build a table, rejecting windows that end before they start.
    pub fn new(windows: Vec<StrategyWindow>) -> RulesResult<Self> {
        for (index, window) in windows.iter().enumerate() {
            if window.start_secs > window.end_secs {
                return Err(RulesError::InvalidWindow {
                    index,
                    start: window.start_secs,
                    end: window.end_secs,
                });
            }
        }
        Ok(Self { windows })
    }

    /// First window (in table order) containing the clock.
    pub fn lookup(&self, clock: i32) -> Option<&StrategyWindow> {
        self.windows.iter().find(|w| w.contains(clock))
    }

    pub fn windows(&self) -> &[StrategyWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self {
            windows: default_windows(),
        }
    }
}

/// Built-in table covering the first twenty minutes of a match.
pub fn default_windows() -> Vec<StrategyWindow> {
    vec![
        // Early game
        StrategyWindow::new(100, 125, "ALERT: Water rune (min 2)", true),
        StrategyWindow::new(165, 195, "IMPORTANT: Bounty rune + watcher (min 3)", true),
        StrategyWindow::new(230, 245, "ALERT: Water rune (min 4)", true),
        StrategyWindow::new(250, 300, "TACTIC: Stack the triangle camp (min 5)", true),
        StrategyWindow::new(
            310,
            360,
            "ALL-IN: Kill mid (with support) -> push with catapult -> rune (6:00)",
            true,
        ),
        StrategyWindow::new(390, 450, "ALERT: Wisdom shrine (min 7), don't lose the XP!", true),
        StrategyWindow::new(450, 490, "TACTIC: Prepare for power rune (8:00) + watcher", false),
        StrategyWindow::new(530, 550, "ALERT: Bounty rune (min 9)", false),
        StrategyWindow::new(590, 630, "ALERT: Power rune (min 10) + catapult", true),
        // Mid game transition
        StrategyWindow::new(
            630,
            720,
            "MACRO: Defend mid T1! Push waves and rotate to the safe lane.",
            false,
        ),
        StrategyWindow::new(
            810,
            855,
            "CRITICAL: Wisdom rune (min 14)! Steal the enemy one if you can.",
            true,
        ),
        StrategyWindow::new(880, 915, "ALERT: Bounty rune (min 15)", false),
        StrategyWindow::new(
            960,
            1140,
            "DECISION: Core item (Blink/BKB) done? YES: smoke and fight | NO: farm!",
            false,
        ),
        StrategyWindow::new(
            1170,
            1230,
            "OBJECTIVE: Tormentor (min 20) = free shard! Call the team.",
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let table = StrategyTable::default();
        for window in table.windows() {
            let start_hit = table.lookup(window.start_secs).unwrap();
            let end_hit = table.lookup(window.end_secs).unwrap();
            // An earlier overlapping window may shadow the bound, but the
            // bound itself is never a miss
            assert!(start_hit.contains(window.start_secs));
            assert!(end_hit.contains(window.end_secs));
        }
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let table = StrategyTable::default();
        // 450 is the end of the shrine window and the start of the power-rune prep window
        assert_eq!(table.lookup(450).unwrap().start_secs, 390);
        assert_eq!(table.lookup(451).unwrap().start_secs, 450);
        // 630 closes the power-rune window and opens the defend window
        assert_eq!(table.lookup(630).unwrap().start_secs, 590);
        assert_eq!(table.lookup(631).unwrap().start_secs, 630);
    }

    #[test]
    fn test_gap_misses() {
        let table = StrategyTable::default();
        assert!(table.lookup(99).is_none());
        assert!(table.lookup(126).is_none());
        assert!(table.lookup(1231).is_none());
        assert!(table.lookup(-30).is_none());
    }

    #[test]
    fn test_source_order_not_best_fit() {
        let table = StrategyTable::new(vec![
            StrategyWindow::new(0, 1000, "wide", false),
            StrategyWindow::new(500, 510, "narrow", true),
        ])
        .unwrap();
        assert_eq!(table.lookup(505).unwrap().message, "wide");
    }

    #[test]
    fn test_rejects_inverted_window() {
        let result = StrategyTable::new(vec![
            StrategyWindow::new(10, 20, "ok", false),
            StrategyWindow::new(50, 40, "broken", false),
        ]);
        match result {
            Err(RulesError::InvalidWindow { index, start, end }) => {
                assert_eq!((index, start, end), (1, 50, 40));
            }
            other => panic!("expected InvalidWindow, got {other:?}"),
        }
    }

    #[test]
    fn test_single_second_window() {
        let table = StrategyTable::new(vec![StrategyWindow::new(42, 42, "now", true)]).unwrap();
        assert!(table.lookup(41).is_none());
        assert!(table.lookup(42).is_some());
        assert!(table.lookup(43).is_none());
    }
}
