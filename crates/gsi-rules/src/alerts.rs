//! Alert predicates over a single snapshot.
//!
//! Item checks use substring containment on the item name so upgraded or
//! charged variants sharing a base name still match.

use gsi_core::{BuybackStatus, HeroVitals, ItemSlots};

use crate::config::{SustainConfig, TeleportConfig, WandConfig};

/// Check whether any generic slot holds one of the target items.
pub fn has_any_item(items: &ItemSlots, targets: &[String]) -> bool {
    items
        .inventory()
        .iter()
        .filter(|slot| !slot.is_empty())
        .any(|slot| {
            targets
                .iter()
                .any(|target| !target.is_empty() && slot.name.contains(target.as_str()))
        })
}

/// No health sustain item during the laning opening.
pub fn hp_sustain_alert(clock: i32, items: &ItemSlots, config: &SustainConfig) -> bool {
    clock > 0 && clock < config.hp_window_end_secs && !has_any_item(items, &config.hp_items)
}

/// No mana sustain item during the laning opening.
pub fn mana_sustain_alert(clock: i32, items: &ItemSlots, config: &SustainConfig) -> bool {
    (config.mana_window_start_secs..config.mana_window_end_secs).contains(&clock)
        && !has_any_item(items, &config.mana_items)
}

/// Buyback status and shortfall.
///
/// A zero cost (not yet priced) is always ready. While on cooldown the
/// shortfall is not computed and reported as 0.
pub fn buyback_status(gold: i32, hero: &HeroVitals) -> (BuybackStatus, i32) {
    if hero.buyback_cost == 0 {
        return (BuybackStatus::Ready, 0);
    }

    if hero.buyback_cooldown > 0 {
        (BuybackStatus::Cooldown, 0)
    } else if gold < hero.buyback_cost {
        // Saturates on out-of-range payload values
        (
            BuybackStatus::InsufficientFunds,
            hero.buyback_cost.saturating_sub(gold),
        )
    } else {
        (BuybackStatus::Ready, 0)
    }
}

/// A charged wand is available while health is low.
pub fn wand_alert(items: &ItemSlots, health_percent: i32, config: &WandConfig) -> bool {
    if health_percent >= config.health_percent_below {
        return false;
    }
    items.inventory().iter().any(|slot| {
        slot.charges >= config.min_charges
            && config
                .families
                .iter()
                .any(|family| !family.is_empty() && slot.name.contains(family.as_str()))
    })
}

/// No teleport scroll in the teleport slot and no teleport-granting equipment.
pub fn teleport_alert(clock: i32, items: &ItemSlots, config: &TeleportConfig) -> bool {
    if clock <= 0 {
        return false;
    }
    let has_scroll = items.teleport.name == config.scroll;
    !has_scroll && !has_any_item(items, &config.substitutes)
}
