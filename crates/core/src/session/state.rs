use serde::{Deserialize, Serialize};

use crate::{
    config::DEFAULT_UPGRADE_COST,
    models::{Building, BuildingId, Cookie, CookieId, PlayerStats, ShopItemId},
};

/// Everything the economy rules can read or change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingdomState {
    pub stats: PlayerStats,
    pub buildings: Vec<Building>,
    pub cookies: Vec<Cookie>,
}

impl KingdomState {
    pub fn building(&self, id: &BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|building| &building.id == id)
    }
}

/// Constants the transition rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyRules {
    /// Gold spent per building upgrade, regardless of building or level.
    pub upgrade_cost: u64,
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self {
            upgrade_cost: DEFAULT_UPGRADE_COST,
        }
    }
}

/// A user request forwarded by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    UpgradeBuilding(BuildingId),
    AcquireCookie(CookieId),
    BuyShopItem(ShopItemId),
    StartAdventure,
}

/// Affordances that exist in the UI but have no rules behind them yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InertAction {
    AcquireCookie(CookieId),
    BuyShopItem(ShopItemId),
    StartAdventure,
}

/// What an intent did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The building gained one level and the upgrade cost was paid.
    Upgraded {
        building: BuildingId,
        level: u32,
        gold: u64,
    },
    /// Not enough gold; nothing changed.
    InsufficientGold { required: u64, available: u64 },
    /// No building carries this id; nothing changed.
    UnknownBuilding(BuildingId),
    /// The building is already at the largest representable level; nothing changed.
    LevelOverflow(BuildingId),
    /// The intent has no effect in the current rules.
    Inert(InertAction),
}

impl Outcome {
    /// Whether the state differs from before the intent.
    pub fn changed_state(&self) -> bool {
        matches!(self, Outcome::Upgraded { .. })
    }
}

/// Apply one intent to `state`, returning the next state and what happened.
///
/// Every branch other than a successful upgrade hands `state` back untouched.
pub fn reduce(state: KingdomState, intent: &Intent, rules: &EconomyRules) -> (KingdomState, Outcome) {
    match intent {
        Intent::UpgradeBuilding(id) => upgrade_building(state, id, rules),
        Intent::AcquireCookie(id) => (state, Outcome::Inert(InertAction::AcquireCookie(id.clone()))),
        Intent::BuyShopItem(id) => (state, Outcome::Inert(InertAction::BuyShopItem(id.clone()))),
        Intent::StartAdventure => (state, Outcome::Inert(InertAction::StartAdventure)),
    }
}

/// Raise a building by one level for a flat gold cost.
pub fn upgrade_building(
    mut state: KingdomState,
    id: &BuildingId,
    rules: &EconomyRules,
) -> (KingdomState, Outcome) {
    let Some(index) = state.buildings.iter().position(|building| &building.id == id) else {
        return (state, Outcome::UnknownBuilding(id.clone()));
    };

    let Some(gold) = state.stats.gold.checked_sub(rules.upgrade_cost) else {
        let available = state.stats.gold;
        return (
            state,
            Outcome::InsufficientGold {
                required: rules.upgrade_cost,
                available,
            },
        );
    };

    let Some(level) = state.buildings[index].level.checked_add(1) else {
        return (state, Outcome::LevelOverflow(id.clone()));
    };

    state.buildings[index].level = level;
    state.stats.gold = gold;
    (
        state,
        Outcome::Upgraded {
            building: id.clone(),
            level,
            gold,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::StartingConfig, seed};

    fn seeded(gold: u64) -> KingdomState {
        let mut stats = seed::starting_stats(&StartingConfig::default());
        stats.gold = gold;
        KingdomState {
            stats,
            buildings: seed::starting_buildings(),
            cookies: seed::starting_cookies(),
        }
    }

    fn upgrade(state: KingdomState, id: &str) -> (KingdomState, Outcome) {
        reduce(
            state,
            &Intent::UpgradeBuilding(BuildingId::new(id)),
            &EconomyRules::default(),
        )
    }

    #[test]
    fn upgrade_spends_gold_and_raises_only_target() {
        for id in ["1", "2", "3"] {
            let before = seeded(5000);
            let (after, outcome) = upgrade(before.clone(), id);

            assert!(outcome.changed_state());
            assert_eq!(after.stats.gold, 4000);
            assert_eq!(
                PlayerStats { gold: 5000, ..after.stats.clone() },
                before.stats
            );
            assert_eq!(after.cookies, before.cookies);
            for (old, new) in before.buildings.iter().zip(&after.buildings) {
                if old.id.as_str() == id {
                    assert_eq!(new.level, old.level + 1);
                    assert_eq!(Building { level: old.level, ..new.clone() }, *old);
                } else {
                    assert_eq!(new, old);
                }
            }
        }
    }

    #[test]
    fn three_castle_upgrades_from_five_thousand() {
        let mut state = seeded(5000);
        let initial = state.clone();
        for _ in 0..3 {
            let (next, outcome) = upgrade(state, "1");
            assert!(matches!(outcome, Outcome::Upgraded { .. }));
            state = next;
        }

        assert_eq!(state.stats.gold, 2000);
        assert_eq!(state.building(&BuildingId::new("1")).map(|b| b.level), Some(6));
        assert_eq!(state.buildings[1..], initial.buildings[1..]);
        assert_eq!(state.cookies, initial.cookies);
    }

    #[test]
    fn insufficient_gold_leaves_state_untouched() {
        let before = seeded(500);
        let (after, outcome) = upgrade(before.clone(), "2");

        assert_eq!(after, before);
        assert_eq!(
            outcome,
            Outcome::InsufficientGold {
                required: 1000,
                available: 500
            }
        );
        assert_eq!(after.building(&BuildingId::new("2")).map(|b| b.level), Some(2));
    }

    #[test]
    fn short_of_cost_leaves_every_building_untouched() {
        for gold in [0, 999] {
            for building in seed::starting_buildings() {
                let before = seeded(gold);
                let (after, outcome) = upgrade(before.clone(), building.id.as_str());
                assert_eq!(after, before);
                assert_eq!(
                    outcome,
                    Outcome::InsufficientGold {
                        required: DEFAULT_UPGRADE_COST,
                        available: gold
                    }
                );
            }
        }
    }

    #[test]
    fn default_rules_match_default_config() {
        assert_eq!(EconomyRules::default().upgrade_cost, DEFAULT_UPGRADE_COST);
        assert_eq!(
            crate::config::EconomyConfig::default().upgrade_cost,
            DEFAULT_UPGRADE_COST
        );
    }

    #[test]
    fn exact_cost_is_affordable() {
        let (after, outcome) = upgrade(seeded(1000), "3");
        assert_eq!(after.stats.gold, 0);
        assert_eq!(
            outcome,
            Outcome::Upgraded {
                building: BuildingId::new("3"),
                level: 2,
                gold: 0
            }
        );

        let (again, outcome) = upgrade(after.clone(), "3");
        assert_eq!(again, after);
        assert!(!outcome.changed_state());
    }

    #[test]
    fn unknown_building_is_a_no_op() {
        for gold in [0, 999, 5000] {
            let before = seeded(gold);
            let (after, outcome) = upgrade(before.clone(), "nonexistent-id");
            assert_eq!(after, before);
            assert_eq!(
                outcome,
                Outcome::UnknownBuilding(BuildingId::new("nonexistent-id"))
            );
        }
    }

    #[test]
    fn level_overflow_is_a_no_op() {
        let mut before = seeded(5000);
        before.buildings[0].level = u32::MAX;
        let (after, outcome) = upgrade(before.clone(), "1");
        assert_eq!(after, before);
        assert_eq!(outcome, Outcome::LevelOverflow(BuildingId::new("1")));
    }

    #[test]
    fn custom_cost_is_applied() {
        let rules = EconomyRules { upgrade_cost: 250 };
        let (after, _) = reduce(
            seeded(300),
            &Intent::UpgradeBuilding(BuildingId::new("1")),
            &rules,
        );
        assert_eq!(after.stats.gold, 50);
        assert_eq!(after.buildings[0].level, 4);
    }

    #[test]
    fn inert_intents_change_nothing() {
        let before = seeded(5000);
        let intents = [
            Intent::AcquireCookie(CookieId::new("3")),
            Intent::BuyShopItem(ShopItemId::new("1")),
            Intent::StartAdventure,
        ];
        for intent in &intents {
            let (after, outcome) = reduce(before.clone(), intent, &EconomyRules::default());
            assert_eq!(after, before);
            assert!(matches!(outcome, Outcome::Inert(_)));
        }
    }
}
