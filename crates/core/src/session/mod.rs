#![allow(missing_docs)]

//! Economy and progression state for one play session.

mod state;

pub use state::{reduce, upgrade_building, EconomyRules, InertAction, Intent, KingdomState, Outcome};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    derived::{self, CollectionProgress},
    models::ShopItem,
    seed,
};

/// Owns the state of a single in-memory session and applies intents to it.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: KingdomState,
    rules: EconomyRules,
    catalog: Vec<ShopItem>,
    started_at: DateTime<Utc>,
}

impl GameSession {
    /// Start a session from the seeded world and configured constants.
    pub fn new(config: &AppConfig) -> Self {
        let state = KingdomState {
            stats: seed::starting_stats(&config.starting),
            buildings: seed::starting_buildings(),
            cookies: seed::starting_cookies(),
        };
        let rules = EconomyRules {
            upgrade_cost: config.economy.upgrade_cost,
        };
        Self::from_parts(state, rules, seed::shop_catalog())
    }

    pub fn from_parts(state: KingdomState, rules: EconomyRules, catalog: Vec<ShopItem>) -> Self {
        info!(
            gold = state.stats.gold,
            buildings = state.buildings.len(),
            cookies = state.cookies.len(),
            "Session started"
        );
        Self {
            state,
            rules,
            catalog,
            started_at: Utc::now(),
        }
    }

    /// Read-only snapshot for renderers.
    pub fn state(&self) -> &KingdomState {
        &self.state
    }

    pub fn rules(&self) -> &EconomyRules {
        &self.rules
    }

    pub fn catalog(&self) -> &[ShopItem] {
        &self.catalog
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn experience_ratio(&self) -> f64 {
        derived::experience_ratio(&self.state.stats)
    }

    pub fn collection(&self) -> CollectionProgress {
        CollectionProgress::of(&self.state.cookies)
    }

    pub fn can_afford_upgrade(&self) -> bool {
        derived::can_afford_upgrade(&self.state, &self.rules)
    }

    /// Apply an intent and report what it did.
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        let current = std::mem::take(&mut self.state);
        let (next, outcome) = reduce(current, &intent, &self.rules);
        self.state = next;

        match &outcome {
            Outcome::Upgraded {
                building,
                level,
                gold,
            } => info!(building = %building, level, gold, "Building upgraded"),
            other => debug!(?intent, outcome = ?other, "Intent left state unchanged"),
        }
        outcome
    }
}
