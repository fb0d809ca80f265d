//! Read-only values computed from a state snapshot for display.

use serde::Serialize;

use crate::{
    models::{Cookie, PlayerStats},
    session::{EconomyRules, KingdomState},
};

/// Fraction of the current level's experience collected, clamped to `[0, 1]`.
///
/// Returns `0.0` when `max_experience` is zero.
pub fn experience_ratio(stats: &PlayerStats) -> f64 {
    if stats.max_experience == 0 {
        return 0.0;
    }
    (f64::from(stats.experience) / f64::from(stats.max_experience)).clamp(0.0, 1.0)
}

/// Owned cookies out of the full roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionProgress {
    /// Cookies already in the collection.
    pub owned: usize,
    /// Size of the whole roster.
    pub total: usize,
}

impl CollectionProgress {
    /// Count progress over a roster.
    pub fn of(cookies: &[Cookie]) -> Self {
        Self {
            owned: owned_cookie_count(cookies),
            total: cookies.len(),
        }
    }
}

/// Number of cookies with `owned == true`.
pub fn owned_cookie_count(cookies: &[Cookie]) -> usize {
    cookies.iter().filter(|cookie| cookie.owned).count()
}

/// Whether the next building upgrade can be paid for.
pub fn can_afford_upgrade(state: &KingdomState, rules: &EconomyRules) -> bool {
    state.stats.gold >= rules.upgrade_cost
}
