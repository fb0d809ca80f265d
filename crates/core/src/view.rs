//! Tabs the front end can route between.

use std::{fmt, str::FromStr};

/// One of the five top-level tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Map of the player's buildings.
    #[default]
    Kingdom,
    /// Read-only shop catalog.
    Shop,
    /// Cookie roster.
    Cookies,
    /// Adventure placeholder.
    Game,
    /// Player profile and progress.
    Profile,
}

/// Returned when a view name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view `{0}` (expected kingdom, shop, cookies, game or profile)")]
pub struct ParseViewError(pub String);

impl View {
    /// All views in tab order.
    pub const ALL: [View; 5] = [
        View::Kingdom,
        View::Shop,
        View::Cookies,
        View::Game,
        View::Profile,
    ];

    /// Position in [`View::ALL`].
    pub fn index(self) -> usize {
        match self {
            View::Kingdom => 0,
            View::Shop => 1,
            View::Cookies => 2,
            View::Game => 3,
            View::Profile => 4,
        }
    }

    /// View at `index`, if any.
    pub fn from_index(index: usize) -> Option<View> {
        Self::ALL.get(index).copied()
    }

    /// Next tab, wrapping after the last.
    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping before the first.
    pub fn previous(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Lowercase routing name.
    pub fn name(self) -> &'static str {
        match self {
            View::Kingdom => "kingdom",
            View::Shop => "shop",
            View::Cookies => "cookies",
            View::Game => "game",
            View::Profile => "profile",
        }
    }

    /// Tab caption.
    pub fn title(self) -> &'static str {
        match self {
            View::Kingdom => "Kingdom",
            View::Shop => "Shop",
            View::Cookies => "Cookies",
            View::Game => "Adventure",
            View::Profile => "Profile",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|view| view.name() == needle)
            .ok_or_else(|| ParseViewError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        for view in View::ALL {
            assert_eq!(view.to_string().parse::<View>(), Ok(view));
        }
        assert_eq!(" Shop ".parse::<View>(), Ok(View::Shop));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "tavern".parse::<View>().unwrap_err();
        assert_eq!(err, ParseViewError("tavern".to_string()));
        assert!(err.to_string().contains("tavern"));
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(View::Profile.next(), View::Kingdom);
        assert_eq!(View::Kingdom.previous(), View::Profile);
        assert_eq!(View::Shop.next().previous(), View::Shop);
        for (index, view) in View::ALL.into_iter().enumerate() {
            assert_eq!(view.index(), index);
            assert_eq!(View::from_index(index), Some(view));
        }
        assert_eq!(View::from_index(5), None);
    }
}
