#![allow(missing_docs)]

//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource counters for the single player of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Gold balance, spent on building upgrades.
    pub gold: u64,
    /// Premium currency shown in the header and shop.
    pub gems: u64,
    /// Player level (starts at 1 or higher).
    pub level: u32,
    /// Experience collected towards the next level.
    pub experience: u32,
    /// Experience required for the next level.
    pub max_experience: u32,
}

/// Stable identifier of a building.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub String);

impl BuildingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category tag of a building. Decorative only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Castle,
    Bakery,
    Farm,
}

/// Placement on the kingdom map, as percentages of the map width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPosition")]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

#[derive(Deserialize)]
struct RawPosition {
    x: u8,
    y: u8,
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        Self::new(raw.x, raw.y)
    }
}

impl Position {
    /// Largest valid coordinate on either axis.
    pub const MAX: u8 = 100;

    /// Build a position, clamping both axes into `0..=100`.
    pub fn new(x: u8, y: u8) -> Self {
        Self {
            x: x.min(Self::MAX),
            y: y.min(Self::MAX),
        }
    }
}

/// A building on the kingdom map. Only `level` changes during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub level: u32,
    pub kind: BuildingKind,
    pub position: Position,
    pub icon: String,
}

/// Stable identifier of a collectible cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieId(pub String);

impl CookieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CookieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordinal rarity class of a cookie, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Upper-case badge label.
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
        }
    }
}

/// Collectible character in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub id: CookieId,
    pub name: String,
    pub rarity: Rarity,
    /// Display-only strength value.
    pub power: u32,
    pub owned: bool,
    pub icon: String,
}

/// Stable identifier of a shop catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopItemId(pub String);

impl ShopItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ShopItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Currency a shop item is priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Gold,
    Gems,
}

impl Currency {
    pub fn label(self) -> &'static str {
        match self {
            Currency::Gold => "gold",
            Currency::Gems => "gems",
        }
    }
}

/// Read-only shop catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: ShopItemId,
    pub name: String,
    pub cost: u64,
    pub currency: Currency,
    /// Free-text description of what the item would grant.
    pub reward: String,
    pub icon: String,
}

impl ShopItem {
    /// Price label such as `50 gems`.
    pub fn price_label(&self) -> String {
        format!("{} {}", self.cost, self.currency.label())
    }
}
