//! The fixed world every session starts from.

use crate::{
    config::StartingConfig,
    models::{
        Building, BuildingId, BuildingKind, Cookie, CookieId, Currency, PlayerStats, Position,
        Rarity, ShopItem, ShopItemId,
    },
};

/// Player stats taken from the configured starting values.
pub fn starting_stats(starting: &StartingConfig) -> PlayerStats {
    PlayerStats {
        gold: starting.gold,
        gems: starting.gems,
        level: starting.level,
        experience: starting.experience,
        max_experience: starting.max_experience,
    }
}

/// Buildings placed on the map at session start.
pub fn starting_buildings() -> Vec<Building> {
    vec![
        building("1", "Castle", 3, BuildingKind::Castle, (50, 40), "🏰"),
        building("2", "Bakery", 2, BuildingKind::Bakery, (20, 60), "🍪"),
        building("3", "Farm", 1, BuildingKind::Farm, (75, 65), "🌾"),
    ]
}

/// Cookie roster at session start.
pub fn starting_cookies() -> Vec<Cookie> {
    vec![
        cookie("1", "Brave", Rarity::Epic, 450, true, "🍪"),
        cookie("2", "Strawberry", Rarity::Rare, 320, true, "🍓"),
        cookie("3", "Wizard", Rarity::Legendary, 680, false, "🔮"),
        cookie("4", "Knight", Rarity::Epic, 520, false, "⚔️"),
    ]
}

/// Shop catalog. Read-only for the whole session.
pub fn shop_catalog() -> Vec<ShopItem> {
    vec![
        shop_item("1", "Gold Pack", 50, "10000 gold", "💰"),
        shop_item("2", "Builder Kit", 100, "Faster construction", "🔨"),
        shop_item("3", "Surprise Cookie", 300, "Random cookie", "🎁"),
    ]
}

fn building(
    id: &str,
    name: &str,
    level: u32,
    kind: BuildingKind,
    (x, y): (u8, u8),
    icon: &str,
) -> Building {
    Building {
        id: BuildingId::new(id),
        name: name.to_string(),
        level,
        kind,
        position: Position::new(x, y),
        icon: icon.to_string(),
    }
}

fn cookie(id: &str, name: &str, rarity: Rarity, power: u32, owned: bool, icon: &str) -> Cookie {
    Cookie {
        id: CookieId::new(id),
        name: name.to_string(),
        rarity,
        power,
        owned,
        icon: icon.to_string(),
    }
}

fn shop_item(id: &str, name: &str, cost: u64, reward: &str, icon: &str) -> ShopItem {
    ShopItem {
        id: ShopItemId::new(id),
        name: name.to_string(),
        cost,
        currency: Currency::Gems,
        reward: reward.to_string(),
        icon: icon.to_string(),
    }
}
