#![warn(clippy::all, missing_docs)]

//! Core domain logic for Cookie Kingdom.
//!
//! This crate hosts the data models, the seeded starting world, the
//! economy rules and the derived values used by the terminal UI and any
//! future frontends. Everything lives in memory for one session.

pub mod config;
pub mod derived;
pub mod models;
pub mod seed;
pub mod session;
pub mod view;

pub use crate::config::AppConfig;
pub use crate::derived::CollectionProgress;
pub use models::{Building, BuildingId, Cookie, CookieId, PlayerStats, Rarity, ShopItem};
pub use session::{EconomyRules, GameSession, Intent, KingdomState, Outcome};
pub use view::View;
