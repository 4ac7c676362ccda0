//! RPG dashboard domain core.
//!
//! Record types with their defaulting rules, the stat aggregator, the
//! leaderboard engine and profile queries. No database dependency: every
//! read goes through the [`store::EntityStore`] trait.
//!
//! - [`ranking::Leaderboard`]: one page of any ranking category.
//! - [`profile::Profiles`]: character and clan profiles.
//! - [`stats::aggregate`]: base stats plus equipment bonuses.
//! - [`memory::InMemoryStore`]: store used by tests and fixtures.

pub mod activity;
pub mod character;
pub mod clan;
pub mod currency;
pub mod equipment;
pub mod error;
pub mod inventory;
pub mod lenient;
pub mod market;
pub mod memory;
pub mod permissions;
pub mod profile;
pub mod progress;
pub mod races;
pub mod ranking;
pub mod stats;
pub mod store;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use store::EntityStore;
