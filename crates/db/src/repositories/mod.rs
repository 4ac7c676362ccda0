//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod character_repo;
pub mod clan_repo;
pub mod equipment_repo;
pub mod inventory_repo;
pub mod market_repo;
pub mod permission_repo;
pub mod progress_repo;

pub use activity_repo::ActivityRepo;
pub use character_repo::CharacterRepo;
pub use clan_repo::ClanRepo;
pub use equipment_repo::EquipmentRepo;
pub use inventory_repo::InventoryRepo;
pub use market_repo::MarketRepo;
pub use permission_repo::PermissionRepo;
pub use progress_repo::ProgressRepo;
