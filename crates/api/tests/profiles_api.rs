//! Integration tests for character and clan profiles and the side panels.

mod common;

use std::collections::BTreeMap;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get};
use rpgdash_core::activity::{ActivityEntry, ActivityKind};
use rpgdash_core::character::Character;
use rpgdash_core::clan::{Clan, ClanMember};
use rpgdash_core::currency::Price;
use rpgdash_core::equipment::{EquippedItem, Equipment};
use rpgdash_core::inventory::{Inventory, InventoryItem};
use rpgdash_core::market::MarketListing;
use rpgdash_core::memory::InMemoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn aria() -> Character {
    let mut aria = Character {
        id: 17,
        owner_key: "1001".into(),
        name: "Aria".into(),
        ..Character::default()
    };
    aria.stats.attack = 10;
    aria
}

fn listing(id: i64, item: &str, ends_in: Duration, active: bool) -> MarketListing {
    MarketListing {
        id,
        item_name: item.into(),
        quantity: 1,
        seller_name: "Mira".into(),
        price: Price::Gold(25),
        end_time: Utc::now() + ends_in,
        bids: Vec::new(),
        active,
    }
}

// ---------------------------------------------------------------------------
// Test: character profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn character_profile_merges_equipment_bonuses() {
    let sword = EquippedItem {
        name: "Iron Sword".into(),
        stats: Some(BTreeMap::from([("atk".to_string(), 5)])),
    };
    let store = InMemoryStore::new()
        .with_characters([aria()])
        .with_equipment([Equipment {
            owner_key: "1001".into(),
            slots: BTreeMap::from([("weapon".to_string(), Some(sword))]),
        }]);
    let app = common::build_test_app(store);

    let response = get(app, "/api/v1/characters/1001").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["character"]["name"], "Aria");
    assert_eq!(data["stats"]["base"]["attack"], 10);
    assert_eq!(data["stats"]["equipment_bonus"]["attack"], 5);
    assert_eq!(data["stats"]["total"]["attack"], 15);
    assert_eq!(data["equipment"]["slots"]["weapon"]["name"], "Iron Sword");
}

#[tokio::test]
async fn missing_equipment_inventory_and_progress_are_defaulted() {
    let app = common::build_test_app(InMemoryStore::new().with_characters([aria()]));

    // Numeric id lookup falls back after the owner key misses.
    let response = get(app, "/api/v1/characters/17").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["character"]["owner_key"], "1001");
    assert_eq!(data["equipment"]["slots"], serde_json::json!({}));
    assert_eq!(data["inventory"]["owner_key"], "1001");
    assert_eq!(data["inventory"]["items"], serde_json::json!([]));
    assert_eq!(data["level_progress"]["level"], 1);
    assert_eq!(data["level_progress"]["xp"], 0);
}

#[tokio::test]
async fn character_profile_includes_inventory() {
    let store = InMemoryStore::new()
        .with_characters([aria()])
        .with_inventories([Inventory {
            owner_key: "1001".into(),
            items: vec![InventoryItem {
                name: "Potion".into(),
                quantity: 4,
            }],
        }]);
    let app = common::build_test_app(store);

    let response = get(app, "/api/v1/characters/1001").await;
    assert_eq!(response.status(), StatusCode::OK);

    let items = &body_json(response).await["data"]["inventory"]["items"];
    assert_eq!(items[0]["name"], "Potion");
    assert_eq!(items[0]["quantity"], 4);
}

#[tokio::test]
async fn unknown_character_returns_404() {
    let app = common::build_test_app(InMemoryStore::new().with_characters([aria()]));
    let response = get(app, "/api/v1/characters/nobody").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: clan profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clan_profile_hydrates_members() {
    let clan = Clan {
        id: 3,
        name: "Dawnguard".into(),
        members: vec![
            ClanMember {
                owner_key: "1001".into(),
                role: "Leader".into(),
                contribution: 5,
                ..ClanMember::default()
            },
            ClanMember {
                owner_key: "2002".into(),
                role: "member".into(),
                contribution: 50,
                ..ClanMember::default()
            },
        ],
        ..Clan::default()
    };
    let app = common::build_test_app(
        InMemoryStore::new()
            .with_characters([aria()])
            .with_clans([clan]),
    );

    let response = get(app, "/api/v1/clans/3").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["member_count"], 2);
    assert_eq!(data["leader"]["name"], "Aria");
    assert_eq!(data["top_members"][0]["owner_key"], "2002");
    assert_eq!(data["top_members"][0]["name"], "Unknown");
    assert_eq!(data["top_members"][0]["has_character"], false);
}

#[tokio::test]
async fn unknown_clan_returns_404() {
    let app = common::build_test_app(InMemoryStore::new());
    let response = get(app, "/api/v1/clans/99").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: market, activity, stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn market_lists_open_listings_soonest_first() {
    let store = InMemoryStore::new().with_listings([
        listing(1, "Elixir", Duration::hours(5), true),
        listing(2, "Potion", Duration::hours(1), true),
        listing(3, "Expired", Duration::hours(-1), true),
        listing(4, "Withdrawn", Duration::hours(2), false),
    ]);
    let app = common::build_test_app(store);

    let data = body_json(get(app, "/api/v1/market").await).await["data"].clone();
    let items: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["item_name"].as_str().unwrap())
        .collect();

    assert_eq!(items, vec!["Potion", "Elixir"]);
    assert_eq!(data[0]["bid_count"], 0);
    assert_eq!(data[0]["price"], 25);
}

#[tokio::test]
async fn activity_is_newest_first() {
    let now = Utc::now();
    let entry = |id, kind, minutes_ago| ActivityEntry {
        id,
        kind,
        message: format!("entry {id}"),
        timestamp: now - Duration::minutes(minutes_ago),
    };
    let store = InMemoryStore::new().with_activity([
        entry(1, ActivityKind::Kill, 30),
        entry(2, ActivityKind::Other, 5),
        entry(3, ActivityKind::Market, 10),
    ]);
    let app = common::build_test_app(store);

    let data = body_json(get(app, "/api/v1/activity").await).await["data"].clone();
    let ids: Vec<i64> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(data[0]["kind"], "other");
}

#[tokio::test]
async fn stats_counts_players() {
    let app = common::build_test_app(InMemoryStore::new().with_characters([aria()]));
    let json = body_json(get(app, "/api/v1/stats").await).await;

    assert_eq!(json["data"]["total_players"], 1);
}
