//! Integration tests for the PostgreSQL entity store.
//!
//! Exercises the repositories and [`PgEntityStore`] against a real database:
//! - Column defaulting on the way out of the store
//! - Ranking queries with filters, search and windows
//! - Race counts, clan member assembly and open market listings

use chrono::{Duration, Utc};
use rpgdash_core::currency::Price;
use rpgdash_core::ranking::{Leaderboard, PageRequest};
use rpgdash_core::store::{
    CharacterLookup, EntityStore, Field, Filter, RecordQuery, SortKey,
};
use rpgdash_db::repositories::CharacterRepo;
use rpgdash_db::PgEntityStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_character(pool: &PgPool, owner_key: &str, name: Option<&str>, race: Option<&str>) {
    sqlx::query("INSERT INTO characters (owner_key, name, race) VALUES ($1, $2, $3)")
        .bind(owner_key)
        .bind(name)
        .bind(race)
        .execute(pool)
        .await
        .unwrap();
}

async fn set_column(pool: &PgPool, owner_key: &str, column: &str, value: i64) {
    let sql = format!("UPDATE characters SET {column} = $2 WHERE owner_key = $1");
    sqlx::query(&sql)
        .bind(owner_key)
        .bind(value)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: characters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn blank_character_columns_take_baselines(pool: PgPool) {
    insert_character(&pool, "1001", None, Some("  ")).await;
    sqlx::query("UPDATE characters SET stats = '{\"atk\": 9}'::jsonb, level = 0")
        .execute(&pool)
        .await
        .unwrap();

    let store = PgEntityStore::new(pool);
    let character = store
        .find_character(&CharacterLookup::OwnerKey("1001".into()))
        .await
        .unwrap()
        .expect("character exists");

    assert_eq!(character.name, "Unknown");
    assert_eq!(character.race, "human");
    assert_eq!(character.level, 1);
    assert_eq!(character.stats.attack, 9);
    assert_eq!(character.stats.max_hp, 100);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn character_query_filters_searches_and_windows(pool: PgPool) {
    for (key, name, bounty) in [
        ("1", "Aria", 300),
        ("2", "Brom", 500),
        ("3", "Arianne", 100),
        ("4", "Cale", 0),
    ] {
        insert_character(&pool, key, Some(name), None).await;
        set_column(&pool, key, "bounty", bounty).await;
    }

    let query = RecordQuery::new(Filter::Positive(Field::Bounty))
        .sorted_by(&[SortKey::desc(Field::Bounty), SortKey::asc(Field::OwnerKey)]);
    let all = CharacterRepo::find(&pool, &query).await.unwrap();
    let keys: Vec<&str> = all.iter().map(|c| c.owner_key.as_str()).collect();
    assert_eq!(keys, vec!["2", "1", "3"]);

    let searched = CharacterRepo::find(&pool, &query.clone().name_contains(Some("ARI")))
        .await
        .unwrap();
    assert_eq!(searched.len(), 2);

    let windowed = CharacterRepo::find(&pool, &query.window(1, 1)).await.unwrap();
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0].owner_key, "1");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn search_treats_like_metacharacters_literally(pool: PgPool) {
    insert_character(&pool, "1", Some("100%_Pure"), None).await;
    insert_character(&pool, "2", Some("1000 Pure"), None).await;

    let query = RecordQuery::new(Filter::All).name_contains(Some("0%_"));
    let found = CharacterRepo::find(&pool, &query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].owner_key, "1");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn search_matches_defaulted_names(pool: PgPool) {
    insert_character(&pool, "1", None, None).await;
    insert_character(&pool, "2", Some("   "), None).await;
    insert_character(&pool, "3", Some("Aria"), None).await;

    let query = RecordQuery::new(Filter::All)
        .name_contains(Some("unknown"))
        .sorted_by(&[SortKey::asc(Field::OwnerKey)]);
    let store = PgEntityStore::new(pool);
    let found = store.find_characters(&query).await.unwrap();
    let keys: Vec<&str> = found.iter().map(|c| c.owner_key.as_str()).collect();
    assert_eq!(keys, ["1", "2"]);
    assert!(found.iter().all(|c| c.name == "Unknown"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn inventory_skips_malformed_items(pool: PgPool) {
    sqlx::query(
        "INSERT INTO inventories (owner_key, items) \
         VALUES ('1001', '[{\"name\": \"Potion\", \"quantity\": 2}, 7]'::jsonb)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = PgEntityStore::new(pool);
    let inventory = store.find_inventory("1001").await.unwrap().expect("inventory exists");
    assert_eq!(inventory.items.len(), 1);
    assert_eq!(inventory.items[0].name, "Potion");
    assert!(store.find_inventory("2002").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn race_counts_default_blank_races(pool: PgPool) {
    insert_character(&pool, "1", None, None).await;
    insert_character(&pool, "2", None, Some("")).await;
    insert_character(&pool, "3", None, Some("Elf")).await;

    let mut counts = CharacterRepo::count_by_race(&pool).await.unwrap();
    counts.sort_by(|a, b| a.race.cmp(&b.race));

    assert_eq!(counts.len(), 2);
    assert_eq!((counts[0].race.as_str(), counts[0].count), ("Elf", 1));
    assert_eq!((counts[1].race.as_str(), counts[1].count), ("human", 2));
}

// ---------------------------------------------------------------------------
// Test: clans, market, activity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn clan_members_keep_join_order(pool: PgPool) {
    let clan_id: i64 = sqlx::query_scalar(
        "INSERT INTO clans (name, points, treasury) VALUES ('Dawnguard', 40, '{\"gold\": 5}') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    for (key, role) in [("20", "member"), ("10", "leader")] {
        sqlx::query("INSERT INTO clan_members (clan_id, owner_key, role) VALUES ($1, $2, $3)")
            .bind(clan_id)
            .bind(key)
            .bind(role)
            .execute(&pool)
            .await
            .unwrap();
    }

    let store = PgEntityStore::new(pool);
    let clan = store.find_clan(clan_id).await.unwrap().expect("clan exists");

    assert_eq!(clan.member_owner_keys(), vec!["20", "10"]);
    assert_eq!(clan.leader().map(|m| m.owner_key.as_str()), Some("10"));
    assert_eq!(clan.treasury.gold, 5);
    assert!(store.find_clan(clan_id + 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn open_listings_exclude_expired_and_inactive(pool: PgPool) {
    let now = Utc::now();
    let mut open_id = 0i64;
    for (item, ends_in, active) in [
        ("Potion", Duration::hours(2), true),
        ("Elixir", Duration::hours(-1), true),
        ("Shield", Duration::hours(1), false),
    ] {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO market_listings (item_name, price, end_time, active) \
             VALUES ($1, '{\"silver\": 3}', $2, $3) RETURNING id",
        )
        .bind(item)
        .bind(now + ends_in)
        .bind(active)
        .fetch_one(&pool)
        .await
        .unwrap();
        if item == "Potion" {
            open_id = id;
        }
    }
    sqlx::query("INSERT INTO market_bids (listing_id, bidder_name, amount) VALUES ($1, 'Brom', '40')")
        .bind(open_id)
        .execute(&pool)
        .await
        .unwrap();

    let store = PgEntityStore::new(pool);
    let listings = store.find_open_listings(now).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].item_name, "Potion");
    assert_eq!(listings[0].bid_count(), 1);
    assert_eq!(listings[0].bids[0].amount, Price::Gold(40));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn recent_activity_is_newest_first(pool: PgPool) {
    let now = Utc::now();
    for (kind, message, ago) in [("kill", "first", 3), ("death", "second", 2), ("weird", "third", 1)] {
        sqlx::query("INSERT INTO activity_logs (kind, message, created_at) VALUES ($1, $2, $3)")
            .bind(kind)
            .bind(message)
            .bind(now - Duration::minutes(ago))
            .execute(&pool)
            .await
            .unwrap();
    }

    let store = PgEntityStore::new(pool);
    let entries = store.recent_activity(2).await.unwrap();

    let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["third", "second"]);
}

// ---------------------------------------------------------------------------
// Test: leaderboard over the database
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn villains_rank_most_negative_first(pool: PgPool) {
    for (key, reputation) in [("1", -10), ("2", -50), ("3", 20)] {
        insert_character(&pool, key, None, None).await;
        set_column(&pool, key, "reputation", reputation).await;
    }

    let store = PgEntityStore::new(pool);
    let page = Leaderboard::new(&store)
        .list("villains", PageRequest::new(1, 10).unwrap(), None)
        .await
        .unwrap();

    let keys: Vec<&str> = page.rows.iter().filter_map(|r| r.owner_key()).collect();
    assert_eq!(keys, vec!["2", "1"]);
    assert!(!page.has_more);
}
