//! Repository for the `market_listings` and `market_bids` tables.

use rpgdash_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::market::{BidRow, ListingRow};

const LISTING_COLUMNS: &str = "\
    id, item_name, quantity, seller_name, price, end_time, active, created_at, updated_at";

const BID_COLUMNS: &str = "\
    id, listing_id, bidder_name, amount, placed_at, created_at, updated_at";

pub struct MarketRepo;

impl MarketRepo {
    /// Active listings that end after `now`, soonest first.
    pub async fn list_open(pool: &PgPool, now: Timestamp) -> Result<Vec<ListingRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM market_listings \
             WHERE active AND end_time > $1 \
             ORDER BY end_time, id"
        );
        sqlx::query_as::<_, ListingRow>(&sql)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Bids on the given listings, oldest first.
    pub async fn bids_for(
        pool: &PgPool,
        listing_ids: &[DbId],
    ) -> Result<Vec<BidRow>, sqlx::Error> {
        if listing_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {BID_COLUMNS} FROM market_bids \
             WHERE listing_id = ANY($1) \
             ORDER BY listing_id, placed_at, id"
        );
        sqlx::query_as::<_, BidRow>(&sql)
            .bind(listing_ids)
            .fetch_all(pool)
            .await
    }
}
