//! Market listing and bid row models.

use rpgdash_core::currency::Price;
use rpgdash_core::market::{Bid, MarketListing};
use rpgdash_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::decode_json;

/// A row from the `market_listings` table.
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub id: DbId,
    pub item_name: String,
    pub quantity: i32,
    pub seller_name: String,
    /// A JSON number (gold) or a currency object.
    pub price: serde_json::Value,
    pub end_time: Timestamp,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `market_bids` table.
#[derive(Debug, Clone, FromRow)]
pub struct BidRow {
    pub id: DbId,
    pub listing_id: DbId,
    pub bidder_name: String,
    pub amount: serde_json::Value,
    pub placed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BidRow> for Bid {
    fn from(row: BidRow) -> Self {
        let amount: Price = decode_json(Some(row.amount), "amount", &row.id.to_string());
        Bid {
            bidder_name: row.bidder_name,
            amount,
            placed_at: row.placed_at,
        }
    }
}

impl ListingRow {
    pub fn into_listing(self, bids: Vec<BidRow>) -> MarketListing {
        let price: Price = decode_json(Some(self.price), "price", &self.id.to_string());
        MarketListing {
            id: self.id,
            item_name: self.item_name,
            quantity: self.quantity,
            seller_name: self.seller_name,
            price,
            end_time: self.end_time,
            bids: bids.into_iter().map(Bid::from).collect(),
            active: self.active,
        }
    }
}
