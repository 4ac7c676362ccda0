//! Auction house listings.

use serde::{Deserialize, Serialize};

use crate::currency::Price;
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder_name: String,
    pub amount: Price,
    pub placed_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketListing {
    pub id: DbId,
    pub item_name: String,
    pub quantity: i32,
    pub seller_name: String,
    pub price: Price,
    pub end_time: Timestamp,
    pub bids: Vec<Bid>,
    pub active: bool,
}

impl MarketListing {
    /// Active and not yet past its end time.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.active && self.end_time > now
    }

    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }
}

/// Keep open listings, soonest-ending first.
pub fn open_listings(mut listings: Vec<MarketListing>, now: Timestamp) -> Vec<MarketListing> {
    listings.retain(|l| l.is_open(now));
    listings.sort_by(|a, b| a.end_time.cmp(&b.end_time).then(a.id.cmp(&b.id)));
    listings
}
