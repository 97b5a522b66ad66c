use crate::entities::{Player, Team};
use crate::object_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_ASKING_PRICE: i64 = 1_000_000;

/// An active transfer-market listing: one player offered at a fixed asking
/// price. `team` snapshots the player's team at listing time and may be
/// absent for free agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferListing {
    pub id: String,
    pub player: String,
    pub team: Option<String>,
    pub asking_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransferListing {
    pub fn new(player: String, team: Option<String>, asking_price: i64) -> Self {
        let now = Utc::now();
        Self {
            id: object_id::generate(),
            player,
            team,
            asking_price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A listing with its player and team references resolved for responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedListing {
    pub id: String,
    pub asking_price: i64,
    pub player: Option<Player>,
    pub team: Option<Team>,
    pub created_at: DateTime<Utc>,
}

impl PopulatedListing {
    pub fn new(listing: TransferListing, player: Option<Player>, team: Option<Team>) -> Self {
        Self {
            id: listing.id,
            asking_price: listing.asking_price,
            player,
            team,
            created_at: listing.created_at,
        }
    }
}
