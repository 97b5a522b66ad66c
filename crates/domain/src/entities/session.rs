use crate::object_id;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// A signed-in session: an opaque access token with a short TTL plus a
/// refresh token with a long one. Refreshing rotates the whole pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user: String,
    pub access_token: String,
    pub refresh_token: String,
    pub access_valid_till: DateTime<Utc>,
    pub refresh_valid_till: DateTime<Utc>,
}

impl Session {
    pub fn open(user_id: String, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            id: object_id::generate(),
            user: user_id,
            access_token: random_token(),
            refresh_token: random_token(),
            access_valid_till: now + Duration::seconds(access_ttl_secs),
            refresh_valid_till: now + Duration::seconds(refresh_ttl_secs),
        }
    }

    pub fn is_access_valid(&self, now: DateTime<Utc>) -> bool {
        self.access_valid_till > now
    }

    pub fn is_refresh_valid(&self, now: DateTime<Utc>) -> bool {
        self.refresh_valid_till > now
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
