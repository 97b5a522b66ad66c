use crate::object_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Core Team entity. `players` is the ordered roster of player ids; a player
/// belongs to at most one team system-wide. `total_cost` is a cache of the
/// roster's summed market values and is recomputed on every roster-changing
/// save by the team service, never set directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub country: String,
    pub players: Vec<String>,
    pub user: Option<String>,
    pub total_cost: i64,
    pub balance_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(
        name: String,
        country: String,
        players: Vec<String>,
        user: Option<String>,
        balance_amount: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: object_id::generate(),
            name,
            country: country.to_lowercase(),
            players,
            user,
            total_cost: 0,
            balance_amount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|id| id == player_id)
    }

    pub fn remove_player(&mut self, player_id: &str) {
        self.players.retain(|id| id != player_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_membership_and_removal() {
        let mut team = Team::new(
            "Rovers".to_string(),
            "England".to_string(),
            vec!["a".repeat(24), "b".repeat(24)],
            None,
            5_000_000,
        );
        assert_eq!(team.country, "england");
        assert!(team.has_player(&"a".repeat(24)));

        team.remove_player(&"a".repeat(24));
        assert!(!team.has_player(&"a".repeat(24)));
        assert_eq!(team.players.len(), 1);
    }
}
