use crate::errors::DomainError;
use crate::object_id;
use chrono::{DateTime, Utc};
use config::GameRules;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 40;
pub const MIN_MARKET_VALUE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl PlayerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerRole::Goalkeeper => "GOALKEEPER",
            PlayerRole::Defender => "DEFENDER",
            PlayerRole::Midfielder => "MIDFIELDER",
            PlayerRole::Attacker => "ATTACKER",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "GOALKEEPER" => Some(PlayerRole::Goalkeeper),
            "DEFENDER" => Some(PlayerRole::Defender),
            "MIDFIELDER" => Some(PlayerRole::Midfielder),
            "ATTACKER" => Some(PlayerRole::Attacker),
            _ => None,
        }
    }
}

impl From<config::SquadRole> for PlayerRole {
    fn from(role: config::SquadRole) -> Self {
        match role {
            config::SquadRole::Goalkeeper => PlayerRole::Goalkeeper,
            config::SquadRole::Defender => PlayerRole::Defender,
            config::SquadRole::Midfielder => PlayerRole::Midfielder,
            config::SquadRole::Attacker => PlayerRole::Attacker,
        }
    }
}

/// Core Player entity - a footballer tracked by the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: PlayerRole,
    pub country: String,
    pub age: i32,
    pub market_value: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        first_name: String,
        last_name: String,
        role: PlayerRole,
        country: String,
        age: i32,
        market_value: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: object_id::generate(),
            first_name,
            last_name,
            role,
            country: country.to_lowercase(),
            age,
            market_value,
            created_at: now,
            updated_at: now,
        }
    }

    /// Random player used by team auto-generation: pool name/country, random
    /// age within the configured bounds, baseline market value.
    pub fn random(role: PlayerRole, rules: &GameRules) -> Self {
        let mut rng = rand::thread_rng();
        let first_name = rules
            .first_names
            .choose(&mut rng)
            .copied()
            .unwrap_or("Alex")
            .to_string();
        let last_name = rules
            .last_names
            .choose(&mut rng)
            .copied()
            .unwrap_or("Keller")
            .to_string();
        let country = rules
            .default_countries
            .choose(&mut rng)
            .copied()
            .unwrap_or("england")
            .to_string();
        let age = rng.gen_range(rules.min_age as i32..=rules.max_age as i32);

        Player::new(first_name, last_name, role, country, age, rules.base_market_value)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Player name cannot be empty".to_string(),
            ));
        }

        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(DomainError::ValidationError(format!(
                "Age must be between {MIN_AGE} and {MAX_AGE}"
            )));
        }

        if self.market_value < MIN_MARKET_VALUE {
            return Err(DomainError::ValidationError(format!(
                "Market value must be at least {MIN_MARKET_VALUE}"
            )));
        }

        Ok(())
    }
}
