use dotenv::dotenv;
use std::env;

/// One (role, count) pair of the default squad composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCount {
    pub role: SquadRole,
    pub count: usize,
}

/// Squad roles, mirrored by `domain::PlayerRole`. Kept as a separate plain
/// enum so this crate stays dependency-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquadRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

/// Inclusive percentage range for market-value appreciation on transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageRange {
    pub min: u32,
    pub max: u32,
}

/// Game rules and generation pools for the fantasy league.
#[derive(Debug, Clone)]
pub struct GameRules {
    /// Squad composition for auto-generated teams (20 players total).
    pub team_combination: Vec<RoleCount>,
    /// Balance granted to every auto-generated team.
    pub starting_balance: i64,
    /// Placeholder total cost assigned before the first roster recompute.
    pub initial_total_cost: i64,
    /// Market value assigned to every generated player.
    pub base_market_value: i64,
    /// Lower bound for asking prices and market values.
    pub min_market_value: i64,
    pub player_increment_percentage_range: PercentageRange,
    pub min_age: u32,
    pub max_age: u32,
    pub first_names: Vec<&'static str>,
    pub last_names: Vec<&'static str>,
    pub default_countries: Vec<&'static str>,
}

const FIRST_NAMES: &[&str] = &[
    "Liam", "Noah", "Oliver", "Elijah", "James", "Mateo", "Lucas", "Levi",
    "Diego", "Marco", "Pedro", "Andres", "Karim", "Yusuf", "Emre", "Jan",
    "Sven", "Luka", "Milan", "Andrei", "Pavel", "Henrik", "Jonas", "Felix",
];

const LAST_NAMES: &[&str] = &[
    "Silva", "Santos", "Fernandez", "Rossi", "Ferrari", "Novak", "Kovac",
    "Muller", "Schmidt", "Jansen", "Visser", "Larsen", "Nielsen", "Virtanen",
    "Kowalski", "Nagy", "Popescu", "Ivanov", "Dimitrov", "Yilmaz", "Costa",
    "Moreau", "Dubois", "Okafor",
];

const DEFAULT_COUNTRIES: &[&str] = &[
    "argentina", "brazil", "croatia", "denmark", "england", "france",
    "germany", "italy", "netherlands", "nigeria", "norway", "poland",
    "portugal", "senegal", "spain", "sweden", "turkey", "uruguay",
];

impl Default for GameRules {
    fn default() -> Self {
        GameRules {
            team_combination: vec![
                RoleCount { role: SquadRole::Goalkeeper, count: 3 },
                RoleCount { role: SquadRole::Defender, count: 6 },
                RoleCount { role: SquadRole::Midfielder, count: 6 },
                RoleCount { role: SquadRole::Attacker, count: 5 },
            ],
            starting_balance: 5_000_000,
            initial_total_cost: 20_000_000,
            base_market_value: 1_000_000,
            min_market_value: 1_000_000,
            player_increment_percentage_range: PercentageRange { min: 5, max: 15 },
            min_age: 18,
            max_age: 40,
            first_names: FIRST_NAMES.to_vec(),
            last_names: LAST_NAMES.to_vec(),
            default_countries: DEFAULT_COUNTRIES.to_vec(),
        }
    }
}

impl GameRules {
    /// Load the rules, letting the environment override the numeric knobs.
    pub fn from_env() -> Self {
        dotenv().ok();

        let mut rules = GameRules::default();

        if let Some(balance) = env_i64("STARTING_BALANCE") {
            rules.starting_balance = balance;
        }
        if let Some(min) = env_u32("APPRECIATION_MIN_PCT") {
            rules.player_increment_percentage_range.min = min;
        }
        if let Some(max) = env_u32("APPRECIATION_MAX_PCT") {
            rules.player_increment_percentage_range.max = max;
        }
        if let Some(value) = env_i64("BASE_MARKET_VALUE") {
            rules.base_market_value = value;
        }

        rules
    }

    pub fn squad_size(&self) -> usize {
        self.team_combination.iter().map(|c| c.count).sum()
    }
}

fn env_i64(key: &str) -> Option<i64> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_u32(key: &str) -> Option<u32> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_squad_has_twenty_players() {
        let rules = GameRules::default();
        assert_eq!(rules.squad_size(), 20);
        assert_eq!(rules.initial_total_cost, 20 * rules.base_market_value);
    }
}
