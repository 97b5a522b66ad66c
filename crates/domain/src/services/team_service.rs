use crate::entities::{Player, Team};
use crate::errors::DomainError;
use crate::repositories::{PlayerRepository, TeamRepository, UserRepository};
use crate::services::PlayerService;
use config::GameRules;
use futures::future::try_join_all;
use rand::seq::SliceRandom;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateTeamInput {
    pub name: String,
    pub country: String,
    pub players: Vec<String>,
    pub balance_amount: i64,
    pub user: String,
    pub transfer: bool,
}

/// Partial update; roster replacement is wholesale (a supplied list replaces
/// the old one, nothing is merged).
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub country: Option<String>,
    pub players: Option<Vec<String>>,
    pub balance_amount: Option<i64>,
    pub user: Option<String>,
    pub transfer: bool,
}

/// Team Roster Manager - owns Team entities and keeps `total_cost` equal to
/// the live sum of the roster's market values on every roster-changing save.
pub struct TeamService {
    team_repository: Arc<dyn TeamRepository>,
    player_repository: Arc<dyn PlayerRepository>,
    user_repository: Arc<dyn UserRepository>,
    player_service: Arc<PlayerService>,
    rules: GameRules,
}

impl TeamService {
    pub fn new(
        team_repository: Arc<dyn TeamRepository>,
        player_repository: Arc<dyn PlayerRepository>,
        user_repository: Arc<dyn UserRepository>,
        player_service: Arc<PlayerService>,
        rules: GameRules,
    ) -> Self {
        Self {
            team_repository,
            player_repository,
            user_repository,
            player_service,
            rules,
        }
    }

    pub async fn create_team(&self, input: CreateTeamInput) -> Result<Team, DomainError> {
        self.user_repository
            .find_by_id(&input.user)
            .await?
            .ok_or(DomainError::InvalidUserId)?;

        let players = self.resolve_players(&input.players).await?;

        let donor_teams = self
            .team_repository
            .find_teams_holding_any(&input.players, None)
            .await?;

        if !donor_teams.is_empty() {
            if !input.transfer {
                return Err(DomainError::PlayerAlreadyRostered);
            }
            self.detach_players(&players, donor_teams).await?;
        }

        let team = Team::new(
            input.name,
            input.country,
            input.players,
            Some(input.user),
            input.balance_amount,
        );

        self.persist_roster_change(team, true).await
    }

    /// Signup path: generate the configured squad (fan-out per role), pick a
    /// random name and country, grant the starting balance.
    pub async fn auto_generate_team(&self, user_id: &str) -> Result<Team, DomainError> {
        let mut roster = Vec::with_capacity(self.rules.squad_size());

        for combination in &self.rules.team_combination {
            let role = combination.role.into();
            let generated: Vec<Player> = try_join_all(
                (0..combination.count).map(|_| self.player_service.generate_random_player(role)),
            )
            .await?;
            roster.extend(generated.into_iter().map(|p| p.id));
        }

        let (name, country) = {
            let mut rng = rand::thread_rng();
            let name = self
                .rules
                .first_names
                .choose(&mut rng)
                .copied()
                .unwrap_or("United")
                .to_string();
            let country = self
                .rules
                .default_countries
                .choose(&mut rng)
                .copied()
                .unwrap_or("england")
                .to_string();
            (name, country)
        };

        let mut team = Team::new(
            name,
            country,
            roster,
            Some(user_id.to_string()),
            self.rules.starting_balance,
        );
        team.total_cost = self.rules.initial_total_cost;

        self.persist_roster_change(team, true).await
    }

    pub async fn update_team(&self, id: &str, patch: TeamPatch) -> Result<Team, DomainError> {
        let mut team = self
            .team_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvalidId(id.to_string()))?;

        if let Some(user_id) = patch.user {
            self.user_repository
                .find_by_id(&user_id)
                .await?
                .ok_or(DomainError::InvalidUserId)?;
            team.user = Some(user_id);
        }
        if let Some(name) = patch.name {
            team.name = name;
        }
        if let Some(country) = patch.country {
            team.country = country.to_lowercase();
        }
        if let Some(balance_amount) = patch.balance_amount {
            team.balance_amount = balance_amount;
        }

        // An empty list counts as "not provided"; the roster stays put.
        if let Some(player_ids) = patch.players.filter(|ids| !ids.is_empty()) {
            let players = self.resolve_players(&player_ids).await?;

            // Teams of this team's owner are exempt so an in-place roster
            // shuffle does not count as poaching from yourself.
            let donor_teams = self
                .team_repository
                .find_teams_holding_any(&player_ids, team.user.as_deref())
                .await?;

            if !donor_teams.is_empty() {
                if !patch.transfer {
                    return Err(DomainError::PlayerAlreadyRostered);
                }
                self.detach_players(&players, donor_teams).await?;
            }

            team.players = player_ids;
        }

        self.persist_roster_change(team, false).await
    }

    pub async fn delete_team(&self, id: &str) -> Result<(), DomainError> {
        self.team_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvalidId(id.to_string()))?;

        self.team_repository.delete(id).await
    }

    pub async fn list_teams(
        &self,
        id: Option<&str>,
        user_id: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Team>, i64), DomainError> {
        if let Some(id) = id {
            let teams: Vec<Team> =
                self.team_repository.find_by_id(id).await?.into_iter().collect();
            let count = teams.len() as i64;
            return Ok((teams, count));
        }

        if let Some(user_id) = user_id {
            let teams: Vec<Team> =
                self.team_repository.find_by_user(user_id).await?.into_iter().collect();
            let count = teams.len() as i64;
            return Ok((teams, count));
        }

        let teams = self.team_repository.find_page(skip, limit).await?;
        let count = self.team_repository.count().await?;
        Ok((teams, count))
    }

    pub async fn team_of_user(&self, user_id: &str) -> Result<Option<Team>, DomainError> {
        self.team_repository.find_by_user(user_id).await
    }

    /// Save a team whose roster may have changed, recomputing `total_cost`
    /// from live player records so stale market values never linger in the
    /// cache. Every component that mutates a roster funnels through here.
    pub async fn persist_roster_change(
        &self,
        mut team: Team,
        is_new: bool,
    ) -> Result<Team, DomainError> {
        let players = self.player_repository.find_by_ids(&team.players).await?;
        team.total_cost = players.iter().map(|p| p.market_value).sum();

        if is_new {
            self.team_repository.save(&team).await
        } else {
            self.team_repository.update(&team).await
        }
    }

    /// Remove the requested players from the teams currently holding them,
    /// crediting each donor team's balance by the departing players' market
    /// values. One save per affected team.
    async fn detach_players(
        &self,
        players: &[Player],
        donor_teams: Vec<Team>,
    ) -> Result<(), DomainError> {
        for mut donor in donor_teams {
            let departing: Vec<&Player> =
                players.iter().filter(|p| donor.has_player(&p.id)).collect();
            if departing.is_empty() {
                continue;
            }

            for player in &departing {
                donor.remove_player(&player.id);
                donor.balance_amount += player.market_value;
            }

            self.persist_roster_change(donor, false).await?;
        }

        Ok(())
    }

    async fn resolve_players(&self, ids: &[String]) -> Result<Vec<Player>, DomainError> {
        let players = self.player_repository.find_by_ids(ids).await?;
        if players.len() != ids.len() {
            return Err(DomainError::InvalidPlayerId);
        }
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PlayerRole, User, UserRole};
    use crate::repositories::UserRepository as _;
    use crate::test_support::{
        InMemoryPlayerRepository, InMemoryTeamRepository, InMemoryUserRepository,
    };

    struct Fixture {
        players: Arc<InMemoryPlayerRepository>,
        teams: Arc<InMemoryTeamRepository>,
        users: Arc<InMemoryUserRepository>,
        service: TeamService,
    }

    fn fixture() -> Fixture {
        let players = Arc::new(InMemoryPlayerRepository::default());
        let teams = Arc::new(InMemoryTeamRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let player_service = Arc::new(PlayerService::new(players.clone(), GameRules::default()));
        let service = TeamService::new(
            teams.clone(),
            players.clone(),
            users.clone(),
            player_service,
            GameRules::default(),
        );
        Fixture {
            players,
            teams,
            users,
            service,
        }
    }

    async fn seed_user(fixture: &Fixture) -> User {
        let user = User::new(
            "Sam".to_string(),
            "Archer".to_string(),
            "sam@example.com".to_string(),
            UserRole::User,
            "digest".to_string(),
        );
        fixture.users.save(&user).await.unwrap()
    }

    async fn seed_player(fixture: &Fixture, market_value: i64) -> Player {
        let mut player = Player::random(PlayerRole::Defender, &GameRules::default());
        player.market_value = market_value;
        fixture.players.save(&player).await.unwrap()
    }

    #[tokio::test]
    async fn create_team_computes_total_cost_from_live_values() {
        let fixture = fixture();
        let user = seed_user(&fixture).await;
        let a = seed_player(&fixture, 1_000_000).await;
        let b = seed_player(&fixture, 2_500_000).await;

        let team = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Rovers".to_string(),
                country: "England".to_string(),
                players: vec![a.id.clone(), b.id.clone()],
                balance_amount: 4_000_000,
                user: user.id,
                transfer: false,
            })
            .await
            .unwrap();

        assert_eq!(team.total_cost, 3_500_000);
        assert_eq!(team.country, "england");
        assert_eq!(team.players, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn create_team_rejects_unknown_owner_and_players() {
        let fixture = fixture();
        let user = seed_user(&fixture).await;

        let err = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Rovers".to_string(),
                country: "England".to_string(),
                players: vec![],
                balance_amount: 100_000,
                user: "f".repeat(24),
                transfer: false,
            })
            .await;
        assert!(matches!(err, Err(DomainError::InvalidUserId)));

        let err = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Rovers".to_string(),
                country: "England".to_string(),
                players: vec!["f".repeat(24)],
                balance_amount: 100_000,
                user: user.id,
                transfer: false,
            })
            .await;
        assert!(matches!(err, Err(DomainError::InvalidPlayerId)));
    }

    // Scenario: rostered player requested without the transfer flag fails;
    // with the flag the donor team loses the player and gains his value.
    #[tokio::test]
    async fn rostered_player_needs_transfer_flag() {
        let fixture = fixture();
        let owner_a = seed_user(&fixture).await;
        let player = seed_player(&fixture, 1_500_000).await;

        let donor = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Donors".to_string(),
                country: "France".to_string(),
                players: vec![player.id.clone()],
                balance_amount: 2_000_000,
                user: owner_a.id,
                transfer: false,
            })
            .await
            .unwrap();

        let owner_b = {
            let user = User::new(
                "Kim".to_string(),
                "Field".to_string(),
                "kim@example.com".to_string(),
                UserRole::User,
                "digest".to_string(),
            );
            fixture.users.save(&user).await.unwrap()
        };

        let without_flag = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Poachers".to_string(),
                country: "Spain".to_string(),
                players: vec![player.id.clone()],
                balance_amount: 1_000_000,
                user: owner_b.id.clone(),
                transfer: false,
            })
            .await;
        assert!(matches!(
            without_flag,
            Err(DomainError::PlayerAlreadyRostered)
        ));

        let poachers = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Poachers".to_string(),
                country: "Spain".to_string(),
                players: vec![player.id.clone()],
                balance_amount: 1_000_000,
                user: owner_b.id,
                transfer: true,
            })
            .await
            .unwrap();

        assert!(poachers.has_player(&player.id));
        assert_eq!(poachers.total_cost, 1_500_000);

        let donor = fixture.teams.find_by_id(&donor.id).await.unwrap().unwrap();
        assert!(!donor.has_player(&player.id));
        assert_eq!(donor.balance_amount, 2_000_000 + 1_500_000);
        assert_eq!(donor.total_cost, 0);
    }

    #[tokio::test]
    async fn detach_credits_each_donor_team_once() {
        let fixture = fixture();
        let owner = seed_user(&fixture).await;
        let a = seed_player(&fixture, 1_000_000).await;
        let b = seed_player(&fixture, 2_000_000).await;
        let keeper = seed_player(&fixture, 1_000_000).await;

        let donor = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Donors".to_string(),
                country: "Italy".to_string(),
                players: vec![a.id.clone(), b.id.clone(), keeper.id.clone()],
                balance_amount: 500_000,
                user: owner.id,
                transfer: false,
            })
            .await
            .unwrap();

        let buyer_owner = {
            let user = User::new(
                "Ana".to_string(),
                "Reyes".to_string(),
                "ana@example.com".to_string(),
                UserRole::User,
                "digest".to_string(),
            );
            fixture.users.save(&user).await.unwrap()
        };

        fixture
            .service
            .create_team(CreateTeamInput {
                name: "Buyers".to_string(),
                country: "Spain".to_string(),
                players: vec![a.id.clone(), b.id.clone()],
                balance_amount: 100_000,
                user: buyer_owner.id,
                transfer: true,
            })
            .await
            .unwrap();

        let donor = fixture.teams.find_by_id(&donor.id).await.unwrap().unwrap();
        // both departures credited in a single save
        assert_eq!(donor.balance_amount, 500_000 + 3_000_000);
        assert_eq!(donor.players, vec![keeper.id]);
        assert_eq!(donor.total_cost, 1_000_000);
    }

    #[tokio::test]
    async fn auto_generated_team_matches_the_configured_squad() {
        let fixture = fixture();
        let user = seed_user(&fixture).await;
        let rules = GameRules::default();

        let team = fixture.service.auto_generate_team(&user.id).await.unwrap();

        assert_eq!(team.players.len(), rules.squad_size());
        assert_eq!(team.balance_amount, rules.starting_balance);
        assert_eq!(team.total_cost, rules.initial_total_cost);

        let roster = fixture.players.find_by_ids(&team.players).await.unwrap();
        let goalkeepers = roster
            .iter()
            .filter(|p| p.role == PlayerRole::Goalkeeper)
            .count();
        let attackers = roster
            .iter()
            .filter(|p| p.role == PlayerRole::Attacker)
            .count();
        assert_eq!(goalkeepers, 3);
        assert_eq!(attackers, 5);
    }

    #[tokio::test]
    async fn update_replaces_roster_wholesale_and_recomputes() {
        let fixture = fixture();
        let user = seed_user(&fixture).await;
        let a = seed_player(&fixture, 1_000_000).await;
        let b = seed_player(&fixture, 4_000_000).await;

        let team = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Rovers".to_string(),
                country: "England".to_string(),
                players: vec![a.id.clone()],
                balance_amount: 1_000_000,
                user: user.id,
                transfer: false,
            })
            .await
            .unwrap();

        let updated = fixture
            .service
            .update_team(
                &team.id,
                TeamPatch {
                    players: Some(vec![b.id.clone()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.players, vec![b.id]);
        assert_eq!(updated.total_cost, 4_000_000);
        assert_eq!(updated.name, "Rovers");
    }

    #[tokio::test]
    async fn empty_roster_patch_leaves_the_roster_untouched() {
        let fixture = fixture();
        let user = seed_user(&fixture).await;
        let a = seed_player(&fixture, 1_000_000).await;

        let team = fixture
            .service
            .create_team(CreateTeamInput {
                name: "Rovers".to_string(),
                country: "England".to_string(),
                players: vec![a.id.clone()],
                balance_amount: 1_000_000,
                user: user.id,
                transfer: false,
            })
            .await
            .unwrap();

        let updated = fixture
            .service
            .update_team(
                &team.id,
                TeamPatch {
                    players: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.players, vec![a.id]);
        assert_eq!(updated.total_cost, 1_000_000);
    }

    #[tokio::test]
    async fn list_teams_filters_by_owner() {
        let fixture = fixture();
        let owner = seed_user(&fixture).await;
        let team = fixture.service.auto_generate_team(&owner.id).await.unwrap();

        let other = {
            let user = User::new(
                "Kim".to_string(),
                "Field".to_string(),
                "kim.field@example.com".to_string(),
                UserRole::User,
                "digest".to_string(),
            );
            fixture.users.save(&user).await.unwrap()
        };
        fixture.service.auto_generate_team(&other.id).await.unwrap();

        let (all, total) = fixture.service.list_teams(None, None, 0, 10).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(all.len(), 2);

        let (mine, count) = fixture
            .service
            .list_teams(None, Some(&owner.id), 0, 10)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(mine[0].id, team.id);
    }

    #[tokio::test]
    async fn update_unknown_team_fails() {
        let fixture = fixture();
        let err = fixture
            .service
            .update_team(&"0".repeat(24), TeamPatch::default())
            .await;
        assert!(matches!(err, Err(DomainError::InvalidId(_))));
    }
}
