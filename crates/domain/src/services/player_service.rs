use crate::entities::{Player, PlayerRole};
use crate::errors::DomainError;
use crate::repositories::PlayerRepository;
use config::GameRules;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreatePlayerInput {
    pub first_name: String,
    pub last_name: String,
    pub role: PlayerRole,
    pub country: String,
    pub age: i32,
    pub market_value: i64,
}

/// Partial update; only present fields change. Whether the caller may touch
/// the restricted fields (role/age/market value) is decided at the HTTP
/// layer - the registry itself is authorization-agnostic.
#[derive(Debug, Clone, Default)]
pub struct PlayerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub role: Option<PlayerRole>,
    pub age: Option<i32>,
    pub market_value: Option<i64>,
}

impl PlayerPatch {
    pub fn touches_restricted_fields(&self) -> bool {
        self.role.is_some() || self.age.is_some() || self.market_value.is_some()
    }
}

/// Player Registry - owns the Player entity lifecycle.
pub struct PlayerService {
    player_repository: Arc<dyn PlayerRepository>,
    rules: GameRules,
}

impl PlayerService {
    pub fn new(player_repository: Arc<dyn PlayerRepository>, rules: GameRules) -> Self {
        Self {
            player_repository,
            rules,
        }
    }

    pub async fn create_player(&self, input: CreatePlayerInput) -> Result<Player, DomainError> {
        let player = Player::new(
            input.first_name,
            input.last_name,
            input.role,
            input.country,
            input.age,
            input.market_value,
        );
        player.validate()?;

        self.player_repository.save(&player).await
    }

    /// Used by team auto-generation.
    pub async fn generate_random_player(&self, role: PlayerRole) -> Result<Player, DomainError> {
        let player = Player::random(role, &self.rules);
        self.player_repository.save(&player).await
    }

    pub async fn update_player(
        &self,
        id: &str,
        patch: PlayerPatch,
    ) -> Result<Player, DomainError> {
        let mut player = self
            .player_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvalidId(id.to_string()))?;

        if let Some(first_name) = patch.first_name {
            player.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            player.last_name = last_name;
        }
        if let Some(country) = patch.country {
            player.country = country.to_lowercase();
        }
        if let Some(role) = patch.role {
            player.role = role;
        }
        if let Some(age) = patch.age {
            player.age = age;
        }
        if let Some(market_value) = patch.market_value {
            player.market_value = market_value;
        }

        player.validate()?;

        self.player_repository.update(&player).await
    }

    pub async fn delete_player(&self, id: &str) -> Result<(), DomainError> {
        self.player_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvalidId(id.to_string()))?;

        self.player_repository.delete(id).await
    }

    /// Paged listing; an explicit id narrows the page to that player.
    pub async fn list_players(
        &self,
        id: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Player>, i64), DomainError> {
        if let Some(id) = id {
            let players: Vec<Player> =
                self.player_repository.find_by_id(id).await?.into_iter().collect();
            let count = players.len() as i64;
            return Ok((players, count));
        }

        let players = self.player_repository.find_page(skip, limit).await?;
        let count = self.player_repository.count().await?;
        Ok((players, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryPlayerRepository;

    fn service() -> PlayerService {
        PlayerService::new(
            Arc::new(InMemoryPlayerRepository::default()),
            GameRules::default(),
        )
    }

    fn input() -> CreatePlayerInput {
        CreatePlayerInput {
            first_name: "Jonas".to_string(),
            last_name: "Kovac".to_string(),
            role: PlayerRole::Midfielder,
            country: "Croatia".to_string(),
            age: 27,
            market_value: 2_500_000,
        }
    }

    #[tokio::test]
    async fn create_persists_and_lowercases_country() {
        let service = service();
        let player = service.create_player(input()).await.unwrap();
        assert_eq!(player.country, "croatia");

        let (found, count) = service.list_players(Some(&player.id), 0, 10).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(found[0].id, player.id);
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_age() {
        let service = service();
        let mut bad = input();
        bad.age = 41;
        assert!(matches!(
            service.create_player(bad).await,
            Err(DomainError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn update_unknown_id_fails() {
        let service = service();
        let err = service
            .update_player("0".repeat(24).as_str(), PlayerPatch::default())
            .await;
        assert!(matches!(err, Err(DomainError::InvalidId(_))));
    }

    #[tokio::test]
    async fn patch_changes_only_present_fields() {
        let service = service();
        let player = service.create_player(input()).await.unwrap();

        let patch = PlayerPatch {
            market_value: Some(3_000_000),
            ..Default::default()
        };
        let updated = service.update_player(&player.id, patch).await.unwrap();

        assert_eq!(updated.market_value, 3_000_000);
        assert_eq!(updated.first_name, player.first_name);
        assert_eq!(updated.age, player.age);
    }

    #[tokio::test]
    async fn deleted_player_disappears_from_reads() {
        let service = service();
        let player = service.create_player(input()).await.unwrap();
        service.delete_player(&player.id).await.unwrap();

        let (found, count) = service.list_players(Some(&player.id), 0, 10).await.unwrap();
        assert!(found.is_empty());
        assert_eq!(count, 0);

        // repeated delete reports the missing id
        assert!(matches!(
            service.delete_player(&player.id).await,
            Err(DomainError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn generated_player_is_persisted_at_baseline_value() {
        let service = service();
        let rules = GameRules::default();

        let player = service
            .generate_random_player(PlayerRole::Goalkeeper)
            .await
            .unwrap();
        assert_eq!(player.role, PlayerRole::Goalkeeper);
        assert_eq!(player.market_value, rules.base_market_value);

        let (found, count) = service.list_players(Some(&player.id), 0, 10).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(found[0].id, player.id);
    }

    #[tokio::test]
    async fn pages_come_back_newest_first() {
        let service = service();
        let older = service.create_player(input()).await.unwrap();
        let mut second = input();
        second.first_name = "Pavel".to_string();
        let newer = service.create_player(second).await.unwrap();

        let (page, count) = service.list_players(None, 0, 10).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(page[0].id, newer.id);
        assert_eq!(page[1].id, older.id);
    }

    #[tokio::test]
    async fn restricted_field_detection() {
        assert!(!PlayerPatch::default().touches_restricted_fields());
        let patch = PlayerPatch {
            age: Some(30),
            ..Default::default()
        };
        assert!(patch.touches_restricted_fields());
    }
}
