use crate::entities::Team;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Persistence port for teams and their rosters. Saving a team persists the
/// roster wholesale (the stored row set is replaced by `team.players`).
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Team>, DomainError>;
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Team>, DomainError>;
    /// The team currently rostering `player_id`, if any.
    async fn find_holding_player(&self, player_id: &str) -> Result<Option<Team>, DomainError>;
    /// All teams rostering any of `player_ids`, optionally excluding teams
    /// owned by `excluding_user`.
    async fn find_teams_holding_any(
        &self,
        player_ids: &[String],
        excluding_user: Option<&str>,
    ) -> Result<Vec<Team>, DomainError>;
    async fn find_ids_by_name(&self, name: &str) -> Result<Vec<String>, DomainError>;
    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<Team>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    async fn save(&self, team: &Team) -> Result<Team, DomainError>;
    async fn update(&self, team: &Team) -> Result<Team, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
