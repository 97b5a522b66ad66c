use crate::auth::Principal;
use crate::errors::DomainError;
use crate::repositories::{ListingRepository, PlayerRepository, TeamRepository};
use crate::services::TeamService;
use config::GameRules;
use rand::Rng;
use std::sync::Arc;

/// Transfer Execution Engine - moves a listed player into a destination
/// team. All validation happens before the first write; once mutation begins
/// the steps run strictly in order (value appreciation, depart, join,
/// delist) with no rollback, matching the system's accepted failure model.
pub struct TransferService {
    listing_repository: Arc<dyn ListingRepository>,
    player_repository: Arc<dyn PlayerRepository>,
    team_repository: Arc<dyn TeamRepository>,
    team_service: Arc<TeamService>,
    rules: GameRules,
}

impl TransferService {
    pub fn new(
        listing_repository: Arc<dyn ListingRepository>,
        player_repository: Arc<dyn PlayerRepository>,
        team_repository: Arc<dyn TeamRepository>,
        team_service: Arc<TeamService>,
        rules: GameRules,
    ) -> Self {
        Self {
            listing_repository,
            player_repository,
            team_repository,
            team_service,
            rules,
        }
    }

    pub async fn execute_transfer(
        &self,
        player_id: &str,
        principal: &Principal,
        destination_team_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let listing = self
            .listing_repository
            .find_active_by_player(player_id)
            .await?
            .ok_or(DomainError::PlayerNotTransferable)?;

        // Destination resolution: admins name the team, users always buy
        // into their own. A destination already holding the player resolves
        // to nothing.
        let destination = if principal.is_admin() {
            let team_id = destination_team_id.ok_or(DomainError::TeamIdRequired)?;
            self.team_repository
                .find_by_id(team_id)
                .await?
                .filter(|team| !team.has_player(player_id))
        } else {
            self.team_repository
                .find_by_user(&principal.user_id)
                .await?
                .filter(|team| !team.has_player(player_id))
        };
        let mut destination = destination.ok_or(DomainError::InvalidTeamId)?;

        if destination.balance_amount < listing.asking_price {
            return Err(DomainError::InsufficientFunds);
        }

        // Step 4: appreciate the player's market value. Persisted first and
        // never rolled back.
        self.increment_market_value(player_id).await?;

        // Step 5: depart the current team, crediting the asking price (not
        // the appreciated value). A free agent skips this entirely.
        if let Some(mut current) = self.team_repository.find_holding_player(player_id).await? {
            current.remove_player(player_id);
            current.balance_amount += listing.asking_price;
            self.team_service.persist_roster_change(current, false).await?;
        }

        // Step 6: join the destination, debiting the asking price. The
        // recompute folds in the already-appreciated value here, while the
        // origin recompute above no longer saw the player at all - that
        // asymmetry is part of the observable contract.
        destination.players.push(player_id.to_string());
        destination.balance_amount -= listing.asking_price;
        self.team_service
            .persist_roster_change(destination, false)
            .await?;

        // Step 7: close the listing.
        self.listing_repository.delete(&listing.id).await?;

        Ok(())
    }

    async fn increment_market_value(&self, player_id: &str) -> Result<(), DomainError> {
        let mut player = self
            .player_repository
            .find_by_id(player_id)
            .await?
            .ok_or(DomainError::InvalidPlayerId)?;

        let pct = self.draw_increment_pct();
        player.market_value =
            (player.market_value as f64 * (1.0 + pct as f64 / 100.0)).round() as i64;

        self.player_repository.update(&player).await?;
        Ok(())
    }

    fn draw_increment_pct(&self) -> u32 {
        let range = self.rules.player_increment_percentage_range;
        rand::thread_rng().gen_range(range.min..=range.max)
    }
}
