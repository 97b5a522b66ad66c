use crate::auth::Principal;
use crate::entities::{PopulatedListing, Team, TransferListing};
use crate::errors::DomainError;
use crate::repositories::{
    ListingRepository, ListingSearchCriteria, PlayerRepository, TeamRepository,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Query surface of the market search endpoint. All filters AND together;
/// player name is an exact, case-sensitive match against first or last name.
#[derive(Debug, Clone, Default)]
pub struct MarketSearchFilters {
    pub id: Option<String>,
    pub min_asking_price: Option<i64>,
    pub max_asking_price: Option<i64>,
    pub player_name: Option<String>,
    pub country: Option<String>,
    pub team_name: Option<String>,
}

/// Transfer Market - owns the listing lifecycle and the query surface.
pub struct MarketService {
    listing_repository: Arc<dyn ListingRepository>,
    player_repository: Arc<dyn PlayerRepository>,
    team_repository: Arc<dyn TeamRepository>,
}

impl MarketService {
    pub fn new(
        listing_repository: Arc<dyn ListingRepository>,
        player_repository: Arc<dyn PlayerRepository>,
        team_repository: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            listing_repository,
            player_repository,
            team_repository,
        }
    }

    /// Put a player up for sale. Non-admin callers must own the player's
    /// team; a free agent may be listed by any authenticated caller.
    pub async fn list_player(
        &self,
        player_id: &str,
        asking_price: i64,
        principal: &Principal,
    ) -> Result<PopulatedListing, DomainError> {
        let player = self
            .player_repository
            .find_by_id(player_id)
            .await?
            .ok_or(DomainError::InvalidPlayerId)?;

        if self
            .listing_repository
            .find_active_by_player(player_id)
            .await?
            .is_some()
        {
            return Err(DomainError::PlayerAlreadyListed);
        }

        let team = self.team_repository.find_holding_player(player_id).await?;

        if let Some(team) = &team {
            if !principal.is_admin() && team.user.as_deref() != Some(principal.user_id.as_str()) {
                return Err(DomainError::Unauthorized);
            }
        }

        let listing = TransferListing::new(
            player_id.to_string(),
            team.as_ref().map(|t| t.id.clone()),
            asking_price,
        );
        let saved = self.listing_repository.save(&listing).await?;

        Ok(PopulatedListing::new(saved, Some(player), team))
    }

    /// AND-combined filter search with skip/limit paging. Returns the page
    /// (newest first) plus the total match count, each listing populated
    /// with its player and team.
    pub async fn search(
        &self,
        filters: MarketSearchFilters,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<PopulatedListing>, i64), DomainError> {
        let mut criteria = ListingSearchCriteria {
            id: filters.id,
            min_asking_price: filters.min_asking_price,
            max_asking_price: filters.max_asking_price,
            ..Default::default()
        };

        if filters.player_name.is_some() || filters.country.is_some() {
            let country = filters.country.map(|c| c.to_lowercase());
            let player_ids = self
                .player_repository
                .find_ids_matching(filters.player_name.as_deref(), country.as_deref())
                .await?;
            criteria.player_ids = Some(player_ids);
        }

        if let Some(team_name) = &filters.team_name {
            let team_ids = self.team_repository.find_ids_by_name(team_name).await?;
            criteria.team_ids = Some(team_ids);
        }

        let listings = self.listing_repository.search(&criteria, skip, limit).await?;
        let total = self.listing_repository.count(&criteria).await?;

        Ok((self.populate(listings).await?, total))
    }

    pub async fn delist(&self, id: &str) -> Result<(), DomainError> {
        self.listing_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvalidId(id.to_string()))?;

        self.listing_repository.delete(id).await
    }

    async fn populate(
        &self,
        listings: Vec<TransferListing>,
    ) -> Result<Vec<PopulatedListing>, DomainError> {
        let player_ids: Vec<String> = listings.iter().map(|l| l.player.clone()).collect();
        let players: HashMap<String, _> = self
            .player_repository
            .find_by_ids(&player_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let mut teams: HashMap<String, Team> = HashMap::new();
        for listing in &listings {
            if let Some(team_id) = &listing.team {
                if !teams.contains_key(team_id) {
                    if let Some(team) = self.team_repository.find_by_id(team_id).await? {
                        teams.insert(team_id.clone(), team);
                    }
                }
            }
        }

        Ok(listings
            .into_iter()
            .map(|listing| {
                let player = players.get(&listing.player).cloned();
                let team = listing.team.as_ref().and_then(|id| teams.get(id).cloned());
                PopulatedListing::new(listing, player, team)
            })
            .collect())
    }
}
