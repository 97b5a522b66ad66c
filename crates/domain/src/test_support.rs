//! In-memory repository implementations backing the service tests.

use crate::entities::{Player, Session, Team, TransferListing, User};
use crate::errors::DomainError;
use crate::repositories::{
    ListingRepository, ListingSearchCriteria, PlayerRepository, SessionRepository,
    TeamRepository, UserRepository,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryPlayerRepository {
    rows: Mutex<Vec<Player>>,
    deleted: Mutex<HashSet<String>>,
}

impl InMemoryPlayerRepository {
    fn live(&self) -> Vec<Player> {
        let deleted = self.deleted.lock().unwrap();
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !deleted.contains(&p.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, DomainError> {
        Ok(self.live().into_iter().find(|p| p.id == id))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Player>, DomainError> {
        Ok(self.live().into_iter().filter(|p| ids.contains(&p.id)).collect())
    }

    async fn find_ids_matching(
        &self,
        name: Option<&str>,
        country: Option<&str>,
    ) -> Result<Vec<String>, DomainError> {
        Ok(self
            .live()
            .into_iter()
            .filter(|p| match name {
                Some(n) => p.first_name == n || p.last_name == n,
                None => true,
            })
            .filter(|p| match country {
                Some(c) => p.country == c,
                None => true,
            })
            .map(|p| p.id)
            .collect())
    }

    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<Player>, DomainError> {
        Ok(self
            .live()
            .into_iter()
            .rev() // newest first
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.live().len() as i64)
    }

    async fn save(&self, player: &Player) -> Result<Player, DomainError> {
        self.rows.lock().unwrap().push(player.clone());
        Ok(player.clone())
    }

    async fn update(&self, player: &Player) -> Result<Player, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == player.id) {
            Some(row) => {
                *row = player.clone();
                Ok(player.clone())
            }
            None => Err(DomainError::RepositoryError("player missing".to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.deleted.lock().unwrap().insert(id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTeamRepository {
    rows: Mutex<Vec<Team>>,
    deleted: Mutex<HashSet<String>>,
}

impl InMemoryTeamRepository {
    fn live(&self) -> Vec<Team> {
        let deleted = self.deleted.lock().unwrap();
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !deleted.contains(&t.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Team>, DomainError> {
        Ok(self.live().into_iter().find(|t| t.id == id))
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<Team>, DomainError> {
        Ok(self
            .live()
            .into_iter()
            .find(|t| t.user.as_deref() == Some(user_id)))
    }

    async fn find_holding_player(&self, player_id: &str) -> Result<Option<Team>, DomainError> {
        Ok(self.live().into_iter().find(|t| t.has_player(player_id)))
    }

    async fn find_teams_holding_any(
        &self,
        player_ids: &[String],
        excluding_user: Option<&str>,
    ) -> Result<Vec<Team>, DomainError> {
        Ok(self
            .live()
            .into_iter()
            .filter(|t| t.players.iter().any(|p| player_ids.contains(p)))
            .filter(|t| match excluding_user {
                Some(user) => t.user.as_deref() != Some(user),
                None => true,
            })
            .collect())
    }

    async fn find_ids_by_name(&self, name: &str) -> Result<Vec<String>, DomainError> {
        Ok(self
            .live()
            .into_iter()
            .filter(|t| t.name == name)
            .map(|t| t.id)
            .collect())
    }

    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<Team>, DomainError> {
        Ok(self
            .live()
            .into_iter()
            .rev() // newest first
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.live().len() as i64)
    }

    async fn save(&self, team: &Team) -> Result<Team, DomainError> {
        self.rows.lock().unwrap().push(team.clone());
        Ok(team.clone())
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|t| t.id == team.id) {
            Some(row) => {
                *row = team.clone();
                Ok(team.clone())
            }
            None => Err(DomainError::RepositoryError("team missing".to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.deleted.lock().unwrap().insert(id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryListingRepository {
    rows: Mutex<Vec<TransferListing>>,
    deleted: Mutex<HashSet<String>>,
}

impl InMemoryListingRepository {
    fn live(&self) -> Vec<TransferListing> {
        let deleted = self.deleted.lock().unwrap();
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| !deleted.contains(&l.id))
            .cloned()
            .collect()
    }

    fn matching(&self, criteria: &ListingSearchCriteria) -> Vec<TransferListing> {
        self.live()
            .into_iter()
            .filter(|l| matches(l, criteria))
            .collect()
    }
}

fn matches(listing: &TransferListing, criteria: &ListingSearchCriteria) -> bool {
    if let Some(id) = &criteria.id {
        if listing.id != *id {
            return false;
        }
    }
    if let Some(min) = criteria.min_asking_price {
        if listing.asking_price < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_asking_price {
        if listing.asking_price > max {
            return false;
        }
    }
    if let Some(player_ids) = &criteria.player_ids {
        if !player_ids.contains(&listing.player) {
            return false;
        }
    }
    if let Some(team_ids) = &criteria.team_ids {
        match &listing.team {
            Some(team) if team_ids.contains(team) => {}
            _ => return false,
        }
    }
    true
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<TransferListing>, DomainError> {
        Ok(self.live().into_iter().find(|l| l.id == id))
    }

    async fn find_active_by_player(
        &self,
        player_id: &str,
    ) -> Result<Option<TransferListing>, DomainError> {
        Ok(self.live().into_iter().find(|l| l.player == player_id))
    }

    async fn search(
        &self,
        criteria: &ListingSearchCriteria,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TransferListing>, DomainError> {
        Ok(self
            .matching(criteria)
            .into_iter()
            .rev() // newest first
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, criteria: &ListingSearchCriteria) -> Result<i64, DomainError> {
        Ok(self.matching(criteria).len() as i64)
    }

    async fn save(&self, listing: &TransferListing) -> Result<TransferListing, DomainError> {
        self.rows.lock().unwrap().push(listing.clone());
        Ok(listing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.deleted.lock().unwrap().insert(id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
    deleted: Mutex<HashSet<String>>,
}

impl InMemoryUserRepository {
    fn live(&self) -> Vec<User> {
        let deleted = self.deleted.lock().unwrap();
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| !deleted.contains(&u.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.live().into_iter().find(|u| u.id == id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.live().into_iter().find(|u| u.email == email))
    }

    async fn find_page(&self, skip: i64, limit: i64) -> Result<Vec<User>, DomainError> {
        Ok(self
            .live()
            .into_iter()
            .rev() // newest first
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.live().len() as i64)
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        self.rows.lock().unwrap().push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(user.clone())
            }
            None => Err(DomainError::RepositoryError("user missing".to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.deleted.lock().unwrap().insert(id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    rows: Mutex<Vec<Session>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<Session, DomainError> {
        self.rows.lock().unwrap().push(session.clone());
        Ok(session.clone())
    }

    async fn find_by_access_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.access_token == token)
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<Session>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.refresh_token == token)
            .cloned())
    }

    async fn update(&self, session: &Session) -> Result<Session, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|s| s.id == session.id) {
            Some(row) => {
                *row = session.clone();
                Ok(session.clone())
            }
            None => Err(DomainError::RepositoryError("session missing".to_string())),
        }
    }
}
