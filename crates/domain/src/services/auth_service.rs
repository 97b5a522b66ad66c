use crate::auth::Principal;
use crate::entities::{Session, Team, User, UserRole};
use crate::errors::DomainError;
use crate::password;
use crate::repositories::{SessionRepository, UserRepository};
use crate::services::TeamService;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_ACCESS_TTL_SECS: i64 = 3600;
pub const DEFAULT_REFRESH_TTL_SECS: i64 = 30 * 24 * 3600;

#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// What a successful sign-up/sign-in hands back to the HTTP layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    pub user: User,
    pub team: Option<Team>,
    pub session: Session,
}

/// IAM service: account creation, credential checks, session lifecycle.
/// Password hashing lives here (not in a storage hook) so the side effect is
/// explicit and testable.
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
    team_service: Arc<TeamService>,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl AuthService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_repository: Arc<dyn SessionRepository>,
        team_service: Arc<TeamService>,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            team_service,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Register an account, auto-generate its team, open a session.
    pub async fn sign_up(&self, input: SignUpInput) -> Result<SignedIn, DomainError> {
        let email = input.email.to_lowercase();

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyRegistered);
        }

        let user = User::new(
            input.first_name,
            input.last_name,
            email,
            UserRole::User,
            password::hash(&input.password),
        );
        user.validate()?;
        let user = self.user_repository.save(&user).await?;

        let team = self.team_service.auto_generate_team(&user.id).await?;
        let session = self.open_session(&user.id).await?;

        Ok(SignedIn {
            user,
            team: Some(team),
            session,
        })
    }

    pub async fn sign_in(&self, email: &str, raw_password: &str) -> Result<SignedIn, DomainError> {
        let user = self
            .user_repository
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(DomainError::InvalidEmail)?;

        if !password::verify(raw_password, &user.password_digest) {
            return Err(DomainError::InvalidCredentials);
        }

        let team = self.team_service.team_of_user(&user.id).await?;
        let session = self.open_session(&user.id).await?;

        Ok(SignedIn {
            user,
            team,
            session,
        })
    }

    /// Rotate a session: the presented refresh token (and its access token)
    /// is invalidated and a fresh pair is issued.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<SignedIn, DomainError> {
        let now = Utc::now();

        let mut session = self
            .session_repository
            .find_by_refresh_token(refresh_token)
            .await?
            .filter(|s| s.is_refresh_valid(now))
            .ok_or(DomainError::InvalidRefreshToken)?;

        let user = self
            .user_repository
            .find_by_id(&session.user)
            .await?
            .ok_or(DomainError::InvalidRefreshToken)?;

        session.access_valid_till = now;
        session.refresh_valid_till = now;
        self.session_repository.update(&session).await?;

        let session = self.open_session(&user.id).await?;

        Ok(SignedIn {
            user,
            team: None,
            session,
        })
    }

    /// Resolve a bearer access token to a principal.
    pub async fn authenticate(&self, access_token: &str) -> Result<Principal, DomainError> {
        let session = self
            .session_repository
            .find_by_access_token(access_token)
            .await?
            .filter(|s| s.is_access_valid(Utc::now()))
            .ok_or(DomainError::AuthenticationFailed)?;

        let user = self
            .user_repository
            .find_by_id(&session.user)
            .await?
            .ok_or(DomainError::AuthenticationFailed)?;

        Ok(Principal {
            user_id: user.id,
            role: user.role,
        })
    }

    async fn open_session(&self, user_id: &str) -> Result<Session, DomainError> {
        let session = Session::open(
            user_id.to_string(),
            self.access_ttl_secs,
            self.refresh_ttl_secs,
        );
        self.session_repository.save(&session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        InMemoryPlayerRepository, InMemorySessionRepository, InMemoryTeamRepository,
        InMemoryUserRepository,
    };
    use config::GameRules;

    fn service() -> AuthService {
        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let players = Arc::new(InMemoryPlayerRepository::default());
        let player_service = Arc::new(crate::PlayerService::new(
            players.clone(),
            GameRules::default(),
        ));
        let team_service = Arc::new(TeamService::new(
            Arc::new(InMemoryTeamRepository::default()),
            players,
            users.clone(),
            player_service,
            GameRules::default(),
        ));
        AuthService::new(
            users,
            sessions,
            team_service,
            DEFAULT_ACCESS_TTL_SECS,
            DEFAULT_REFRESH_TTL_SECS,
        )
    }

    fn input() -> SignUpInput {
        SignUpInput {
            first_name: "Robin".to_string(),
            last_name: "Hale".to_string(),
            email: "Robin.Hale@Example.com".to_string(),
            password: "letmein".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_builds_a_full_squad_and_session() {
        let service = service();
        let rules = GameRules::default();

        let signed = service.sign_up(input()).await.unwrap();

        assert_eq!(signed.user.email, "robin.hale@example.com");
        assert_eq!(signed.user.role, UserRole::User);
        let team = signed.team.unwrap();
        assert_eq!(team.players.len(), rules.squad_size());
        assert_eq!(team.balance_amount, rules.starting_balance);

        let principal = service.authenticate(&signed.session.access_token).await.unwrap();
        assert_eq!(principal.user_id, signed.user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let service = service();
        service.sign_up(input()).await.unwrap();

        let mut again = input();
        again.email = "ROBIN.HALE@example.COM".to_string();
        assert!(matches!(
            service.sign_up(again).await,
            Err(DomainError::EmailAlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn sign_in_checks_credentials() {
        let service = service();
        service.sign_up(input()).await.unwrap();

        let signed = service
            .sign_in("robin.hale@example.com", "letmein")
            .await
            .unwrap();
        assert!(signed.team.is_some());

        assert!(matches!(
            service.sign_in("robin.hale@example.com", "wrong").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            service.sign_in("nobody@example.com", "letmein").await,
            Err(DomainError::InvalidEmail)
        ));
    }

    #[tokio::test]
    async fn refresh_rotates_and_invalidates_the_old_token() {
        let service = service();
        let signed = service.sign_up(input()).await.unwrap();
        let old_refresh = signed.session.refresh_token.clone();
        let old_access = signed.session.access_token.clone();

        let refreshed = service.refresh_session(&old_refresh).await.unwrap();
        assert_ne!(refreshed.session.refresh_token, old_refresh);

        // the old pair is dead
        assert!(matches!(
            service.refresh_session(&old_refresh).await,
            Err(DomainError::InvalidRefreshToken)
        ));
        assert!(matches!(
            service.authenticate(&old_access).await,
            Err(DomainError::AuthenticationFailed)
        ));

        // the new access token works
        assert!(service
            .authenticate(&refreshed.session.access_token)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn garbage_tokens_fail() {
        let service = service();
        assert!(matches!(
            service.authenticate("nope").await,
            Err(DomainError::AuthenticationFailed)
        ));
        assert!(matches!(
            service.refresh_session("nope").await,
            Err(DomainError::InvalidRefreshToken)
        ));
    }
}
