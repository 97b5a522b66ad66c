use config::GameRules;
use domain::*;
use infrastructure::*;
use std::sync::Arc;

/// Fantasy League Application - wires pool, repositories and services.
pub struct FantasyApp {
    pub player_service: Arc<PlayerService>,
    pub team_service: Arc<TeamService>,
    pub market_service: MarketService,
    pub transfer_service: TransferService,
    pub user_service: UserService,
    pub auth_service: AuthService,
}

impl FantasyApp {
    pub fn new(database_path: &str) -> Self {
        Self::new_with_config(
            database_path,
            GameRules::from_env(),
            DEFAULT_ACCESS_TTL_SECS,
            DEFAULT_REFRESH_TTL_SECS,
        )
    }

    pub fn new_with_config(
        database_path: &str,
        rules: GameRules,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        // Infrastructure layer - database setup
        let database = Database::new(database_path);
        let pool = database.get_pool().clone();

        // Create repository implementations
        let player_repository: Arc<dyn PlayerRepository> =
            Arc::new(SqlitePlayerRepository::new(pool.clone()));
        let team_repository: Arc<dyn TeamRepository> =
            Arc::new(SqliteTeamRepository::new(pool.clone()));
        let listing_repository: Arc<dyn ListingRepository> =
            Arc::new(SqliteListingRepository::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(pool.clone()));
        let session_repository: Arc<dyn SessionRepository> =
            Arc::new(SqliteSessionRepository::new(pool));

        // Domain services
        let player_service = Arc::new(PlayerService::new(player_repository.clone(), rules.clone()));

        let team_service = Arc::new(TeamService::new(
            team_repository.clone(),
            player_repository.clone(),
            user_repository.clone(),
            player_service.clone(),
            rules.clone(),
        ));

        let market_service = MarketService::new(
            listing_repository.clone(),
            player_repository.clone(),
            team_repository.clone(),
        );

        let transfer_service = TransferService::new(
            listing_repository,
            player_repository,
            team_repository,
            team_service.clone(),
            rules,
        );

        let user_service = UserService::new(user_repository.clone());

        let auth_service = AuthService::new(
            user_repository,
            session_repository,
            team_service.clone(),
            access_ttl_secs,
            refresh_ttl_secs,
        );

        Self {
            player_service,
            team_service,
            market_service,
            transfer_service,
            user_service,
            auth_service,
        }
    }
}
