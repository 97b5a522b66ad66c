use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sql_query;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const BOOTSTRAP_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS players (
        id TEXT PRIMARY KEY NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        role TEXT NOT NULL,
        country TEXT NOT NULL,
        age INTEGER NOT NULL,
        market_value BIGINT NOT NULL,
        deleted BOOLEAN NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS teams (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        country TEXT NOT NULL,
        user_id TEXT,
        total_cost BIGINT NOT NULL,
        balance_amount BIGINT NOT NULL,
        deleted BOOLEAN NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS team_players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        team_id TEXT NOT NULL,
        player_id TEXT NOT NULL,
        position INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_team_players_player ON team_players (player_id)",
    "CREATE INDEX IF NOT EXISTS idx_team_players_team ON team_players (team_id)",
    "CREATE TABLE IF NOT EXISTS transfer_listings (
        id TEXT PRIMARY KEY NOT NULL,
        player_id TEXT NOT NULL,
        team_id TEXT,
        asking_price BIGINT NOT NULL,
        deleted BOOLEAN NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_listings_player ON transfer_listings (player_id)",
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        role TEXT NOT NULL,
        password_digest TEXT NOT NULL,
        deleted BOOLEAN NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_users_email ON users (email)",
    "CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL,
        access_token TEXT NOT NULL,
        refresh_token TEXT NOT NULL,
        access_valid_till TIMESTAMP NOT NULL,
        refresh_valid_till TIMESTAMP NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_sessions_access ON sessions (access_token)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_refresh ON sessions (refresh_token)",
];

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(database_path: &str) -> Self {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .build(manager)
            .expect("Failed to create SQLite connection pool");

        let mut conn = pool.get().expect("Failed to borrow a bootstrap connection");
        for statement in BOOTSTRAP_SQL {
            sql_query(*statement)
                .execute(&mut conn)
                .expect("Failed to bootstrap database schema");
        }
        drop(conn);

        Database { pool }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
