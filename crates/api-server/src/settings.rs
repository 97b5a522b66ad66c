use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Config {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "fantasy.db".to_string()),

            api_host: env::var("API_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            access_ttl_secs: env::var("ACCESS_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),

            refresh_ttl_secs: env::var("REFRESH_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "2592000".to_string())
                .parse()
                .unwrap_or(2_592_000),
        }
    }
}
