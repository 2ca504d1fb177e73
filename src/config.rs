use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub session_duration_hours: i64,
    /// Marks the auth cookie Secure and SameSite=None for cross-site clients
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
    /// Window scanned ahead of now for expiring-soon notifications
    pub expiry_lookahead_days: i64,
    pub expiry_scan_interval_secs: u64,
    pub chat_api_key: Option<String>,
    pub chat_api_base: String,
    pub chat_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://larder.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let jwt_secret = env::var("JWT_ACCESS_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?;

        let session_duration_hours = env::var("SESSION_DURATION_HOURS")
            .unwrap_or_else(|_| "720".to_string())
            .parse()
            .unwrap_or(720);

        let cookie_secure = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let expiry_lookahead_days = env::var("EXPIRY_LOOKAHEAD_DAYS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .unwrap_or(3);

        let expiry_scan_interval_secs = env::var("EXPIRY_SCAN_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        let chat_api_key = env::var("OPENAI_API_KEY").ok();

        let chat_api_base = env::var("CHAT_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let chat_model = env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Config {
            database_url,
            server_host,
            server_port,
            jwt_secret,
            session_duration_hours,
            cookie_secure,
            cors_origins,
            expiry_lookahead_days,
            expiry_scan_interval_secs,
            chat_api_key,
            chat_api_base,
            chat_model,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_ACCESS_SECRET environment variable not set")]
    MissingJwtSecret,

    #[error("Invalid port number")]
    InvalidPort,
}
