use std::env;
use std::time::Duration;

pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    /// Geocoding is disabled when no key is configured
    pub maps_api_key: Option<String>,
    pub maps_geocode_url: String,
    pub maps_timeout_secs: u64,
    pub maps_max_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a number"),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            maps_api_key: env::var("MAPS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            maps_geocode_url: env::var("MAPS_GEOCODE_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODE_URL.to_string()),
            maps_timeout_secs: env::var("MAPS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("MAPS_TIMEOUT_SECS must be a number"),
            maps_max_concurrency: env::var("MAPS_MAX_CONCURRENCY")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .expect("MAPS_MAX_CONCURRENCY must be a number"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn maps_timeout(&self) -> Duration {
        Duration::from_secs(self.maps_timeout_secs)
    }
}
