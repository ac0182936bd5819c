pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod maps;
pub mod middleware;
pub mod pricing;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use maps::MapsClient;
pub use pricing::{resolve_fare, FareQuote, PricingTable};
pub use utils::geo::{distance_between, LocationData};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Config,
    pub maps: Arc<MapsClient>,
}
