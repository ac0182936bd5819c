use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{fares, geocode, vehicles};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Vehicle listing and checkout quotes
    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles))
        .route("/{id}", get(vehicles::get_vehicle))
        .route("/{id}/fare", get(vehicles::vehicle_fare));

    // Stateless fare and distance calculations
    let fare_routes = Router::new()
        .route("/fares/estimate", post(fares::estimate))
        .route("/distance", post(fares::distance));

    // Geocoding proxy
    let geocode_routes = Router::new()
        .route("/", get(geocode::geocode))
        .route("/reverse", get(geocode::reverse_geocode));

    Router::new()
        .nest("/api/vehicles", vehicle_routes)
        .nest("/api/geocode", geocode_routes)
        .nest("/api", fare_routes)
        .with_state(state)
}
