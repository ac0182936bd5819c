use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::utils::geo::LocationData;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Resolve an address to coordinates
pub async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> AppResult<Json<LocationData>> {
    state
        .maps
        .geocode(&query.address)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No location found for '{}'", query.address)))
}

/// Resolve coordinates to an address
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseGeocodeQuery>,
) -> AppResult<Json<LocationData>> {
    state
        .maps
        .reverse_geocode(query.lat, query.lng)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No address found for these coordinates".to_string()))
}
