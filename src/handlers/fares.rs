use axum::{extract::State, Json};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::vehicle;
use crate::entities::vehicle_pricing::TripType;
use crate::error::{AppError, AppResult};
use crate::handlers::vehicles::load_pricing;
use crate::pricing::{resolve_fare, FareQuote, PricingTable};
use crate::utils::geo::{distance_between, LocationData};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub vehicle_id: Option<Uuid>,
    pub pricing: Option<PricingTable>,
    pub origin: Option<LocationData>,
    pub destination: Option<LocationData>,
    /// Overrides the straight-line distance between origin and destination
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub trip_type: TripType,
}

#[derive(Debug, Serialize)]
pub struct FareResponse {
    pub vehicle_id: Option<Uuid>,
    pub distance_km: f64,
    pub trip_type: TripType,
    pub fare: FareQuote,
}

/// Estimate a fare from a stored vehicle or an inline pricing table
pub async fn estimate(
    State(state): State<AppState>,
    Json(payload): Json<EstimateRequest>,
) -> AppResult<Json<FareResponse>> {
    let pricing = match (payload.vehicle_id, payload.pricing) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "Provide either vehicle_id or pricing, not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either vehicle_id or pricing is required".to_string(),
            ));
        }
        (Some(id), None) => {
            let vehicle = vehicle::Entity::find_by_id(id)
                .one(state.db.as_ref())
                .await?
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
            load_pricing(state.db.as_ref(), &vehicle).await?
        }
        (None, Some(table)) => Some(table),
    };

    let distance_km = match (payload.distance_km, &payload.origin, &payload.destination) {
        (Some(distance_km), _, _) => distance_km,
        (None, Some(origin), Some(destination)) => {
            distance_between(Some(origin), Some(destination))
        }
        (None, _, _) => {
            return Err(AppError::BadRequest(
                "Either distance_km or both origin and destination are required".to_string(),
            ));
        }
    };

    let fare = resolve_fare(pricing.as_ref(), distance_km, payload.trip_type);

    tracing::debug!(
        vehicle_id = ?payload.vehicle_id,
        distance_km,
        trip_type = payload.trip_type.as_str(),
        price = fare.price,
        valid = fare.is_valid,
        "Fare estimated"
    );

    Ok(Json(FareResponse {
        vehicle_id: payload.vehicle_id,
        distance_km,
        trip_type: payload.trip_type,
        fare,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub origin: Option<LocationData>,
    pub destination: Option<LocationData>,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

/// Great-circle distance between two points
pub async fn distance(Json(payload): Json<DistanceRequest>) -> Json<DistanceResponse> {
    Json(DistanceResponse {
        distance_km: distance_between(payload.origin.as_ref(), payload.destination.as_ref()),
    })
}
