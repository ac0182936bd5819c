use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::vehicle::{self, VehicleCategory};
use crate::entities::vehicle_pricing::{self, TripType};
use crate::error::{AppError, AppResult};
use crate::handlers::fares::FareResponse;
use crate::pricing::{resolve_fare, FareQuote, PricingTable};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListVehiclesQuery {
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub trip_type: TripType,
}

#[derive(Debug, Deserialize)]
pub struct VehicleFareQuery {
    pub distance_km: f64,
    #[serde(default)]
    pub trip_type: TripType,
}

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub category: VehicleCategory,
    pub vehicle_type: String,
    pub seats: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<FareQuote>,
}

impl VehicleResponse {
    fn new(v: vehicle::Model, fare: Option<FareQuote>) -> Self {
        Self {
            id: v.id,
            name: v.name,
            category: v.category,
            vehicle_type: v.vehicle_type,
            seats: v.seats,
            is_available: v.is_available,
            created_at: v.created_at.with_timezone(&Utc),
            fare,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub pricing: Option<PricingTable>,
}

/// Load the pricing table matching a vehicle's category and type
pub async fn load_pricing(
    db: &DatabaseConnection,
    vehicle: &vehicle::Model,
) -> AppResult<Option<PricingTable>> {
    let records = vehicle_pricing::Entity::find()
        .filter(vehicle_pricing::Column::Category.eq(vehicle.category))
        .filter(vehicle_pricing::Column::VehicleType.eq(&vehicle.vehicle_type))
        .all(db)
        .await?;

    Ok(PricingTable::from_records(
        vehicle.category,
        &vehicle.vehicle_type,
        &records,
    ))
}

async fn find_vehicle(db: &DatabaseConnection, id: Uuid) -> AppResult<vehicle::Model> {
    vehicle::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
}

/// List available vehicles, quoting each one when a distance is given
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ListVehiclesQuery>,
) -> AppResult<Json<Vec<VehicleResponse>>> {
    let vehicles = vehicle::Entity::find()
        .filter(vehicle::Column::IsAvailable.eq(true))
        .order_by_asc(vehicle::Column::Name)
        .all(state.db.as_ref())
        .await?;

    let Some(distance_km) = query.distance_km else {
        return Ok(Json(
            vehicles
                .into_iter()
                .map(|v| VehicleResponse::new(v, None))
                .collect(),
        ));
    };

    // One query for every rate row instead of one per vehicle
    let records = vehicle_pricing::Entity::find().all(state.db.as_ref()).await?;

    let responses = vehicles
        .into_iter()
        .map(|v| {
            let table = PricingTable::from_records(v.category, &v.vehicle_type, &records);
            let fare = resolve_fare(table.as_ref(), distance_km, query.trip_type);
            VehicleResponse::new(v, Some(fare))
        })
        .collect();

    Ok(Json(responses))
}

/// Get a vehicle with its pricing table
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<VehicleDetailResponse>> {
    let vehicle = find_vehicle(state.db.as_ref(), id).await?;
    let pricing = load_pricing(state.db.as_ref(), &vehicle).await?;

    Ok(Json(VehicleDetailResponse {
        vehicle: VehicleResponse::new(vehicle, None),
        pricing,
    }))
}

/// Quote a trip for one vehicle
pub async fn vehicle_fare(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VehicleFareQuery>,
) -> AppResult<Json<FareResponse>> {
    let vehicle = find_vehicle(state.db.as_ref(), id).await?;
    let pricing = load_pricing(state.db.as_ref(), &vehicle).await?;

    if pricing.is_none() {
        tracing::warn!(
            vehicle_id = %vehicle.id,
            category = ?vehicle.category,
            vehicle_type = %vehicle.vehicle_type,
            "No pricing configured for vehicle"
        );
    }

    Ok(Json(FareResponse {
        vehicle_id: Some(vehicle.id),
        distance_km: query.distance_km,
        trip_type: query.trip_type,
        fare: resolve_fare(pricing.as_ref(), query.distance_km, query.trip_type),
    }))
}
