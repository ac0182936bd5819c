use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::vehicle::VehicleCategory;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "trip_type")]
pub enum TripType {
    #[default]
    #[sea_orm(string_value = "one-way")]
    #[serde(rename = "one-way")]
    OneWay,
    #[sea_orm(string_value = "return")]
    #[serde(rename = "return")]
    Return,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::OneWay => "one-way",
            TripType::Return => "return",
        }
    }
}

/// One admin-managed rate row per (category, vehicle type, trip type)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_pricing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category: VehicleCategory,
    pub vehicle_type: String,
    pub trip_type: TripType,
    pub rate_per_km: Option<f64>,
    pub rate_50km: Option<f64>,
    pub rate_100km: Option<f64>,
    pub rate_150km: Option<f64>,
    pub rate_200km: Option<f64>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
