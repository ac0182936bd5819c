use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::vehicle::VehicleCategory;
use crate::entities::vehicle_pricing::{self, TripType};

/// Labeled upper-bound distance tier. Ordering follows the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DistanceBucket {
    #[serde(rename = "50km")]
    Km50,
    #[serde(rename = "100km")]
    Km100,
    #[serde(rename = "150km")]
    Km150,
    #[serde(rename = "200km")]
    Km200,
}

impl DistanceBucket {
    pub const ALL: [DistanceBucket; 4] = [
        DistanceBucket::Km50,
        DistanceBucket::Km100,
        DistanceBucket::Km150,
        DistanceBucket::Km200,
    ];

    /// Tiers the fare lookup may pick. `200km` rates are stored but never
    /// selected; trips past 150 km are capped at the `150km` tier.
    pub const SELECTABLE: [DistanceBucket; 3] = [
        DistanceBucket::Km50,
        DistanceBucket::Km100,
        DistanceBucket::Km150,
    ];

    pub fn is_selectable(&self) -> bool {
        Self::SELECTABLE.contains(self)
    }

    pub fn upper_bound_km(&self) -> f64 {
        match self {
            DistanceBucket::Km50 => 50.0,
            DistanceBucket::Km100 => 100.0,
            DistanceBucket::Km150 => 150.0,
            DistanceBucket::Km200 => 200.0,
        }
    }
}

/// Rates for a single trip type.
///
/// Auto rickshaws use `per_km`; cars and buses use `tiers`, holding a per-km
/// rate for cars and a flat base price for buses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_km: Option<f64>,
    #[serde(default)]
    pub tiers: BTreeMap<DistanceBucket, f64>,
}

impl RateCard {
    pub fn is_empty(&self) -> bool {
        self.per_km.is_none() && self.tiers.is_empty()
    }
}

impl From<&vehicle_pricing::Model> for RateCard {
    fn from(record: &vehicle_pricing::Model) -> Self {
        let tiers = [
            (DistanceBucket::Km50, record.rate_50km),
            (DistanceBucket::Km100, record.rate_100km),
            (DistanceBucket::Km150, record.rate_150km),
            (DistanceBucket::Km200, record.rate_200km),
        ]
        .into_iter()
        .filter_map(|(bucket, rate)| rate.map(|r| (bucket, r)))
        .collect();

        Self {
            per_km: record.rate_per_km,
            tiers,
        }
    }
}

/// Pricing for one (category, vehicle type) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    pub category: VehicleCategory,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_way: Option<RateCard>,
    #[serde(default, rename = "return", skip_serializing_if = "Option::is_none")]
    pub round_trip: Option<RateCard>,
}

impl PricingTable {
    pub fn new(category: VehicleCategory, vehicle_type: impl Into<String>) -> Self {
        Self {
            category,
            vehicle_type: vehicle_type.into(),
            one_way: None,
            round_trip: None,
        }
    }

    pub fn with_rates(mut self, trip_type: TripType, card: RateCard) -> Self {
        match trip_type {
            TripType::OneWay => self.one_way = Some(card),
            TripType::Return => self.round_trip = Some(card),
        }
        self
    }

    pub fn rates_for(&self, trip_type: TripType) -> Option<&RateCard> {
        match trip_type {
            TripType::OneWay => self.one_way.as_ref(),
            TripType::Return => self.round_trip.as_ref(),
        }
    }

    /// Assemble a table from stored rows matching `category` and `vehicle_type`.
    /// Returns `None` when no row matches.
    pub fn from_records(
        category: VehicleCategory,
        vehicle_type: &str,
        records: &[vehicle_pricing::Model],
    ) -> Option<Self> {
        let mut table = Self::new(category, vehicle_type);
        let mut found = false;

        for record in records
            .iter()
            .filter(|r| r.category == category && r.vehicle_type == vehicle_type)
        {
            table = table.with_rates(record.trip_type, RateCard::from(record));
            found = true;
        }

        found.then_some(table)
    }
}
