use serde::Serialize;

use super::table::{DistanceBucket, PricingTable, RateCard};
use crate::entities::vehicle::VehicleCategory;
use crate::entities::vehicle_pricing::TripType;
use crate::utils::money::format_price;

/// Why a fare could not be determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    NoPricing,
    NoRatesForTrip,
    NoRate,
    InvalidDistance,
}

impl Unavailable {
    pub fn message(&self) -> &'static str {
        match self {
            Unavailable::NoPricing => "Price unavailable: pricing is not configured for this vehicle",
            Unavailable::NoRatesForTrip => "Price unavailable: no rates for this trip type",
            Unavailable::NoRate => "Price unavailable: no rate configured for this distance",
            Unavailable::InvalidDistance => "Price unavailable: distance could not be determined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub price: i64,
    pub display_text: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<DistanceBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl FareQuote {
    fn priced(price: i64, bucket: Option<DistanceBucket>, rate: f64) -> Self {
        Self {
            price,
            display_text: format_price(price),
            is_valid: true,
            bucket,
            rate: Some(rate),
        }
    }

    pub fn unavailable(reason: Unavailable) -> Self {
        Self {
            price: 0,
            display_text: reason.message().to_string(),
            is_valid: false,
            bucket: None,
            rate: None,
        }
    }
}

/// Unset, zero and negative rates all mean "not configured"
fn is_usable(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Pick the rate tier for a distance.
///
/// Only the `50km`, `100km` and `150km` tiers take part. They are walked in
/// ascending order and the first one whose bound covers the distance wins.
/// Longer distances fall back to `150km`, else `100km`, else `50km`.
pub fn select_bucket(card: &RateCard, distance_km: f64) -> Option<(DistanceBucket, f64)> {
    let mut usable = card
        .tiers
        .iter()
        .filter(|(bucket, rate)| bucket.is_selectable() && is_usable(**rate));

    usable
        .clone()
        .find(|(bucket, _)| distance_km <= bucket.upper_bound_km())
        .or_else(|| usable.next_back())
        .map(|(bucket, rate)| (*bucket, *rate))
}

/// Estimate the fare for a trip.
///
/// Never fails: missing pricing or an unusable distance produce a quote with
/// `is_valid == false` and a human-readable message.
pub fn resolve_fare(table: Option<&PricingTable>, distance_km: f64, trip_type: TripType) -> FareQuote {
    let reason = match quote(table, distance_km, trip_type) {
        Ok(quote) => return quote,
        Err(reason) => reason,
    };

    tracing::debug!(
        distance_km,
        trip_type = trip_type.as_str(),
        reason = ?reason,
        "Fare unavailable"
    );

    FareQuote::unavailable(reason)
}

fn quote(
    table: Option<&PricingTable>,
    distance_km: f64,
    trip_type: TripType,
) -> Result<FareQuote, Unavailable> {
    let table = table.ok_or(Unavailable::NoPricing)?;

    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(Unavailable::InvalidDistance);
    }

    let card = table
        .rates_for(trip_type)
        .filter(|card| !card.is_empty())
        .ok_or(Unavailable::NoRatesForTrip)?;

    match table.category {
        VehicleCategory::Auto => {
            let rate = card.per_km.filter(|r| is_usable(*r)).ok_or(Unavailable::NoRate)?;
            Ok(FareQuote::priced((rate * distance_km).round() as i64, None, rate))
        }
        VehicleCategory::Car => {
            let (bucket, rate) = select_bucket(card, distance_km).ok_or(Unavailable::NoRate)?;
            Ok(FareQuote::priced((rate * distance_km).round() as i64, Some(bucket), rate))
        }
        VehicleCategory::Bus => {
            let (bucket, base) = select_bucket(card, distance_km).ok_or(Unavailable::NoRate)?;
            Ok(FareQuote::priced(base.round() as i64, Some(bucket), base))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(tiers: &[(DistanceBucket, f64)]) -> RateCard {
        RateCard {
            per_km: None,
            tiers: tiers.iter().copied().collect(),
        }
    }

    fn car_table() -> PricingTable {
        PricingTable::new(VehicleCategory::Car, "sedan").with_rates(
            TripType::OneWay,
            card(&[
                (DistanceBucket::Km50, 10.0),
                (DistanceBucket::Km100, 9.0),
                (DistanceBucket::Km150, 8.0),
            ]),
        )
    }

    fn auto_table(rate: f64) -> PricingTable {
        PricingTable::new(VehicleCategory::Auto, "three-wheeler").with_rates(
            TripType::OneWay,
            RateCard {
                per_km: Some(rate),
                tiers: Default::default(),
            },
        )
    }

    #[test]
    fn test_distance_120_uses_150km_tier() {
        let quote = resolve_fare(Some(&car_table()), 120.0, TripType::OneWay);
        assert!(quote.is_valid);
        assert_eq!(quote.bucket, Some(DistanceBucket::Km150));
        assert_eq!(quote.price, 960);
        assert_eq!(quote.display_text, "₹960");
    }

    #[test]
    fn test_bucket_bounds_are_inclusive() {
        let table = car_table();
        let rates = table.rates_for(TripType::OneWay).unwrap();
        assert_eq!(select_bucket(rates, 0.0), Some((DistanceBucket::Km50, 10.0)));
        assert_eq!(select_bucket(rates, 50.0), Some((DistanceBucket::Km50, 10.0)));
        assert_eq!(select_bucket(rates, 50.01), Some((DistanceBucket::Km100, 9.0)));
        assert_eq!(select_bucket(rates, 100.0), Some((DistanceBucket::Km100, 9.0)));
        assert_eq!(select_bucket(rates, 150.0), Some((DistanceBucket::Km150, 8.0)));
    }

    #[test]
    fn test_long_trips_fall_back_to_largest_tier() {
        let quote = resolve_fare(Some(&car_table()), 400.0, TripType::OneWay);
        assert_eq!(quote.bucket, Some(DistanceBucket::Km150));
        assert_eq!(quote.price, 3200);

        let only_small = card(&[(DistanceBucket::Km50, 10.0)]);
        assert_eq!(select_bucket(&only_small, 90.0), Some((DistanceBucket::Km50, 10.0)));
    }

    #[test]
    fn test_200km_tier_is_never_selected() {
        let rates = card(&[
            (DistanceBucket::Km50, 10.0),
            (DistanceBucket::Km150, 8.0),
            (DistanceBucket::Km200, 7.0),
        ]);
        assert_eq!(select_bucket(&rates, 180.0), Some((DistanceBucket::Km150, 8.0)));
        assert_eq!(select_bucket(&rates, 500.0), Some((DistanceBucket::Km150, 8.0)));
    }

    #[test]
    fn test_long_trip_fallback_order() {
        let without_150 = card(&[
            (DistanceBucket::Km50, 10.0),
            (DistanceBucket::Km100, 9.0),
            (DistanceBucket::Km200, 7.0),
        ]);
        assert_eq!(select_bucket(&without_150, 180.0), Some((DistanceBucket::Km100, 9.0)));

        let only_50 = card(&[(DistanceBucket::Km50, 10.0), (DistanceBucket::Km200, 7.0)]);
        assert_eq!(select_bucket(&only_50, 180.0), Some((DistanceBucket::Km50, 10.0)));

        let only_200 = card(&[(DistanceBucket::Km200, 7.0)]);
        assert_eq!(select_bucket(&only_200, 180.0), None);
        assert!(!resolve_fare(
            Some(&PricingTable::new(VehicleCategory::Car, "sedan").with_rates(TripType::OneWay, only_200)),
            180.0,
            TripType::OneWay
        )
        .is_valid);
    }

    #[test]
    fn test_missing_tier_falls_through_to_next_larger() {
        let rates = card(&[(DistanceBucket::Km100, 9.0), (DistanceBucket::Km150, 8.0)]);
        assert_eq!(select_bucket(&rates, 20.0), Some((DistanceBucket::Km100, 9.0)));
    }

    #[test]
    fn test_unusable_rates_are_skipped() {
        let rates = card(&[
            (DistanceBucket::Km50, 0.0),
            (DistanceBucket::Km100, 9.0),
            (DistanceBucket::Km150, f64::NAN),
        ]);
        assert_eq!(select_bucket(&rates, 20.0), Some((DistanceBucket::Km100, 9.0)));
        assert_eq!(select_bucket(&rates, 140.0), Some((DistanceBucket::Km100, 9.0)));
        assert_eq!(select_bucket(&card(&[(DistanceBucket::Km50, -1.0)]), 10.0), None);
    }

    #[test]
    fn test_auto_uses_flat_per_km_rate() {
        let quote = resolve_fare(Some(&auto_table(15.0)), 10.0, TripType::OneWay);
        assert!(quote.is_valid);
        assert_eq!(quote.price, 150);
        assert_eq!(quote.bucket, None);
        assert_eq!(quote.rate, Some(15.0));
    }

    #[test]
    fn test_auto_ignores_tiers() {
        let mut table = auto_table(15.0);
        table.one_way.as_mut().unwrap().tiers.insert(DistanceBucket::Km50, 99.0);
        assert_eq!(resolve_fare(Some(&table), 10.0, TripType::OneWay).price, 150);
    }

    #[test]
    fn test_price_rounds_to_whole_units() {
        assert_eq!(resolve_fare(Some(&auto_table(15.0)), 3.33, TripType::OneWay).price, 50);
        assert_eq!(resolve_fare(Some(&auto_table(12.5)), 1.5, TripType::OneWay).price, 19);
    }

    #[test]
    fn test_bus_charges_flat_base_price() {
        let table = PricingTable::new(VehicleCategory::Bus, "mini-bus").with_rates(
            TripType::OneWay,
            card(&[(DistanceBucket::Km50, 3500.0), (DistanceBucket::Km100, 6000.0)]),
        );

        let quote = resolve_fare(Some(&table), 80.0, TripType::OneWay);
        assert_eq!(quote.price, 6000);
        assert_eq!(quote.bucket, Some(DistanceBucket::Km100));
        assert_eq!(quote.display_text, "₹6,000");
    }

    #[test]
    fn test_trip_type_selects_rate_card() {
        let table = car_table().with_rates(TripType::Return, card(&[(DistanceBucket::Km50, 6.0)]));
        assert_eq!(resolve_fare(Some(&table), 10.0, TripType::OneWay).price, 100);
        assert_eq!(resolve_fare(Some(&table), 10.0, TripType::Return).price, 60);
    }

    #[test]
    fn test_missing_pricing_is_unavailable() {
        let quote = resolve_fare(None, 25.0, TripType::OneWay);
        assert!(!quote.is_valid);
        assert_eq!(quote.price, 0);
        assert!(!quote.display_text.is_empty());
    }

    #[test]
    fn test_missing_trip_rates_is_unavailable() {
        let quote = resolve_fare(Some(&car_table()), 25.0, TripType::Return);
        assert!(!quote.is_valid);
        assert_eq!(quote.display_text, Unavailable::NoRatesForTrip.message());
    }

    #[test]
    fn test_auto_without_rate_is_unavailable() {
        let table = PricingTable::new(VehicleCategory::Auto, "three-wheeler")
            .with_rates(TripType::OneWay, card(&[(DistanceBucket::Km50, 10.0)]));
        let quote = resolve_fare(Some(&table), 5.0, TripType::OneWay);
        assert!(!quote.is_valid);
        assert_eq!(quote.display_text, Unavailable::NoRate.message());
    }

    #[test]
    fn test_zero_price_differs_from_unavailable() {
        let zero = resolve_fare(Some(&auto_table(15.0)), 0.0, TripType::OneWay);
        assert!(zero.is_valid);
        assert_eq!(zero.price, 0);

        let missing = resolve_fare(None, 0.0, TripType::OneWay);
        assert!(!missing.is_valid);
        assert_ne!(zero, missing);
    }

    #[test]
    fn test_invalid_distance_is_unavailable() {
        for distance in [-1.0, f64::NAN, f64::INFINITY] {
            let quote = resolve_fare(Some(&car_table()), distance, TripType::OneWay);
            assert!(!quote.is_valid);
            assert_eq!(quote.display_text, Unavailable::InvalidDistance.message());
        }
    }

    #[test]
    fn test_quote_serializes_camel_case() {
        let value = serde_json::to_value(resolve_fare(Some(&car_table()), 10.0, TripType::OneWay)).unwrap();
        assert_eq!(value["price"], 100);
        assert_eq!(value["displayText"], "₹100");
        assert_eq!(value["isValid"], true);
        assert_eq!(value["bucket"], "50km");

        let value = serde_json::to_value(resolve_fare(None, 10.0, TripType::OneWay)).unwrap();
        assert_eq!(value["isValid"], false);
        assert!(value.get("bucket").is_none());
    }
}
