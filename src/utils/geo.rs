use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geocoded point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub description: String,
}

impl LocationData {
    pub fn new(lat: f64, lng: f64, description: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            description: description.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Distance in kilometers between two locations, rounded to 2 decimals.
///
/// Missing locations or non-finite coordinates yield `0.0` instead of an error.
pub fn distance_between(from: Option<&LocationData>, to: Option<&LocationData>) -> f64 {
    match (from, to) {
        (Some(a), Some(b)) if a.is_valid() && b.is_valid() => {
            round_to(haversine_distance(a.lat, a.lng, b.lat, b.lng), 2)
        }
        _ => {
            tracing::debug!("Distance requested with missing or invalid coordinates");
            0.0
        }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jakarta() -> LocationData {
        LocationData::new(-6.2088, 106.8456, "Jakarta")
    }

    fn bandung() -> LocationData {
        LocationData::new(-6.9175, 107.6191, "Bandung")
    }

    #[test]
    fn test_haversine_jakarta_bandung() {
        let distance = distance_between(Some(&jakarta()), Some(&bandung()));
        // Published great-circle distance is roughly 116 km
        assert!((distance - 116.0).abs() < 2.0, "got {distance}");
    }

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(distance_between(Some(&jakarta()), Some(&jakarta())), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = distance_between(Some(&jakarta()), Some(&bandung()));
        let back = distance_between(Some(&bandung()), Some(&jakarta()));
        assert_eq!(there, back);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let distance = distance_between(Some(&jakarta()), Some(&bandung()));
        assert_eq!(distance, round_to(distance, 2));
        assert_eq!(round_to(12.3456, 2), 12.35);
    }

    #[test]
    fn test_missing_input_is_zero() {
        assert_eq!(distance_between(None, Some(&bandung())), 0.0);
        assert_eq!(distance_between(Some(&jakarta()), None), 0.0);
        assert_eq!(distance_between(None, None), 0.0);
    }

    #[test]
    fn test_non_numeric_input_is_zero() {
        let broken = LocationData::new(f64::NAN, 106.8, "broken");
        assert_eq!(distance_between(Some(&broken), Some(&bandung())), 0.0);

        let infinite = LocationData::new(-6.2, f64::INFINITY, "");
        assert_eq!(distance_between(Some(&jakarta()), Some(&infinite)), 0.0);
    }

    #[test]
    fn test_description_defaults_when_absent() {
        let location: LocationData = serde_json::from_str(r#"{"lat": 1.5, "lng": 2.5}"#).unwrap();
        assert_eq!(location, LocationData::new(1.5, 2.5, ""));
    }
}
