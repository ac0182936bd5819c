use std::time::Duration;

use serde::Deserialize;
use tokio::sync::{OnceCell, Semaphore};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::utils::geo::LocationData;

/// Geocoding client.
///
/// Built once at startup and shared through `AppState`. The HTTP client is
/// created lazily by `ready()`, which every lookup awaits first. Outbound
/// lookups are capped at `maps_max_concurrency` in flight.
pub struct MapsClient {
    http: OnceCell<reqwest::Client>,
    permits: Semaphore,
    api_key: Option<String>,
    geocode_url: String,
    timeout: Duration,
}

impl MapsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: OnceCell::new(),
            permits: Semaphore::new(config.maps_max_concurrency.max(1)),
            api_key: config.maps_api_key.clone(),
            geocode_url: config.maps_geocode_url.clone(),
            timeout: config.maps_timeout(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.http.initialized()
    }

    /// Initialize the client. Safe to call repeatedly and concurrently; only
    /// the first successful call does any work.
    pub async fn ready(&self) -> AppResult<&reqwest::Client> {
        self.http
            .get_or_try_init(|| async {
                if self.api_key.is_none() {
                    return Err(AppError::ServiceUnavailable(
                        "Geocoding is not configured".to_string(),
                    ));
                }

                let client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

                tracing::info!(url = %self.geocode_url, "Geocoding client ready");
                Ok(client)
            })
            .await
    }

    /// Look up an address. `Ok(None)` when the address matches nothing.
    pub async fn geocode(&self, address: &str) -> AppResult<Option<LocationData>> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AppError::BadRequest("Address must not be empty".to_string()));
        }

        self.lookup(&[("address", address.to_string())]).await
    }

    /// Resolve coordinates to the nearest known address
    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> AppResult<Option<LocationData>> {
        if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(AppError::BadRequest("Invalid coordinates".to_string()));
        }

        self.lookup(&[("latlng", format!("{},{}", lat, lng))]).await
    }

    async fn lookup(&self, params: &[(&str, String)]) -> AppResult<Option<LocationData>> {
        let client = self.ready().await?;
        let key = self.api_key.as_deref().unwrap_or_default();
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| AppError::Internal("Geocoding limiter closed".to_string()))?;

        tracing::debug!(params = ?params, "Geocoding request");

        let response: GeocodeResponse = client
            .get(&self.geocode_url)
            .query(params)
            .query(&[("key", key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_location()
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodeResponse {
    fn into_location(self) -> AppResult<Option<LocationData>> {
        match self.status.as_str() {
            "OK" => Ok(self.results.into_iter().next().map(|r| {
                LocationData::new(r.geometry.location.lat, r.geometry.location.lng, r.formatted_address)
            })),
            "ZERO_RESULTS" => Ok(None),
            "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => {
                tracing::warn!(status = %self.status, "Geocoding quota exhausted");
                Err(AppError::ServiceUnavailable(
                    "Geocoding quota exhausted".to_string(),
                ))
            }
            "INVALID_REQUEST" => Err(AppError::BadRequest(
                self.error_message
                    .unwrap_or_else(|| "Invalid geocoding request".to_string()),
            )),
            status => {
                tracing::warn!(status, error = ?self.error_message, "Geocoding failed");
                Err(AppError::Upstream(format!(
                    "Geocoding returned {}{}",
                    status,
                    self.error_message
                        .map(|m| format!(": {}", m))
                        .unwrap_or_default()
                )))
            }
        }
    }
}
