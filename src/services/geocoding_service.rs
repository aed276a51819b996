use std::time::Duration;

use reqwest::Client;

use crate::config::GeocodingConfig;
use crate::models::estimate::{GeocodeResponse, LocationPoint};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Coordinates for common city names, matched by substring when the
/// geocoding API is unreachable or returns no result.
const CITY_COORDINATES: [(&str, f64, f64); 15] = [
    ("new york", 40.7128, -74.0060),
    ("los angeles", 34.0522, -118.2437),
    ("chicago", 41.8781, -87.6298),
    ("houston", 29.7604, -95.3698),
    ("phoenix", 33.4484, -112.0740),
    ("philadelphia", 39.9526, -75.1652),
    ("san antonio", 29.4241, -98.4936),
    ("san diego", 32.7157, -117.1611),
    ("dallas", 32.7767, -96.7970),
    ("san francisco", 37.7749, -122.4194),
    ("seattle", 47.6062, -122.3321),
    ("denver", 39.7392, -104.9903),
    ("boston", 42.3601, -71.0589),
    ("atlanta", 33.7490, -84.3880),
    ("miami", 25.7617, -80.1918),
];

/// Resolve an address to coordinates via the configured geocoding API.
///
/// Any failure — network, bad status, parse error, empty result set —
/// degrades to [`mock_geocode`]. This function never errors: the estimate
/// pipeline requires a latitude, and a rough one beats none.
pub async fn geocode_address(
    client: &Client,
    config: &GeocodingConfig,
    address: &str,
) -> LocationPoint {
    let request = client
        .get(&config.endpoint)
        .query(&[("q", address), ("key", config.api_key.as_str())])
        .timeout(REQUEST_TIMEOUT);

    match request.send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<GeocodeResponse>().await {
                Ok(geo) => {
                    if let Some(first) = geo.results.into_iter().next() {
                        return LocationPoint {
                            latitude: first.geometry.lat,
                            longitude: first.geometry.lng,
                            formatted_address: first.formatted,
                        };
                    }
                    eprintln!("No geocoding results for \"{}\"", address);
                }
                Err(e) => eprintln!("Failed to parse geocoding response: {}", e),
            }
        }
        Ok(response) => eprintln!("Geocoding API returned {}", response.status()),
        Err(e) => eprintln!("Failed to reach geocoding API: {}", e),
    }

    mock_geocode(address, config)
}

/// Pure fallback — no network. Matches well-known city names
/// case-insensitively by substring, otherwise uses the configured default
/// point (continental center) so downstream always has a valid latitude.
pub fn mock_geocode(address: &str, config: &GeocodingConfig) -> LocationPoint {
    let needle = address.to_lowercase();
    for (city, latitude, longitude) in CITY_COORDINATES {
        if needle.contains(city) {
            return LocationPoint {
                latitude,
                longitude,
                formatted_address: address.to_string(),
            };
        }
    }

    LocationPoint {
        latitude: config.fallback_latitude,
        longitude: config.fallback_longitude,
        formatted_address: address.to_string(),
    }
}
