use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;

use crate::config::SolarResourceConfig;
use crate::models::estimate::SolarResourceResponse;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Monthly global horizontal irradiance averages for a location, in
/// kWh/m²/day, from the configured solar-resource API.
///
/// `None` means "use the internal estimate" — returned on network failure,
/// a non-success status, a malformed body, or an incomplete monthly map.
/// The caller never sees an error from this path.
pub async fn fetch_monthly_ghi(
    client: &Client,
    config: &SolarResourceConfig,
    latitude: f64,
    longitude: f64,
) -> Option<[f64; 12]> {
    let request = client
        .get(&config.endpoint)
        .query(&[("api_key", config.api_key.as_str())])
        .query(&[("lat", latitude), ("lon", longitude)])
        .timeout(REQUEST_TIMEOUT);

    let response = match request.send().await {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            eprintln!("Solar resource API returned {}", r.status());
            return None;
        }
        Err(e) => {
            eprintln!("Failed to reach solar resource API: {}", e);
            return None;
        }
    };

    match response.json::<SolarResourceResponse>().await {
        Ok(data) => {
            let series = monthly_series(&data.outputs.avg_ghi.monthly);
            if series.is_none() {
                eprintln!("Solar resource response is missing monthly averages");
            }
            series
        }
        Err(e) => {
            eprintln!("Failed to parse solar resource response: {}", e);
            None
        }
    }
}

/// Assemble the January–December series from the API's "1".."12" keyed map.
/// All twelve months must be present and positive, otherwise the payload is
/// unusable and the internal estimate takes over.
fn monthly_series(monthly: &HashMap<String, f64>) -> Option<[f64; 12]> {
    let mut series = [0.0; 12];
    for (index, slot) in series.iter_mut().enumerate() {
        let value = *monthly.get(&(index + 1).to_string())?;
        if value <= 0.0 {
            return None;
        }
        *slot = value;
    }
    Some(series)
}
