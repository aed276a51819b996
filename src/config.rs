use serde::Deserialize;

fn default_port() -> u16 {
    3000
}
fn default_offline_mode() -> bool {
    false
}
fn default_geocoding_endpoint() -> String {
    "https://api.opencagedata.com/geocode/v1/json".to_string()
}
fn default_solar_endpoint() -> String {
    "https://developer.nrel.gov/api/solar/solar_resource/v1.json".to_string()
}
fn default_api_key() -> String {
    "DEMO_KEY".to_string()
}
fn default_fallback_latitude() -> f64 {
    39.8283
}
fn default_fallback_longitude() -> f64 {
    -98.5795
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub solar_resource: SolarResourceConfig,
    #[serde(default = "default_offline_mode")]
    pub offline_mode: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Point used when neither the API nor the city table matches.
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_geocoding_endpoint(),
            api_key: default_api_key(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SolarResourceConfig {
    #[serde(default = "default_solar_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

impl Default for SolarResourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_solar_endpoint(),
            api_key: default_api_key(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_full_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(!config.offline_mode);
        assert_eq!(config.geocoding.api_key, "DEMO_KEY");
        assert_eq!(config.geocoding.fallback_latitude, 39.8283);
        assert!(config.solar_resource.endpoint.contains("solar_resource"));
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config: Config = serde_json::from_str(
            r#"{"server": {"port": 8080}, "offline_mode": true}"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.offline_mode);
        assert_eq!(config.geocoding.endpoint, default_geocoding_endpoint());
    }
}
