pub mod geocoding_service;
pub mod irradiance_service;
pub mod solar_algorithm;
