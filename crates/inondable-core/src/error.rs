use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("not a GeoJSON object: {0}")]
    NotGeoJson(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
