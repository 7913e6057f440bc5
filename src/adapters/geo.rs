use crate::core::{Coordinates, GeoLocator};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "http://ip-api.com/json";

/// 設定檔指定的固定座標
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coordinates: Coordinates,
}

impl FixedLocator {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Coordinates {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait]
impl GeoLocator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates> {
        Ok(self.coordinates)
    }
}

#[derive(Debug, Deserialize)]
struct IpLocation {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// 以對外 IP 推估位置
pub struct IpGeoLocator {
    client: Client,
    endpoint: String,
}

impl IpGeoLocator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GeoLocator for IpGeoLocator {
    async fn locate(&self) -> Result<Coordinates> {
        tracing::debug!("📍 Resolving location via {}", self.endpoint);
        let body: IpLocation = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if body.status.as_deref() == Some("fail") {
            return Err(SiteError::GeolocationError {
                message: body.message.unwrap_or_else(|| "lookup refused".to_string()),
            });
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(SiteError::GeolocationError {
                message: "response has no coordinates".to_string(),
            }),
        }
    }
}
