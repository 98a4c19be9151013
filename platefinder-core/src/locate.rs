use crate::model::Coordinates;
use platefinder_common::{LocationConfig, LocationProvider, PlateFinderError, Result};
use serde::Deserialize;

/// Single-shot geolocation.
#[async_trait::async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates>;
}

/// Coordinates supplied up front. `None` behaves like a denied permission.
#[derive(Debug, Clone)]
pub struct FixedLocator(pub Option<Coordinates>);

#[async_trait::async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates> {
        self.0.ok_or_else(|| {
            PlateFinderError::LocationUnavailable("no fixed coordinates configured".into())
        })
    }
}

/// Looks the caller up by public IP (ip-api.com response shape).
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct IpLookup {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates> {
        let unavailable = |e: String| PlateFinderError::LocationUnavailable(e);
        let lookup = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| unavailable(e.to_string()))?
            .json::<IpLookup>()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if lookup.status != "success" {
            return Err(unavailable(
                lookup.message.unwrap_or_else(|| format!("lookup status {}", lookup.status)),
            ));
        }
        match (lookup.lat, lookup.lon) {
            (Some(latitude), Some(longitude)) => {
                log::debug!("located at {latitude},{longitude}");
                Ok(Coordinates { latitude, longitude })
            }
            _ => Err(unavailable("lookup returned no coordinates".into())),
        }
    }
}

/// The locator picked by `[location] provider`.
#[derive(Debug, Clone)]
pub enum ConfiguredLocator {
    Fixed(FixedLocator),
    Ip(IpLocator),
}

impl ConfiguredLocator {
    pub fn from_config(cfg: &LocationConfig) -> Self {
        match cfg.provider {
            LocationProvider::Fixed => {
                let at = cfg
                    .latitude
                    .zip(cfg.longitude)
                    .map(|(latitude, longitude)| Coordinates { latitude, longitude });
                Self::Fixed(FixedLocator(at))
            }
            LocationProvider::Ip => Self::Ip(IpLocator::new(&cfg.ip_lookup_url)),
        }
    }
}

#[async_trait::async_trait]
impl Locator for ConfiguredLocator {
    async fn locate(&self) -> Result<Coordinates> {
        match self {
            Self::Fixed(l) => l.locate().await,
            Self::Ip(l) => l.locate().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_without_coordinates_is_unavailable() {
        let err = FixedLocator(None).locate().await.unwrap_err();
        assert!(matches!(err, PlateFinderError::LocationUnavailable(_)));
    }

    #[test]
    fn fixed_provider_needs_both_coordinates() {
        let cfg = LocationConfig {
            provider: LocationProvider::Fixed,
            latitude: Some(1.0),
            longitude: None,
            ..LocationConfig::default()
        };
        match ConfiguredLocator::from_config(&cfg) {
            ConfiguredLocator::Fixed(FixedLocator(at)) => assert!(at.is_none()),
            other => panic!("unexpected locator {other:?}"),
        }
    }
}
