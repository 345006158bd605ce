use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(8)).build()?,
            base_url: base_url.into(),
        })
    }

    /// Best match for `city`; the service ranks results by population.
    pub async fn resolve(&self, city: &str) -> Result<Place> {
        let payload: GeocodeResponse = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let top = payload
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| Error::LocationNotFound(city.to_string()))?;

        tracing::info!(name = %top.name, lat = top.latitude, lon = top.longitude, "geocoded");
        Ok(top.into_place())
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country_code: Option<String>,
}

impl GeocodeResult {
    fn into_place(self) -> Place {
        let name = match (self.admin1, self.country_code) {
            (Some(admin1), _) if admin1 != self.name => format!("{}, {admin1}", self.name),
            (_, Some(cc)) => format!("{}, {cc}", self.name),
            _ => self.name,
        };
        Place {
            name,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
