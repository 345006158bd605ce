use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const BASE_URL: &str = "https://api.weather.gov";

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// api.weather.gov client. The service rejects requests without a User-Agent.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    pub fn with_base_url(user_agent: &str, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/geo+json")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn last_segment(url: &str) -> Option<&str> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}

#[derive(Deserialize, Debug, Default)]
pub struct Value<T> {
    pub value: T,
}

pub mod station {
    use super::*;

    #[derive(Deserialize, Debug)]
    pub struct Station {
        pub properties: Properties,

        geometry: Geometry,
    }

    impl Station {
        pub async fn from_station(client: &NwsClient, station_id: &str) -> Result<Self> {
            let url = client.url(&format!("stations/{station_id}"));
            client.get_json(&url).await
        }

        pub fn coordinates(&self) -> (f64, f64) {
            let lat = self.geometry.coordinates.1;
            let lon = self.geometry.coordinates.0;
            (lat, lon)
        }
    }

    #[derive(Deserialize, Debug)]
    pub struct Geometry {
        coordinates: (f64, f64),
    }

    #[derive(Deserialize, Debug)]
    pub struct Properties {
        pub name: String,

        #[serde(rename = "stationIdentifier")]
        pub station_identifier: String,
    }

    /// The list behind a points record's `observationStations`, nearest first.
    #[derive(Deserialize, Debug)]
    pub struct StationList {
        #[serde(rename = "observationStations", default)]
        observation_stations: Vec<String>,
    }

    impl StationList {
        pub async fn from_url(client: &NwsClient, url: &str) -> Result<Self> {
            client.get_json(url).await
        }

        pub fn nearest_id(&self) -> Result<&str> {
            self.observation_stations
                .first()
                .and_then(|url| last_segment(url))
                .ok_or_else(|| Error::unavailable("station list is empty"))
        }
    }
}

pub mod gridpoints {
    use super::*;

    #[derive(Deserialize, Debug)]
    pub struct Gridpoints {
        properties: Properties,
    }

    #[derive(Deserialize, Debug)]
    pub struct Properties {
        forecast: Option<String>,

        #[serde(rename = "forecastHourly")]
        forecast_hourly: Option<String>,

        #[serde(rename = "forecastZone")]
        forecast_zone: Option<String>,

        #[serde(rename = "observationStations")]
        observation_stations: Option<String>,

        #[serde(rename = "relativeLocation")]
        relative_location: Option<RelativeLocation>,
    }

    #[derive(Deserialize, Debug)]
    pub struct RelativeLocation {
        properties: PlaceProperties,
    }

    #[derive(Deserialize, Debug)]
    pub struct PlaceProperties {
        city: String,
        state: String,
    }

    impl Gridpoints {
        pub async fn from_coord(client: &NwsClient, lat: f64, lon: f64) -> Result<Self> {
            let url = client.url(&format!("points/{lat:.4},{lon:.4}"));
            client.get_json(&url).await
        }

        pub fn forecast_url(&self) -> Result<&str> {
            self.properties
                .forecast
                .as_deref()
                .ok_or_else(|| Error::unavailable("point has no forecast office"))
        }

        pub fn hourly_url(&self) -> Option<&str> {
            self.properties.forecast_hourly.as_deref()
        }

        pub fn stations_url(&self) -> Result<&str> {
            self.properties
                .observation_stations
                .as_deref()
                .ok_or_else(|| Error::unavailable("point has no observation stations"))
        }

        pub fn zone_id(&self) -> Option<&str> {
            self.properties
                .forecast_zone
                .as_deref()
                .and_then(last_segment)
        }

        pub fn place_name(&self) -> Option<String> {
            self.properties
                .relative_location
                .as_ref()
                .map(|rel| format!("{}, {}", rel.properties.city, rel.properties.state))
        }
    }
}

pub mod observation {
    use chrono::DateTime;

    use super::*;
    use crate::weather;

    #[derive(Deserialize, Debug)]
    pub struct Observation {
        pub properties: Properties,
    }

    impl Observation {
        pub async fn from_station(client: &NwsClient, station_id: &str) -> Result<Self> {
            let url = client.url(&format!("stations/{station_id}/observations/latest"));
            client.get_json(&url).await
        }
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Properties {
        #[serde(default)]
        pub station_name: Option<String>,

        #[serde(rename = "textDescription", default)]
        pub description: Option<String>,

        pub timestamp: String,

        pub temperature: Value<Option<f64>>,

        pub dewpoint: Value<Option<f64>>,

        pub wind_direction: Value<Option<f64>>,

        pub wind_speed: Value<Option<f64>>,

        pub barometric_pressure: Value<Option<f64>>,

        pub visibility: Value<Option<f64>>,

        pub relative_humidity: Value<Option<f64>>,
    }

    fn required(field: &Value<Option<f64>>, name: &str) -> Result<f64> {
        field
            .value
            .ok_or_else(|| Error::unavailable(format!("observation has no {name}")))
    }

    impl Properties {
        /// Validates the reading. Calm winds report no direction, so a missing
        /// direction with a known speed becomes north; any other gap is fatal.
        pub fn into_observation(self, station_id: &str) -> Result<weather::Observation> {
            let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
                .map_err(|e| Error::unavailable(format!("bad observation timestamp: {e}")))?;
            let wind_speed_kph = required(&self.wind_speed, "wind speed")?;

            Ok(weather::Observation {
                station_name: self.station_name.unwrap_or_else(|| station_id.to_string()),
                timestamp,
                condition: self.description.unwrap_or_default(),
                temperature_c: required(&self.temperature, "temperature")?,
                dewpoint_c: required(&self.dewpoint, "dewpoint")?,
                wind_speed_kph,
                wind_direction_deg: self.wind_direction.value.unwrap_or(0.0),
                pressure_pa: required(&self.barometric_pressure, "barometric pressure")?,
                visibility_m: required(&self.visibility, "visibility")?,
                relative_humidity: required(&self.relative_humidity, "relative humidity")?,
            })
        }
    }
}

pub mod forecast {
    use super::*;
    use crate::weather::ForecastPeriod;

    #[derive(Deserialize, Debug)]
    pub struct Forecast {
        pub properties: Properties,
    }

    impl Forecast {
        pub async fn from_url(client: &NwsClient, url: &str) -> Result<Self> {
            client.get_json(url).await
        }

        pub fn into_periods(self) -> Vec<ForecastPeriod> {
            self.properties
                .periods
                .into_iter()
                .map(Results::into_period)
                .collect()
        }
    }

    #[derive(Deserialize, Debug)]
    pub struct Properties {
        pub periods: Vec<Results>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Results {
        pub name: String,

        pub is_daytime: bool,

        pub temperature: f64,

        #[serde(default)]
        pub short_forecast: String,

        #[serde(default)]
        pub detailed_forecast: String,

        #[serde(default)]
        pub probability_of_precipitation: Option<Value<Option<f64>>>,
    }

    impl Results {
        pub fn into_period(self) -> ForecastPeriod {
            ForecastPeriod {
                name: self.name,
                is_daytime: self.is_daytime,
                temperature: self.temperature,
                short_forecast: self.short_forecast,
                detailed_forecast: self.detailed_forecast,
                precipitation_chance: self.probability_of_precipitation.and_then(|p| p.value),
            }
        }
    }
}

pub mod alerts {
    use super::*;

    #[derive(Deserialize, Debug, Default)]
    pub struct Alerts {
        pub features: Vec<Feature>,
    }

    impl Alerts {
        pub async fn from_zone(client: &NwsClient, zone_id: &str) -> Result<Self> {
            let url = client.url(&format!("alerts/active/zone/{zone_id}"));
            client.get_json(&url).await
        }
    }

    #[derive(Deserialize, Debug)]
    pub struct Feature {
        pub properties: Properties,
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Properties {
        pub event: String,
        pub severity: String,
        pub certainty: String,
        #[serde(default)]
        pub onset: Option<String>,
        #[serde(default)]
        pub ends: Option<String>,
        #[serde(default)]
        pub headline: Option<String>,
    }
}
