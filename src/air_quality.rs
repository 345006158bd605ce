use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

/// EPA AQI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_us_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitive,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            _ => Self::Hazardous,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQuality {
    pub us_aqi: u16,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub category: AqiCategory,
}

#[derive(Debug, Clone)]
pub struct AirQualityClient {
    client: Client,
    base_url: String,
}

impl AirQualityClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            base_url: base_url.into(),
        })
    }

    pub async fn current(&self, latitude: f64, longitude: f64) -> Result<AirQuality> {
        tracing::debug!(url = %self.base_url, "GET air quality");
        let payload: AirQualityResponse = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "us_aqi,pm2_5,pm10".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        payload.current.into_air_quality()
    }
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    us_aqi: Option<f64>,
    pm2_5: Option<f64>,
    pm10: Option<f64>,
}

impl CurrentBlock {
    fn into_air_quality(self) -> Result<AirQuality> {
        let us_aqi = self
            .us_aqi
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| Error::unavailable("air quality has no US AQI"))?
            .round() as u16;
        Ok(AirQuality {
            us_aqi,
            pm2_5: self.pm2_5,
            pm10: self.pm10,
            category: AqiCategory::from_us_aqi(us_aqi),
        })
    }
}
