use std::time::Duration as StdDuration;

use chrono::{Duration, FixedOffset, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Sun times for today, in the location's own wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct Astronomy {
    pub sunrise: NaiveDateTime,
    pub sunset: NaiveDateTime,
    /// The location's current UTC offset, DST included.
    pub utc_offset: FixedOffset,
}

impl Astronomy {
    pub fn day_length(&self) -> Duration {
        self.sunset - self.sunrise
    }
}

pub fn format_duration(d: Duration) -> String {
    let minutes = d.num_minutes().max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone)]
pub struct AstronomyClient {
    client: Client,
    base_url: String,
}

impl AstronomyClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(StdDuration::from_secs(10))
                .build()?,
            base_url: base_url.into(),
        })
    }

    pub async fn today(&self, latitude: f64, longitude: f64) -> Result<Astronomy> {
        tracing::debug!(url = %self.base_url, "GET sun times");
        let payload: SunResponse = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", "sunrise,sunset".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        payload.into_astronomy()
    }
}

#[derive(Debug, Deserialize)]
struct SunResponse {
    utc_offset_seconds: Option<i32>,
    daily: DailyBlock,
}

impl SunResponse {
    fn into_astronomy(self) -> Result<Astronomy> {
        let utc_offset = self
            .utc_offset_seconds
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| Error::unavailable("no UTC offset for location"))?;
        let (sunrise, sunset) = self.daily.first_day()?;
        Ok(Astronomy {
            sunrise,
            sunset,
            utc_offset,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}

impl DailyBlock {
    fn first_day(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let sunrise = self.sunrise.first().and_then(|s| parse_local(s));
        let sunset = self.sunset.first().and_then(|s| parse_local(s));
        match (sunrise, sunset) {
            (Some(sunrise), Some(sunset)) => Ok((sunrise, sunset)),
            _ => Err(Error::unavailable("no sunrise/sunset for today")),
        }
    }
}
