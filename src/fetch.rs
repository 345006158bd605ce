//! Location resolution and the per-refresh fetch fan-out.

use chrono::{DateTime, FixedOffset};

use crate::air_quality::{AirQuality, AirQualityClient};
use crate::astronomy::{Astronomy, AstronomyClient};
use crate::config::{Config, LocationQuery};
use crate::error::{Error, Result};
use crate::geocode::GeocodeClient;
use crate::noaa::{alerts, forecast, gridpoints::Gridpoints, observation, station, NwsClient};
use crate::pairing::{pair_periods, ForecastPair};
use crate::store::{LocalStore, StationRecord, STATION_KEY};
use crate::weather::{is_nighttime, DisplayWeather, PressureUnit};

#[derive(Debug, Clone)]
pub struct Clients {
    pub nws: NwsClient,
    pub geocode: GeocodeClient,
    pub air_quality: AirQualityClient,
    pub astronomy: AstronomyClient,
}

impl Clients {
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoints = &config.endpoints;
        Ok(Self {
            nws: NwsClient::with_base_url(&config.user_agent, endpoints.nws.as_str())?,
            geocode: GeocodeClient::with_base_url(endpoints.geocode.as_str())?,
            air_quality: AirQualityClient::with_base_url(endpoints.air_quality.as_str())?,
            astronomy: AstronomyClient::with_base_url(endpoints.astronomy.as_str())?,
        })
    }
}

/// Builds a record from a points lookup, keeping `station_id` if given and
/// otherwise taking the nearest station the point lists.
pub async fn station_at(
    nws: &NwsClient,
    lat: f64,
    lon: f64,
    station_id: Option<String>,
    place: Option<String>,
) -> Result<StationRecord> {
    let point = Gridpoints::from_coord(nws, lat, lon).await?;
    let station_id = match station_id {
        Some(id) => id,
        None => station::StationList::from_url(nws, point.stations_url()?)
            .await?
            .nearest_id()?
            .to_string(),
    };

    Ok(StationRecord {
        station_id,
        place: place.or_else(|| point.place_name()),
        latitude: lat,
        longitude: lon,
        forecast_url: point.forecast_url()?.to_string(),
        hourly_url: point.hourly_url().map(str::to_string),
        zone_id: point.zone_id().map(str::to_string),
    })
}

/// Turns the requested location into a station record and saves it.
/// `LocationQuery::Saved` reloads the previous run's record instead.
pub async fn resolve_location(
    clients: &Clients,
    store: &LocalStore,
    query: &LocationQuery,
) -> Result<StationRecord> {
    let record = match query {
        LocationQuery::Saved => {
            return store
                .get::<StationRecord>(STATION_KEY)?
                .ok_or(Error::NoSavedLocation);
        }
        LocationQuery::City(city) => {
            let place = clients.geocode.resolve(city).await?;
            station_at(
                &clients.nws,
                place.latitude,
                place.longitude,
                None,
                Some(place.name),
            )
            .await?
        }
        LocationQuery::Coordinates { lat, lon } => {
            station_at(&clients.nws, *lat, *lon, None, None).await?
        }
        LocationQuery::Station(id) => {
            let found = station::Station::from_station(&clients.nws, id).await?;
            let (lat, lon) = found.coordinates();
            station_at(
                &clients.nws,
                lat,
                lon,
                Some(found.properties.station_identifier.clone()),
                Some(found.properties.name),
            )
            .await?
        }
    };

    tracing::info!(station = %record.station_id, place = ?record.place, "resolved location");
    store.set(STATION_KEY, &record)?;
    Ok(record)
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub event: String,
    pub severity: String,
    pub certainty: String,
    pub onset: Option<String>,
    pub ends: Option<String>,
    pub headline: Option<String>,
}

impl From<alerts::Properties> for Alert {
    fn from(p: alerts::Properties) -> Self {
        Self {
            event: p.event,
            severity: p.severity,
            certainty: p.certainty,
            onset: p.onset,
            ends: p.ends,
            headline: p.headline,
        }
    }
}

/// Everything one refresh produced. Built once, never mutated.
///
/// `observed_at` is in the station's own offset, not the viewer's.
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    pub station: StationRecord,
    pub station_name: String,
    pub observed_at: DateTime<FixedOffset>,
    pub condition: String,
    pub current: DisplayWeather,
    pub forecast: Vec<ForecastPair>,
    pub alerts: Vec<Alert>,
    pub air_quality: AirQuality,
    pub astronomy: Astronomy,
}

async fn zone_alerts(nws: &NwsClient, zone_id: Option<&str>) -> Result<alerts::Alerts> {
    match zone_id {
        Some(zone) => alerts::Alerts::from_zone(nws, zone).await,
        None => Ok(alerts::Alerts::default()),
    }
}

/// Fetches all five sources concurrently; any failure fails the snapshot.
pub async fn fetch_snapshot(
    clients: &Clients,
    record: &StationRecord,
    pressure: PressureUnit,
) -> Result<WeatherSnapshot> {
    let (obs, fc, active, air_quality, astronomy) = tokio::try_join!(
        observation::Observation::from_station(&clients.nws, &record.station_id),
        forecast::Forecast::from_url(&clients.nws, &record.forecast_url),
        zone_alerts(&clients.nws, record.zone_id.as_deref()),
        clients
            .air_quality
            .current(record.latitude, record.longitude),
        clients.astronomy.today(record.latitude, record.longitude),
    )?;

    let obs = obs.properties.into_observation(&record.station_id)?;
    let observed_at = obs.timestamp.with_timezone(&astronomy.utc_offset);
    let night = is_nighttime(&observed_at);
    let current = DisplayWeather::convert(&obs, pressure, night);
    let forecast = pair_periods(&fc.into_periods());

    tracing::info!(
        station = %record.station_id,
        icon = %current.icon,
        pairs = forecast.len(),
        alerts = active.features.len(),
        "snapshot fetched"
    );

    Ok(WeatherSnapshot {
        station: record.clone(),
        station_name: obs.station_name,
        observed_at,
        condition: obs.condition,
        current,
        forecast,
        alerts: active
            .features
            .into_iter()
            .map(|f| Alert::from(f.properties))
            .collect(),
        air_quality,
        astronomy,
    })
}
