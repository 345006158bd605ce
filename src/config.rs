use std::path::PathBuf;
use std::time::Duration;

use crate::air_quality::AIR_QUALITY_URL;
use crate::astronomy::FORECAST_URL;
use crate::cli::{Args, PressureArg};
use crate::geocode::GEOCODE_URL;
use crate::noaa::BASE_URL;
use crate::weather::PressureUnit;

pub const CONFIG_DIR_ENV: &str = "NWSBOARD_CONFIG_DIR";

const USER_AGENT: &str = concat!("nwsboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub nws: String,
    pub geocode: String,
    pub air_quality: String,
    pub astronomy: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            nws: BASE_URL.to_string(),
            geocode: GEOCODE_URL.to_string(),
            air_quality: AIR_QUALITY_URL.to_string(),
            astronomy: FORECAST_URL.to_string(),
        }
    }
}

/// How the user asked to pick a location this run.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { lat: f64, lon: f64 },
    Station(String),
    Saved,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub location: LocationQuery,
    pub pressure: PressureUnit,
    pub refresh: Duration,
    pub once: bool,
    pub forget: bool,
    pub config_dir: PathBuf,
    pub user_agent: String,
    pub endpoints: Endpoints,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let location = match (args.city, args.lat.zip(args.lon), args.station) {
            (Some(city), _, _) => LocationQuery::City(city),
            (None, Some((lat, lon)), _) => LocationQuery::Coordinates { lat, lon },
            (None, None, Some(station)) => LocationQuery::Station(station.to_uppercase()),
            (None, None, None) => LocationQuery::Saved,
        };
        let pressure = match args.pressure {
            PressureArg::Inhg => PressureUnit::Inhg,
            PressureArg::Mmhg => PressureUnit::Mmhg,
        };
        let defaults = Endpoints::default();

        Self {
            location,
            pressure,
            refresh: Duration::from_secs(args.refresh),
            once: args.once,
            forget: args.forget,
            config_dir: config_dir(),
            user_agent: USER_AGENT.to_string(),
            endpoints: Endpoints {
                nws: args.nws_url.unwrap_or(defaults.nws),
                geocode: args.geocode_url.unwrap_or(defaults.geocode),
                air_quality: args.air_quality_url.unwrap_or(defaults.air_quality),
                astronomy: args.astronomy_url.unwrap_or(defaults.astronomy),
            },
        }
    }
}

fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config").join("nwsboard"),
        None => PathBuf::from(".nwsboard"),
    }
}
