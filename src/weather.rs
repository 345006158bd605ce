use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};

use crate::icons::{classify_icon, IconKey};
use crate::units::{direction, distance, humidity, pressure, speed, temperature};

/// One forecast time block, as published by the forecast endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub name: String,
    pub is_daytime: bool,
    pub temperature: f64,
    pub short_forecast: String,
    pub detailed_forecast: String,
    pub precipitation_chance: Option<f64>,
}

/// A validated station reading in metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station_name: String,
    pub timestamp: DateTime<FixedOffset>,
    pub condition: String,
    pub temperature_c: f64,
    pub dewpoint_c: f64,
    pub wind_speed_kph: f64,
    pub wind_direction_deg: f64,
    pub pressure_pa: f64,
    pub visibility_m: f64,
    pub relative_humidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressureUnit {
    #[default]
    Inhg,
    Mmhg,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pressure {
    InHg(f64),
    MmHg(f64),
}

impl Pressure {
    pub fn from_pa(pa: f64, unit: PressureUnit) -> Self {
        match unit {
            PressureUnit::Inhg => Self::InHg(pressure::pa2inhg(pa)),
            PressureUnit::Mmhg => Self::MmHg(pressure::pa2mmhg(pa)),
        }
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InHg(v) => write!(f, "{v:.2} inHg"),
            Self::MmHg(v) => write!(f, "{v:.1} mmHg"),
        }
    }
}

/// Observation converted to the units the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayWeather {
    pub temperature_f: i32,
    pub dewpoint_f: i32,
    pub wind_mph: i32,
    pub wind_direction: &'static str,
    pub pressure: Pressure,
    pub relative_humidity: f64,
    pub visibility_mi: i32,
    pub icon: IconKey,
}

impl DisplayWeather {
    /// Converts every field of `observation`; `is_night` only affects the icon.
    pub fn convert(observation: &Observation, unit: PressureUnit, is_night: bool) -> Self {
        Self {
            temperature_f: temperature::c2f(observation.temperature_c),
            dewpoint_f: temperature::c2f(observation.dewpoint_c),
            wind_mph: speed::kph2mph(observation.wind_speed_kph),
            wind_direction: direction::degree_to_compass(observation.wind_direction_deg),
            pressure: Pressure::from_pa(observation.pressure_pa, unit),
            relative_humidity: humidity::round_tenth(observation.relative_humidity),
            visibility_mi: distance::m2mi(observation.visibility_m),
            icon: classify_icon(&observation.condition, is_night),
        }
    }
}

/// Night is before 06:00 or from 20:00 on, in the timestamp's own zone.
pub fn is_nighttime<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> bool {
    let hour = timestamp.hour();
    !(6..20).contains(&hour)
}
