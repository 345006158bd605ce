pub mod air_quality;
pub mod app;
pub mod astronomy;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod geocode;
pub mod icons;
pub mod logging;
pub mod noaa;
pub mod pairing;
pub mod render;
pub mod store;
pub mod units;
pub mod weather;

pub use error::{Error, Result};
