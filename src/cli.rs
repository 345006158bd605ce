use clap::builder::{styling::AnsiColor, Styles};
use clap::{Parser, ValueEnum};

const ABOUT: &str = "NOAA weather dashboard";

const LONG_ABOUT: &str = "
Terminal dashboard for current conditions, a day/night forecast, alerts, air quality, and sun times
sourced from NOAA (api.weather.gov) and Open-Meteo.

Pick a location with a station identifier (e.g. KMSN, KELP), a city name (--city), or coordinates
(--lat/--lon). The resolved station is saved, so subsequent runs use the last location unless
another one is given.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PressureArg {
    #[default]
    Inhg,
    Mmhg,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "nwsboard", version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "NOAA weather station identifier (e.g. KMSN, KELP, etc.)")]
    pub station: Option<String>,

    /// City to geocode, e.g. "Madison, WI"
    #[arg(long, conflicts_with_all = ["station", "lat"])]
    pub city: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true, conflicts_with = "station")]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Barometric pressure unit
    #[arg(long, value_enum, default_value_t = PressureArg::Inhg)]
    pub pressure: PressureArg,

    /// Seconds between automatic refreshes
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(30..))]
    pub refresh: u64,

    /// Print the dashboard once as text and exit
    #[arg(long)]
    pub once: bool,

    /// Forget the saved location before doing anything else
    #[arg(long)]
    pub forget: bool,

    #[arg(long, hide = true)]
    pub nws_url: Option<String>,

    #[arg(long, hide = true)]
    pub geocode_url: Option<String>,

    #[arg(long, hide = true)]
    pub air_quality_url: Option<String>,

    #[arg(long, hide = true)]
    pub astronomy_url: Option<String>,
}
