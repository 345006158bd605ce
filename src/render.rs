use std::io::Write;

use crate::astronomy::format_duration;
use crate::fetch::WeatherSnapshot;
use crate::icons::classify_icon;
use crate::weather::ForecastPeriod;

pub const MISSING: &str = "--";

/// What the dashboard shows for one refresh cycle.
#[derive(Debug, Clone)]
pub enum View {
    Loading,
    Ready(Box<WeatherSnapshot>),
    Unavailable(String),
}

pub trait Renderer {
    fn render(&mut self, view: &View) -> anyhow::Result<()>;
}

pub fn headline(snapshot: &WeatherSnapshot) -> String {
    let place = snapshot
        .station
        .place
        .as_deref()
        .unwrap_or(&snapshot.station_name);
    format!("{place} ({})", snapshot.station.station_id)
}

pub fn current_lines(snapshot: &WeatherSnapshot) -> Vec<(&'static str, String)> {
    let c = &snapshot.current;
    let condition = if snapshot.condition.is_empty() {
        MISSING.to_string()
    } else {
        snapshot.condition.clone()
    };
    vec![
        ("Temperature", format!("{}°F", c.temperature_f)),
        ("Conditions", format!("{} {condition}", c.icon.glyph())),
        ("Humidity", format!("{}%", c.relative_humidity)),
        ("Dew Point", format!("{}°F", c.dewpoint_f)),
        ("Wind", format!("{} {} MPH", c.wind_direction, c.wind_mph)),
        ("Pressure", c.pressure.to_string()),
        ("Visibility", format!("{} mi", c.visibility_mi)),
    ]
}

pub fn sky_lines(snapshot: &WeatherSnapshot) -> Vec<(&'static str, String)> {
    let aq = &snapshot.air_quality;
    let astro = &snapshot.astronomy;
    let pm = |v: Option<f64>| v.map_or(MISSING.to_string(), |v| format!("{v:.1} µg/m³"));
    vec![
        ("AQI", format!("{} ({})", aq.us_aqi, aq.category)),
        ("PM2.5", pm(aq.pm2_5)),
        ("PM10", pm(aq.pm10)),
        ("Sunrise", astro.sunrise.format("%H:%M").to_string()),
        ("Sunset", astro.sunset.format("%H:%M").to_string()),
        ("Daylight", format_duration(astro.day_length())),
    ]
}

/// One-line summary of a forecast period, with its icon.
pub fn period_summary(period: &ForecastPeriod) -> String {
    let icon = classify_icon(&period.short_forecast, !period.is_daytime);
    let rain = period
        .precipitation_chance
        .map(|p| format!(", {p:.0}% precip"))
        .unwrap_or_default();
    format!(
        "{} {:.0}°F {}{rain}",
        icon.glyph(),
        period.temperature,
        period.short_forecast
    )
}

/// Plain-text rendering, used for one-shot output.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn snapshot(&mut self, s: &WeatherSnapshot) -> std::io::Result<()> {
        writeln!(self.out, "{}", headline(s))?;
        writeln!(
            self.out,
            "{} at {}",
            s.station_name,
            s.observed_at.format("%d-%m-%Y %H:%M")
        )?;
        writeln!(self.out)?;
        for (label, value) in current_lines(s).into_iter().chain(sky_lines(s)) {
            writeln!(self.out, "  {label:13}{value}")?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "Alerts")?;
        if s.alerts.is_empty() {
            writeln!(self.out, "  {MISSING}")?;
        }
        for alert in &s.alerts {
            writeln!(
                self.out,
                "  {} [{} / {}]",
                alert.event, alert.severity, alert.certainty
            )?;
            if let Some(text) = &alert.headline {
                writeln!(self.out, "    {text}")?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "Forecast")?;
        for pair in &s.forecast {
            for period in pair.day().into_iter().chain(pair.night()) {
                writeln!(self.out, "  {:16}{}", period.name, period_summary(period))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &View) -> anyhow::Result<()> {
        match view {
            View::Loading => writeln!(self.out, "Loading...")?,
            View::Ready(snapshot) => self.snapshot(snapshot)?,
            View::Unavailable(reason) => writeln!(self.out, "Could not load weather: {reason}")?,
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDateTime};

    use super::*;
    use crate::air_quality::{AirQuality, AqiCategory};
    use crate::astronomy::Astronomy;
    use crate::fetch::Alert;
    use crate::pairing::pair_periods;
    use crate::store::StationRecord;
    use crate::weather::{DisplayWeather, Observation, PressureUnit};

    fn period(name: &str, is_daytime: bool, short: &str) -> ForecastPeriod {
        ForecastPeriod {
            name: name.to_string(),
            is_daytime,
            temperature: if is_daytime { 61.0 } else { 44.0 },
            short_forecast: short.to_string(),
            detailed_forecast: String::new(),
            precipitation_chance: if is_daytime { None } else { Some(30.0) },
        }
    }

    pub(crate) fn snapshot() -> WeatherSnapshot {
        let obs = Observation {
            station_name: "Madison, Dane County Regional Airport".to_string(),
            timestamp: DateTime::parse_from_rfc3339("2026-10-16T14:53:00-05:00").unwrap(),
            condition: "Mostly Cloudy".to_string(),
            temperature_c: 15.0,
            dewpoint_c: 5.0,
            wind_speed_kph: 20.0,
            wind_direction_deg: 270.0,
            pressure_pa: 101_600.0,
            visibility_m: 16_090.0,
            relative_humidity: 51.26,
        };
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap();
        WeatherSnapshot {
            station: StationRecord {
                station_id: "KMSN".to_string(),
                place: Some("Madison, WI".to_string()),
                latitude: 43.07,
                longitude: -89.4,
                forecast_url: "http://localhost/forecast".to_string(),
                hourly_url: None,
                zone_id: Some("WIZ063".to_string()),
            },
            station_name: obs.station_name.clone(),
            observed_at: obs.timestamp,
            condition: obs.condition.clone(),
            current: DisplayWeather::convert(&obs, PressureUnit::Inhg, false),
            forecast: pair_periods(&[
                period("Tonight", false, "Chance Rain Showers"),
                period("Friday", true, "Sunny"),
                period("Friday Night", false, "Mostly Clear"),
            ]),
            alerts: vec![Alert {
                event: "Frost Advisory".to_string(),
                severity: "Minor".to_string(),
                certainty: "Likely".to_string(),
                onset: None,
                ends: None,
                headline: Some("Frost Advisory until 9AM CDT Saturday".to_string()),
            }],
            air_quality: AirQuality {
                us_aqi: 42,
                pm2_5: Some(8.25),
                pm10: None,
                category: AqiCategory::Good,
            },
            astronomy: Astronomy {
                sunrise: at("2026-10-16T07:12"),
                sunset: at("2026-10-16T18:20"),
                utc_offset: FixedOffset::west_opt(5 * 3600).unwrap(),
            },
        }
    }

    fn render_text(view: &View) -> String {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(view).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn text_renders_current_conditions() {
        let out = render_text(&View::Ready(Box::new(snapshot())));
        assert!(out.starts_with("Madison, WI (KMSN)\n"));
        assert!(out.contains("Temperature  59°F"));
        assert!(out.contains("Wind         W 12 MPH"));
        assert!(out.contains("Humidity     51.3%"));
        assert!(out.contains("30.01 inHg"));
        assert!(out.contains("42 (Good)"));
        assert!(out.contains("Daylight     11h 08m"));
        assert!(out.contains("Frost Advisory [Minor / Likely]"));
    }

    #[test]
    fn text_shows_observation_time_in_station_offset() {
        let mut s = snapshot();
        s.observed_at = DateTime::parse_from_rfc3339("2026-10-16T19:53:00Z")
            .unwrap()
            .with_timezone(&s.astronomy.utc_offset);
        let out = render_text(&View::Ready(Box::new(s)));
        assert!(out.contains("Airport at 16-10-2026 14:53"), "{out}");
    }

    #[test]
    fn text_prints_alert_headline_under_event() {
        let out = render_text(&View::Ready(Box::new(snapshot())));
        assert!(out.contains(
            "  Frost Advisory [Minor / Likely]\n    Frost Advisory until 9AM CDT Saturday\n"
        ));

        let mut s = snapshot();
        s.alerts[0].headline = None;
        let out = render_text(&View::Ready(Box::new(s)));
        assert!(out.contains("Frost Advisory [Minor / Likely]\n\nForecast"));
    }

    #[test]
    fn text_renders_forecast_pairs_in_order() {
        let out = render_text(&View::Ready(Box::new(snapshot())));
        let tonight = out.find("Tonight").unwrap();
        let friday = out.find("Friday ").unwrap();
        let friday_night = out.find("Friday Night").unwrap();
        assert!(tonight < friday && friday < friday_night);
        assert!(out.contains("44°F Chance Rain Showers, 30% precip"));
    }

    #[test]
    fn text_renders_unavailable_without_partial_data() {
        let out = render_text(&View::Unavailable("request failed".to_string()));
        assert_eq!(out, "Could not load weather: request failed\n");
    }

    #[test]
    fn period_summary_uses_night_icons() {
        let night = period("Tonight", false, "Clear");
        assert!(period_summary(&night).starts_with("☾ 44°F Clear"));
    }
}
