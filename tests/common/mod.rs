#![allow(dead_code)]

use nwsboard::air_quality::AirQualityClient;
use nwsboard::astronomy::AstronomyClient;
use nwsboard::fetch::Clients;
use nwsboard::geocode::GeocodeClient;
use nwsboard::noaa::NwsClient;
use nwsboard::store::StationRecord;
use serde_json::json;
use wiremock::{
    matchers::{header_exists, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const LAT: f64 = 43.0731;
pub const LON: f64 = -89.4012;

pub fn clients(server: &MockServer) -> Clients {
    let uri = server.uri();
    Clients {
        nws: NwsClient::with_base_url("nwsboard-tests", uri.as_str()).expect("nws client"),
        geocode: GeocodeClient::with_base_url(format!("{uri}/v1/search")).expect("geocode"),
        air_quality: AirQualityClient::with_base_url(format!("{uri}/v1/air-quality"))
            .expect("air quality"),
        astronomy: AstronomyClient::with_base_url(format!("{uri}/v1/forecast"))
            .expect("astronomy"),
    }
}

pub fn record(server: &MockServer) -> StationRecord {
    StationRecord {
        station_id: "KMSN".to_string(),
        place: Some("Madison, WI".to_string()),
        latitude: LAT,
        longitude: LON,
        forecast_url: format!("{}/gridpoints/MKX/37,63/forecast", server.uri()),
        hourly_url: None,
        zone_id: Some("WIZ063".to_string()),
    }
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub async fn mount_points(server: &MockServer) {
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/points/43.0731,-89.4012"))
        .and(header_exists("user-agent"))
        .respond_with(ok(json!({
            "properties": {
                "forecast": format!("{uri}/gridpoints/MKX/37,63/forecast"),
                "forecastHourly": format!("{uri}/gridpoints/MKX/37,63/forecast/hourly"),
                "forecastZone": format!("{uri}/zones/forecast/WIZ063"),
                "observationStations": format!("{uri}/gridpoints/MKX/37,63/stations"),
                "relativeLocation": {
                    "properties": {"city": "Madison", "state": "WI"}
                }
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/MKX/37,63/stations"))
        .respond_with(ok(json!({
            "observationStations": [
                format!("{uri}/stations/KMSN"),
                format!("{uri}/stations/KC29")
            ]
        })))
        .mount(server)
        .await;
}

pub async fn mount_station(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/stations/KMSN"))
        .respond_with(ok(json!({
            "geometry": {"type": "Point", "coordinates": [LON, LAT]},
            "properties": {
                "name": "Madison, Dane County Regional Airport",
                "stationIdentifier": "KMSN"
            }
        })))
        .mount(server)
        .await;
}

pub async fn mount_geocode(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Madison"))
        .respond_with(ok(json!({
            "results": [{
                "name": "Madison",
                "latitude": LAT,
                "longitude": LON,
                "country_code": "US",
                "admin1": "Wisconsin"
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Atlantis"))
        .respond_with(ok(json!({"generationtime_ms": 0.5})))
        .mount(server)
        .await;
}

pub async fn mount_observation(server: &MockServer, timestamp: &str, description: &str) {
    Mock::given(method("GET"))
        .and(path("/stations/KMSN/observations/latest"))
        .respond_with(ok(json!({
            "properties": {
                "stationId": "KMSN",
                "stationName": "Madison, Dane County Regional Airport",
                "timestamp": timestamp,
                "textDescription": description,
                "temperature": {"unitCode": "wmoUnit:degC", "value": 21.1},
                "dewpoint": {"unitCode": "wmoUnit:degC", "value": 10.0},
                "windDirection": {"unitCode": "wmoUnit:degree_(angle)", "value": 180},
                "windSpeed": {"unitCode": "wmoUnit:km_h-1", "value": 24.1},
                "barometricPressure": {"unitCode": "wmoUnit:Pa", "value": 101_930},
                "visibility": {"unitCode": "wmoUnit:m", "value": 16_090},
                "relativeHumidity": {"unitCode": "wmoUnit:percent", "value": 49.86}
            }
        })))
        .mount(server)
        .await;
}

fn period(name: &str, is_daytime: bool, temperature: i32, short: &str) -> serde_json::Value {
    json!({
        "number": 1,
        "name": name,
        "isDaytime": is_daytime,
        "temperature": temperature,
        "temperatureUnit": "F",
        "shortForecast": short,
        "detailedForecast": format!("{short}."),
        "probabilityOfPrecipitation": {"unitCode": "wmoUnit:percent", "value": null}
    })
}

pub async fn mount_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/gridpoints/MKX/37,63/forecast"))
        .respond_with(ok(json!({
            "properties": {
                "periods": [
                    period("Tonight", false, 48, "Partly Cloudy"),
                    period("Friday", true, 66, "Sunny"),
                    period("Friday Night", false, 50, "Chance Showers And Thunderstorms"),
                    period("Saturday", true, 70, "Mostly Sunny")
                ]
            }
        })))
        .mount(server)
        .await;
}

pub async fn mount_alerts(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/alerts/active/zone/WIZ063"))
        .respond_with(ok(json!({
            "type": "FeatureCollection",
            "features": [{
                "properties": {
                    "event": "Wind Advisory",
                    "severity": "Moderate",
                    "certainty": "Likely",
                    "onset": "2026-10-16T10:00:00-05:00",
                    "ends": null,
                    "headline": "Wind Advisory until 7 PM CDT"
                }
            }]
        })))
        .mount(server)
        .await;
}

pub async fn mount_air_quality(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .and(query_param("current", "us_aqi,pm2_5,pm10"))
        .respond_with(ok(json!({
            "current": {"time": "2026-10-16T14:00", "us_aqi": 63, "pm2_5": 17.9, "pm10": 21.0}
        })))
        .mount(server)
        .await;
}

pub async fn mount_astronomy(server: &MockServer) {
    mount_astronomy_at(server, -5 * 3600).await;
}

pub async fn mount_astronomy_at(server: &MockServer, utc_offset_seconds: i32) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("daily", "sunrise,sunset"))
        .respond_with(ok(json!({
            "utc_offset_seconds": utc_offset_seconds,
            "daily": {
                "time": ["2026-10-16"],
                "sunrise": ["2026-10-16T07:11"],
                "sunset": ["2026-10-16T18:14"]
            }
        })))
        .mount(server)
        .await;
}

pub async fn mount_snapshot_sources(server: &MockServer, timestamp: &str) {
    mount_observation(server, timestamp, "Mostly Clear").await;
    mount_forecast(server).await;
    mount_alerts(server).await;
    mount_air_quality(server).await;
    mount_astronomy(server).await;
}
