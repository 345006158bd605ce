/// Half-up rounding, so `-0.5` goes to `0` and `0.5` to `1`.
///
/// `f64::round` is exact but sends ties away from zero, so only negative
/// ties need moving up.
pub fn round_half_up(value: f64) -> f64 {
    let rounded = value.round();
    if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

#[test]
fn test_round_half_up() {
    assert_eq!(round_half_up(0.5), 1.0);
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-0.5), 0.0);
    assert_eq!(round_half_up(-1.5), -1.0);
    assert_eq!(round_half_up(-2.6), -3.0);
    assert_eq!(round_half_up(0.499_999_999_999_999_94), 0.0);
    assert_eq!(round_half_up(-0.500_000_000_000_000_1), -1.0);
    assert_eq!(round_half_up(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
}

pub mod temperature {
    use super::round_half_up;

    pub fn c2f(temp_c: f64) -> i32 {
        round_half_up(temp_c * 9.0 / 5.0 + 32.0) as i32
    }

    #[test]
    fn test_temperature() {
        assert_eq!(c2f(0.0), 32);
        assert_eq!(c2f(100.0), 212);
        assert_eq!(c2f(-40.0), -40);
        assert_eq!(c2f(21.4), 71);
    }
}

pub mod speed {
    use super::round_half_up;

    const KPH_PER_MPH: f64 = 1.609;

    pub fn kph2mph(kph: f64) -> i32 {
        round_half_up(kph / KPH_PER_MPH) as i32
    }

    #[test]
    fn test_kph2mph() {
        assert_eq!(kph2mph(1.609), 1);
        assert_eq!(kph2mph(0.0), 0);
        assert_eq!(kph2mph(16.09), 10);
    }
}

pub mod pressure {
    const PA_PER_INHG: f64 = 3386.0;
    const PA_PER_MMHG: f64 = 133.3;

    pub fn pa2inhg(pa: f64) -> f64 {
        pa / PA_PER_INHG
    }

    pub fn pa2mmhg(pa: f64) -> f64 {
        pa / PA_PER_MMHG
    }

    #[test]
    fn test_pressure() {
        assert_eq!(format!("{:.2}", pa2inhg(101_592.0)), "30.00");
        assert!((pa2mmhg(13_330.0) - 100.0).abs() < 1e-9);
    }
}

pub mod distance {
    use super::round_half_up;

    const METERS_PER_MILE: f64 = 1609.0;

    pub fn m2mi(meters: f64) -> i32 {
        round_half_up(meters / METERS_PER_MILE) as i32
    }

    #[test]
    fn test_m2mi() {
        assert_eq!(m2mi(16_090.0), 10);
        assert_eq!(m2mi(800.0), 0);
        assert_eq!(m2mi(805.0), 1);
    }
}

pub mod humidity {
    use super::round_half_up;

    pub fn round_tenth(value: f64) -> f64 {
        round_half_up(value * 10.0) / 10.0
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(55.46), 55.5);
        assert_eq!(round_tenth(55.44), 55.4);
        assert_eq!(round_tenth(100.0), 100.0);
    }
}

pub mod direction {
    use super::round_half_up;

    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    pub fn degree_to_compass(deg: f64) -> &'static str {
        let idx = round_half_up(deg / 22.5).rem_euclid(16.0) as usize;
        COMPASS[idx % 16]
    }

    #[test]
    fn test_degree_to_compass() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(180.0), "S");
        assert_eq!(degree_to_compass(270.0), "W");
        assert_eq!(degree_to_compass(360.0), "N");
        assert_eq!(degree_to_compass(348.75), "N");
        assert_eq!(degree_to_compass(11.25), "NNE");
        assert_eq!(degree_to_compass(-22.5), "NNW");
    }
}
