use crate::weather::ForecastPeriod;

/// A forecast card: a day with its following night, or a lone day or night
/// when the series starts or ends off-cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastPair {
    Full {
        day: ForecastPeriod,
        night: ForecastPeriod,
    },
    DayOnly(ForecastPeriod),
    NightOnly(ForecastPeriod),
}

impl ForecastPair {
    pub fn day(&self) -> Option<&ForecastPeriod> {
        match self {
            Self::Full { day, .. } | Self::DayOnly(day) => Some(day),
            Self::NightOnly(_) => None,
        }
    }

    pub fn night(&self) -> Option<&ForecastPeriod> {
        match self {
            Self::Full { night, .. } | Self::NightOnly(night) => Some(night),
            Self::DayOnly(_) => None,
        }
    }
}

/// Groups chronological periods into day/night pairs, preserving order.
///
/// A series that opens at night (e.g. "Tonight") yields a leading night-only
/// pair; a trailing day without its night yields a day-only pair.
pub fn pair_periods(periods: &[ForecastPeriod]) -> Vec<ForecastPair> {
    let mut pairs = Vec::with_capacity(periods.len() / 2 + 1);
    let mut open_day: Option<ForecastPeriod> = None;

    for period in periods {
        if period.is_daytime {
            if let Some(day) = open_day.replace(period.clone()) {
                pairs.push(ForecastPair::DayOnly(day));
            }
        } else {
            match open_day.take() {
                Some(day) => pairs.push(ForecastPair::Full {
                    day,
                    night: period.clone(),
                }),
                None => pairs.push(ForecastPair::NightOnly(period.clone())),
            }
        }
    }

    if let Some(day) = open_day {
        pairs.push(ForecastPair::DayOnly(day));
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(name: &str, is_daytime: bool) -> ForecastPeriod {
        ForecastPeriod {
            name: name.to_string(),
            is_daytime,
            temperature: 60.0,
            short_forecast: "Sunny".to_string(),
            detailed_forecast: String::new(),
            precipitation_chance: None,
        }
    }

    fn names(pair: &ForecastPair) -> (Option<&str>, Option<&str>) {
        (
            pair.day().map(|p| p.name.as_str()),
            pair.night().map(|p| p.name.as_str()),
        )
    }

    #[test]
    fn empty_input_gives_no_pairs() {
        assert!(pair_periods(&[]).is_empty());
    }

    #[test]
    fn alternating_day_first_gives_full_pairs() {
        let periods = vec![
            period("Today", true),
            period("Tonight", false),
            period("Friday", true),
            period("Friday Night", false),
            period("Saturday", true),
            period("Saturday Night", false),
        ];
        let pairs = pair_periods(&periods);

        assert_eq!(pairs.len(), 3);
        assert!(pairs
            .iter()
            .all(|p| matches!(p, ForecastPair::Full { .. })));
        assert_eq!(names(&pairs[0]), (Some("Today"), Some("Tonight")));
        assert_eq!(names(&pairs[2]), (Some("Saturday"), Some("Saturday Night")));
    }

    #[test]
    fn leading_night_and_trailing_day() {
        let periods = vec![
            period("Tonight", false),
            period("Friday", true),
            period("Friday Night", false),
            period("Saturday", true),
        ];
        let pairs = pair_periods(&periods);

        assert_eq!(pairs.len(), 3);
        assert_eq!(names(&pairs[0]), (None, Some("Tonight")));
        assert_eq!(names(&pairs[1]), (Some("Friday"), Some("Friday Night")));
        assert_eq!(names(&pairs[2]), (Some("Saturday"), None));
    }

    #[test]
    fn consecutive_days_flush_the_first() {
        let periods = vec![
            period("Friday", true),
            period("Saturday", true),
            period("Saturday Night", false),
        ];
        let pairs = pair_periods(&periods);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ForecastPair::DayOnly(period("Friday", true)));
        assert_eq!(names(&pairs[1]), (Some("Saturday"), Some("Saturday Night")));
    }

    #[test]
    fn consecutive_nights_each_stand_alone() {
        let periods = vec![period("Tonight", false), period("Overnight", false)];
        let pairs = pair_periods(&periods);

        assert_eq!(pairs.len(), 2);
        assert!(pairs
            .iter()
            .all(|p| p.day().is_none() && p.night().is_some()));
    }
}
