//! Free-text condition to icon classification.
//!
//! The rule table is a priority list, most severe weather first. A condition
//! mentioning several kinds of weather takes the first rule that matches, so
//! the order of [`ICON_RULES`] and of each rule's keywords is significant.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKey {
    Storm,
    Rain,
    Cloud,
    PartlyCloudy,
    PartlyCloudyNight,
    Sun,
    SunNight,
    Missing,
}

impl IconKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Storm => "storm",
            Self::Rain => "rain",
            Self::Cloud => "cloud",
            Self::PartlyCloudy => "partly_cloudy",
            Self::PartlyCloudyNight => "partly_cloudy_night",
            Self::Sun => "sun",
            Self::SunNight => "sun_night",
            Self::Missing => "missing",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Storm => "⛈",
            Self::Rain => "🌧",
            Self::Cloud => "☁",
            Self::PartlyCloudy => "⛅",
            Self::PartlyCloudyNight => "☁☾",
            Self::Sun => "☀",
            Self::SunNight => "☾",
            Self::Missing => "?",
        }
    }

    /// Night counterpart for the two categories that show the sun.
    fn at_night(self) -> Self {
        match self {
            Self::Sun => Self::SunNight,
            Self::PartlyCloudy => Self::PartlyCloudyNight,
            other => other,
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct IconRule {
    pub key: IconKey,
    pub keywords: &'static [&'static str],
}

pub const ICON_RULES: &[IconRule] = &[
    IconRule {
        key: IconKey::Storm,
        keywords: &["thunderstorm", "t-storm", "thunderstorms"],
    },
    IconRule {
        key: IconKey::Rain,
        keywords: &["rain", "showers", "drizzle", "heavy rain"],
    },
    IconRule {
        key: IconKey::Cloud,
        keywords: &["cloudy", "mostly cloudy", "overcast", "mostly overcast"],
    },
    IconRule {
        key: IconKey::PartlyCloudy,
        keywords: &["partly cloudy", "partly sunny"],
    },
    IconRule {
        key: IconKey::Sun,
        keywords: &["sunny", "clear", "mostly clear", "becoming sunny"],
    },
];

pub fn classify_icon(condition: &str, is_night: bool) -> IconKey {
    let text = condition.to_lowercase();
    let key = ICON_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| text.contains(kw)))
        .map_or(IconKey::Missing, |rule| rule.key);

    if is_night {
        key.at_night()
    } else {
        key
    }
}
