//! Weather condition classification
//!
//! Maps a free-text weather description such as "light rain" or "broken clouds"
//! to a canonical [`ConditionType`], and from there to an icon, a display color,
//! a background gradient and a representative image. Unknown descriptions are
//! classified as clear.

use serde::{Deserialize, Serialize};

/// Canonical condition types a description can be classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionType {
    Clear,
    PartlyCloudy,
    Cloudy,
    Overcast,
    LightRain,
    Rain,
    HeavyRain,
    Drizzle,
    Thunderstorm,
    LightSnow,
    Snow,
    HeavySnow,
    Sleet,
    /// Mist, fog, haze, dust, sand and smoke all collapse here
    Fog,
}

/// Known description phrases, lower-case, and the condition type each maps to
const CONDITION_PHRASES: &[(&str, ConditionType)] = &[
    ("clear sky", ConditionType::Clear),
    ("clear", ConditionType::Clear),
    ("few clouds", ConditionType::PartlyCloudy),
    ("scattered clouds", ConditionType::Cloudy),
    ("broken clouds", ConditionType::Cloudy),
    ("overcast clouds", ConditionType::Overcast),
    ("light rain", ConditionType::LightRain),
    ("moderate rain", ConditionType::Rain),
    ("heavy rain", ConditionType::HeavyRain),
    ("very heavy rain", ConditionType::HeavyRain),
    ("extreme rain", ConditionType::HeavyRain),
    ("freezing rain", ConditionType::Sleet),
    ("light intensity shower rain", ConditionType::LightRain),
    ("shower rain", ConditionType::Rain),
    ("heavy intensity shower rain", ConditionType::HeavyRain),
    ("light intensity drizzle", ConditionType::Drizzle),
    ("drizzle", ConditionType::Drizzle),
    ("heavy intensity drizzle", ConditionType::Drizzle),
    ("thunderstorm", ConditionType::Thunderstorm),
    ("thunderstorm with light rain", ConditionType::Thunderstorm),
    ("thunderstorm with rain", ConditionType::Thunderstorm),
    ("thunderstorm with heavy rain", ConditionType::Thunderstorm),
    ("light snow", ConditionType::LightSnow),
    ("snow", ConditionType::Snow),
    ("heavy snow", ConditionType::HeavySnow),
    ("sleet", ConditionType::Sleet),
    ("mist", ConditionType::Fog),
    ("fog", ConditionType::Fog),
    ("haze", ConditionType::Fog),
    ("dust", ConditionType::Fog),
    ("sand", ConditionType::Fog),
    ("smoke", ConditionType::Fog),
];

impl ConditionType {
    /// Classifies a free-text description, case-insensitively.
    ///
    /// Descriptions missing from the phrase table are treated as clear.
    pub fn classify(description: &str) -> Self {
        let needle = description.trim().to_lowercase();
        CONDITION_PHRASES
            .iter()
            .find(|(phrase, _)| *phrase == needle)
            .map(|(_, condition)| *condition)
            .unwrap_or(Self::Clear)
    }

    /// Icon and color used to render this condition
    pub fn icon(self) -> IconData {
        let (kind, color) = match self {
            Self::Clear => (IconKind::Sun, "#FFA500"),
            Self::PartlyCloudy => (IconKind::Cloud, "#87CEEB"),
            Self::Cloudy | Self::Overcast => (IconKind::Cloud, "#696969"),
            Self::LightRain | Self::Rain | Self::HeavyRain => (IconKind::CloudRain, "#4682B4"),
            Self::Drizzle => (IconKind::CloudDrizzle, "#4682B4"),
            Self::Thunderstorm => (IconKind::CloudLightning, "#483D8B"),
            Self::LightSnow | Self::Snow | Self::HeavySnow | Self::Sleet => {
                (IconKind::CloudSnow, "#B0E0E6")
            }
            Self::Fog => (IconKind::Cloud, "#D3D3D3"),
        };
        IconData { kind, color }
    }
}

/// Icon shapes available to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconKind {
    Sun,
    Cloud,
    CloudRain,
    CloudDrizzle,
    CloudLightning,
    CloudSnow,
}

impl IconKind {
    /// Emoji rendering of the icon for terminal output
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "☀️",
            Self::Cloud => "☁️",
            Self::CloudRain => "🌧️",
            Self::CloudDrizzle => "🌦️",
            Self::CloudLightning => "⛈️",
            Self::CloudSnow => "🌨️",
        }
    }
}

/// Icon shape plus its hex display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconData {
    pub kind: IconKind,
    pub color: &'static str,
}

/// Returns the icon and color for a weather description
pub fn icon_data(description: &str) -> IconData {
    ConditionType::classify(description).icon()
}

/// Background gradient tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Background {
    Hot,
    Warm,
    PleasantClear,
    Rainy,
    Cloudy,
    Mild,
    Cool,
    Cold,
}

impl Background {
    /// CSS gradient for this tier
    pub fn gradient(self) -> &'static str {
        match self {
            Self::Hot => "linear-gradient(135deg, #ff6b6b 0%, #ffa500 100%)",
            Self::Warm => "linear-gradient(135deg, #ffa500 0%, #ff7043 100%)",
            Self::PleasantClear => "linear-gradient(135deg, #87ceeb 0%, #98d8e8 100%)",
            Self::Rainy => "linear-gradient(135deg, #4682b4 0%, #5f9ea0 100%)",
            Self::Cloudy => "linear-gradient(135deg, #696969 0%, #778899 100%)",
            Self::Mild => "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
            Self::Cool => "linear-gradient(135deg, #4682b4 0%, #2f4f4f 100%)",
            Self::Cold => "linear-gradient(135deg, #b0c4de 0%, #4682b4 100%)",
        }
    }
}

/// Selects the background for a description at a given temperature (°C).
///
/// Temperature takes priority: above 35 is hot, above 25 warm, above 15 the
/// condition decides, above 5 cool, anything else cold. Only `rain` and
/// `drizzle` count as rainy in the mild band; light and heavy rain get the
/// default mild gradient.
pub fn background(description: &str, temperature: f64) -> Background {
    if temperature > 35.0 {
        Background::Hot
    } else if temperature > 25.0 {
        Background::Warm
    } else if temperature > 15.0 {
        match ConditionType::classify(description) {
            ConditionType::Clear => Background::PleasantClear,
            ConditionType::Rain | ConditionType::Drizzle => Background::Rainy,
            ConditionType::Cloudy => Background::Cloudy,
            _ => Background::Mild,
        }
    } else if temperature > 5.0 {
        Background::Cool
    } else {
        Background::Cold
    }
}

const IMAGE_BASE_URL: &str = "https://images.unsplash.com/";
const IMAGE_PARAMS: &str = "?w=400&auto=format&fit=crop&q=60";

const IMAGE_SUNNY: &str = "photo-1506905925346-21bda4d32df4";
const IMAGE_SNOW: &str = "photo-1547754980-3df97fed72a8";
const IMAGE_PARTLY_CLOUDY: &str = "photo-1504608524841-42fe6f032b4b";
const IMAGE_CLOUDY: &str = "photo-1561484930-998b6a7b22e8";
const IMAGE_RAIN: &str = "photo-1519692933481-e162a57d6721";
const IMAGE_DRIZZLE: &str = "photo-1515694346937-94d85e41e6f0";
const IMAGE_LIGHTNING: &str = "photo-1605727216801-e27ce1d0cc28";
const IMAGE_FOG: &str = "photo-1487621167305-5d248087c724";

/// Returns a representative image URL for a description at a temperature (°C).
///
/// Extreme temperatures win over the condition: above 35 always shows the sunny
/// image and below 0 the snow image.
pub fn image_url(description: &str, temperature: f64) -> String {
    let photo = if temperature > 35.0 {
        IMAGE_SUNNY
    } else if temperature < 0.0 {
        IMAGE_SNOW
    } else {
        match ConditionType::classify(description) {
            ConditionType::Clear => IMAGE_SUNNY,
            ConditionType::PartlyCloudy => IMAGE_PARTLY_CLOUDY,
            ConditionType::Cloudy | ConditionType::Overcast => IMAGE_CLOUDY,
            ConditionType::LightRain | ConditionType::Rain | ConditionType::HeavyRain => IMAGE_RAIN,
            ConditionType::Drizzle => IMAGE_DRIZZLE,
            ConditionType::Thunderstorm => IMAGE_LIGHTNING,
            ConditionType::LightSnow | ConditionType::Snow | ConditionType::HeavySnow => IMAGE_SNOW,
            ConditionType::Fog => IMAGE_FOG,
            // No dedicated sleet image
            ConditionType::Sleet => IMAGE_PARTLY_CLOUDY,
        }
    };
    format!("{}{}{}", IMAGE_BASE_URL, photo, IMAGE_PARAMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_rain_icon() {
        assert_eq!(
            icon_data("light rain"),
            IconData {
                kind: IconKind::CloudRain,
                color: "#4682B4"
            }
        );
    }

    #[test]
    fn test_broken_clouds_is_cloudy_not_clear() {
        let icon = icon_data("broken clouds");
        assert_eq!(icon.kind, IconKind::Cloud);
        assert_eq!(icon.color, "#696969");
        assert_ne!(icon, icon_data("clear sky"));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(ConditionType::classify("Light Rain"), ConditionType::LightRain);
        assert_eq!(ConditionType::classify("OVERCAST CLOUDS"), ConditionType::Overcast);
    }

    #[test]
    fn test_unknown_description_defaults_to_clear() {
        assert_eq!(ConditionType::classify("volcanic ash"), ConditionType::Clear);
        assert_eq!(ConditionType::classify(""), ConditionType::Clear);
        assert_eq!(icon_data("tornado").kind, IconKind::Sun);
    }

    #[test]
    fn test_fog_family_collapses() {
        for phrase in ["mist", "fog", "haze", "dust", "sand", "smoke"] {
            assert_eq!(ConditionType::classify(phrase), ConditionType::Fog, "{}", phrase);
            assert_eq!(icon_data(phrase).color, "#D3D3D3");
        }
    }

    #[test]
    fn test_snow_family_and_sleet_share_icon() {
        for phrase in ["light snow", "snow", "heavy snow", "sleet", "freezing rain"] {
            assert_eq!(icon_data(phrase).kind, IconKind::CloudSnow, "{}", phrase);
        }
    }

    #[test]
    fn test_thunderstorm_and_drizzle_icons() {
        assert_eq!(icon_data("thunderstorm with rain").kind, IconKind::CloudLightning);
        assert_eq!(icon_data("thunderstorm with rain").color, "#483D8B");
        assert_eq!(icon_data("light intensity drizzle").kind, IconKind::CloudDrizzle);
    }

    #[test]
    fn test_background_temperature_dominates_condition() {
        assert_ne!(background("clear sky", 40.0), background("clear sky", 10.0));
        assert_eq!(background("clear sky", 40.0), Background::Hot);
        assert_eq!(background("clear sky", 10.0), Background::Cool);
        assert_eq!(background("heavy snow", 30.0), Background::Warm);
    }

    #[test]
    fn test_background_mild_band_uses_condition() {
        assert_eq!(background("clear sky", 20.0), Background::PleasantClear);
        assert_eq!(background("moderate rain", 20.0), Background::Rainy);
        assert_eq!(background("drizzle", 20.0), Background::Rainy);
        assert_eq!(background("broken clouds", 20.0), Background::Cloudy);
        assert_eq!(background("light rain", 20.0), Background::Mild);
        assert_eq!(background("overcast clouds", 20.0), Background::Mild);
    }

    #[test]
    fn test_background_thresholds_are_strict() {
        assert_eq!(background("clear", 35.0), Background::Warm);
        assert_eq!(background("clear", 25.0), Background::PleasantClear);
        assert_eq!(background("clear", 15.0), Background::Cool);
        assert_eq!(background("clear", 5.0), Background::Cold);
    }

    #[test]
    fn test_background_gradient_strings() {
        assert_eq!(
            Background::Hot.gradient(),
            "linear-gradient(135deg, #ff6b6b 0%, #ffa500 100%)"
        );
        assert_eq!(
            Background::Cold.gradient(),
            "linear-gradient(135deg, #b0c4de 0%, #4682b4 100%)"
        );
    }

    #[test]
    fn test_image_url_extremes_override_condition() {
        assert!(image_url("thunderstorm", 40.0).contains(IMAGE_SUNNY));
        assert!(image_url("clear sky", -3.0).contains(IMAGE_SNOW));
        assert!(image_url("thunderstorm", 20.0).contains(IMAGE_LIGHTNING));
        assert!(image_url("mist", 12.0).contains(IMAGE_FOG));
        assert!(image_url("sleet", 2.0).contains(IMAGE_PARTLY_CLOUDY));
        assert!(image_url("clear", 20.0).starts_with("https://images.unsplash.com/"));
    }
}
