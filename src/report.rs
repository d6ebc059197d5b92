//! Report rendering
//!
//! Combines an [`Observation`] with the user's [`Preferences`] into display-ready
//! strings by calling the formatting and classification functions. The result
//! can be printed as text or serialized to JSON.

use std::fmt;

use serde::Serialize;

use crate::advice::{weather_advice, AdviceInput};
use crate::conditions::{self, ConditionType, IconData};
use crate::data::Observation;
use crate::describe::{format_local_time, temperature_description, utc_offset_label, wind_direction};
use crate::preferences::Preferences;
use crate::units::{format_distance, format_pressure, format_temperature, format_wind_speed};

/// Everything needed to display one observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub description: String,
    pub condition: ConditionType,
    pub icon: IconData,
    pub temperature: String,
    pub temperature_label: &'static str,
    pub low: String,
    pub high: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub cloudiness: String,
    pub wind: String,
    pub wind_direction: &'static str,
    pub sunrise: String,
    pub sunset: String,
    pub utc_offset: String,
    pub background: &'static str,
    pub image_url: String,
    pub advice: Vec<&'static str>,
}

impl WeatherReport {
    /// Builds a report; the observation is only read
    pub fn build(observation: &Observation, preferences: &Preferences) -> Self {
        let temp = observation.temperature;
        let advice = weather_advice(&AdviceInput {
            temperature: temp,
            main: observation.main,
            humidity: observation.humidity,
            wind_speed: observation.wind_speed,
        });

        let location = if observation.country.is_empty() {
            observation.city.clone()
        } else {
            format!("{}, {}", observation.city, observation.country)
        };

        Self {
            location,
            description: observation.description.clone(),
            condition: ConditionType::classify(&observation.description),
            icon: conditions::icon_data(&observation.description),
            temperature: format_temperature(temp, preferences.temperature_unit),
            temperature_label: temperature_description(temp),
            low: format_temperature(observation.temp_min, preferences.temperature_unit),
            high: format_temperature(observation.temp_max, preferences.temperature_unit),
            humidity: format!("{}%", observation.humidity),
            pressure: format_pressure(observation.pressure, preferences.pressure_unit),
            visibility: format_distance(observation.visibility, preferences.distance_unit),
            cloudiness: format!("{}%", observation.cloudiness),
            wind: format_wind_speed(observation.wind_speed, preferences.wind_unit),
            wind_direction: wind_direction(observation.wind_deg),
            sunrise: format_local_time(
                observation.sunrise,
                observation.timezone,
                preferences.time_format,
                preferences.region,
            ),
            sunset: format_local_time(
                observation.sunset,
                observation.timezone,
                preferences.time_format,
                preferences.region,
            ),
            utc_offset: utc_offset_label(observation.timezone),
            background: conditions::background(&observation.description, temp).gradient(),
            image_url: conditions::image_url(&observation.description, temp),
            advice: advice.into_iter().map(|a| a.text()).collect(),
        }
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.icon.kind.glyph(), self.location)?;
        writeln!(
            f,
            "  {}  {}  ({})",
            self.temperature, self.temperature_label, self.description
        )?;
        writeln!(f, "  Low {} / High {}", self.low, self.high)?;
        writeln!(f, "  Humidity    {}", self.humidity)?;
        writeln!(f, "  Wind        {} {}", self.wind, self.wind_direction)?;
        writeln!(f, "  Pressure    {}", self.pressure)?;
        writeln!(f, "  Visibility  {}", self.visibility)?;
        writeln!(f, "  Clouds      {}", self.cloudiness)?;
        writeln!(f, "  Sunrise     {}", self.sunrise)?;
        writeln!(f, "  Sunset      {}", self.sunset)?;
        write!(f, "  Timezone    UTC{}", self.utc_offset)?;

        if !self.advice.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Advice:")?;
            for (i, tip) in self.advice.iter().enumerate() {
                if i + 1 == self.advice.len() {
                    write!(f, "    {}", tip)?;
                } else {
                    writeln!(f, "    {}", tip)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::IconKind;
    use crate::data::WeatherMain;
    use crate::preferences::TimeFormat;
    use crate::units::{DistanceUnit, PressureUnit, TemperatureUnit, WindUnit};

    fn london() -> Observation {
        Observation {
            city: "London".to_string(),
            country: "GB".to_string(),
            latitude: 51.5074,
            longitude: -0.1276,
            temperature: 20.0,
            temp_min: 15.5,
            temp_max: 24.4,
            humidity: 85,
            pressure: 1013.0,
            visibility: 5.0,
            cloudiness: 90,
            wind_speed: 10.0,
            wind_deg: 180.0,
            // 2024-07-15 04:00 and 20:00 UTC
            sunrise: 1_721_016_000,
            sunset: 1_721_073_600,
            timezone: 3600,
            description: "moderate rain".to_string(),
            main: WeatherMain::Rain,
        }
    }

    #[test]
    fn test_build_with_default_preferences() {
        let report = WeatherReport::build(&london(), &Preferences::default());

        assert_eq!(report.location, "London, GB");
        assert_eq!(report.temperature, "20°C");
        assert_eq!(report.low, "16°C");
        assert_eq!(report.high, "24°C");
        assert_eq!(report.temperature_label, "Mild 🌥️");
        assert_eq!(report.wind, "36.0 km/h");
        assert_eq!(report.wind_direction, "S");
        assert_eq!(report.pressure, "1013 hPa");
        assert_eq!(report.visibility, "5.0 km");
        assert_eq!(report.sunrise, "05:00");
        assert_eq!(report.sunset, "21:00");
        assert_eq!(report.utc_offset, "+01:00");
        assert_eq!(report.icon.kind, IconKind::CloudRain);
        assert_eq!(report.condition, ConditionType::Rain);
        assert_eq!(report.background, "linear-gradient(135deg, #4682b4 0%, #5f9ea0 100%)");
    }

    #[test]
    fn test_build_respects_preferences() {
        let preferences = Preferences {
            temperature_unit: TemperatureUnit::Fahrenheit,
            wind_unit: WindUnit::Mph,
            pressure_unit: PressureUnit::Inhg,
            distance_unit: DistanceUnit::Miles,
            time_format: TimeFormat::TwelveHour,
            ..Preferences::default()
        };

        let report = WeatherReport::build(&london(), &preferences);

        assert_eq!(report.temperature, "68°F");
        assert_eq!(report.wind, "22.4 mph");
        assert_eq!(report.pressure, "30 inHg");
        assert_eq!(report.visibility, "3.1 mi");
        assert_eq!(report.sunrise, "05:00 AM");
        assert_eq!(report.sunset, "09:00 PM");
    }

    #[test]
    fn test_build_does_not_mutate_observation() {
        let observation = london();
        let before = observation.clone();

        let _ = WeatherReport::build(&observation, &Preferences::default());

        assert_eq!(observation, before);
    }

    #[test]
    fn test_advice_follows_conditions() {
        let report = WeatherReport::build(&london(), &Preferences::default());

        assert_eq!(
            report.advice,
            vec![
                "☂️ Carry an umbrella",
                "🚗 Drive carefully",
                "👟 Wear waterproof shoes",
                "🌫️ High humidity - may feel muggy",
                "💨 Use fans or AC for comfort",
            ]
        );
    }

    #[test]
    fn test_display_contains_key_lines() {
        let text = WeatherReport::build(&london(), &Preferences::default()).to_string();

        assert!(text.starts_with("🌧️ London, GB"));
        assert!(text.contains("20°C"));
        assert!(text.contains("Wind        36.0 km/h S"));
        assert!(text.contains("Timezone    UTC+01:00"));
        assert!(text.contains("Advice:"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = WeatherReport::build(&london(), &Preferences::default());

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["temperature"], "20°C");
        assert_eq!(json["condition"], "rain");
        assert_eq!(json["icon"]["kind"], "CloudRain");
        assert_eq!(json["icon"]["color"], "#4682B4");
    }
}
