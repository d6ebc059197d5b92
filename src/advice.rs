//! Advisory tips derived from current conditions
//!
//! Each rule is an independent threshold check. Rules are additive and emit their
//! tips in a fixed order: temperature, rain, wind, humidity.

use std::fmt;

use serde::Serialize;

use crate::data::WeatherMain;

/// Inputs the advisory rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdviceInput {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Condition group reported by the provider
    pub main: WeatherMain,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
}

/// A single piece of advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advice {
    StayIndoorsPeakHours,
    DrinkWater,
    UseSunscreen,
    DressWarmly,
    StayIndoorsIfPossible,
    KeepWarm,
    CarryUmbrella,
    DriveCarefully,
    WearWaterproofShoes,
    StrongWinds,
    SecureLooseObjects,
    HighHumidity,
    UseFans,
}

impl Advice {
    pub fn text(self) -> &'static str {
        match self {
            Self::StayIndoorsPeakHours => "🏠 Stay indoors during peak hours",
            Self::DrinkWater => "💧 Drink plenty of water",
            Self::UseSunscreen => "🧴 Use sunscreen if going out",
            Self::DressWarmly => "🧥 Dress warmly",
            Self::StayIndoorsIfPossible => "🏠 Stay indoors if possible",
            Self::KeepWarm => "🔥 Keep yourself warm",
            Self::CarryUmbrella => "☂️ Carry an umbrella",
            Self::DriveCarefully => "🚗 Drive carefully",
            Self::WearWaterproofShoes => "👟 Wear waterproof shoes",
            Self::StrongWinds => "💨 Strong winds expected",
            Self::SecureLooseObjects => "🏠 Secure loose objects",
            Self::HighHumidity => "🌫️ High humidity - may feel muggy",
            Self::UseFans => "💨 Use fans or AC for comfort",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

const HOT_ADVICE: [Advice; 3] = [
    Advice::StayIndoorsPeakHours,
    Advice::DrinkWater,
    Advice::UseSunscreen,
];
const COLD_ADVICE: [Advice; 3] = [
    Advice::DressWarmly,
    Advice::StayIndoorsIfPossible,
    Advice::KeepWarm,
];
const RAIN_ADVICE: [Advice; 3] = [
    Advice::CarryUmbrella,
    Advice::DriveCarefully,
    Advice::WearWaterproofShoes,
];
const WIND_ADVICE: [Advice; 2] = [Advice::StrongWinds, Advice::SecureLooseObjects];
const HUMIDITY_ADVICE: [Advice; 2] = [Advice::HighHumidity, Advice::UseFans];

/// Returns every advisory tip that applies to the given conditions.
///
/// Hot (> 35 °C) and cold (< 5 °C) advice are mutually exclusive. Rain advice
/// only fires for the `Rain` group, not drizzle or thunderstorms.
pub fn weather_advice(input: &AdviceInput) -> Vec<Advice> {
    let mut advice = Vec::new();

    if input.temperature > 35.0 {
        advice.extend(HOT_ADVICE);
    } else if input.temperature < 5.0 {
        advice.extend(COLD_ADVICE);
    }

    if input.main == WeatherMain::Rain {
        advice.extend(RAIN_ADVICE);
    }

    if input.wind_speed > 10.0 {
        advice.extend(WIND_ADVICE);
    }

    if input.humidity > 80 {
        advice.extend(HUMIDITY_ADVICE);
    }

    advice
}
