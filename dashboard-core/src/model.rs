use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One geocoding match as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMatch {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Some places (oceans, disputed areas) come back without a country.
    #[serde(default)]
    pub country: String,
}

/// A city offered to the user while typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u64,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Suggestion {
    /// "London, United Kingdom", or just the name when the country is unknown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

impl From<GeoMatch> for Suggestion {
    fn from(m: GeoMatch) -> Self {
        Self {
            id: m.id,
            name: m.name,
            country: m.country,
            latitude: m.latitude,
            longitude: m.longitude,
        }
    }
}

/// The `current_weather` block of a forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
    /// Local ISO time without seconds, e.g. "2026-10-18T14:00".
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub is_day: Option<u8>,
}

impl CurrentWeather {
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        let raw = self.time.as_deref()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

/// What the dashboard shows after a successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
    #[serde(default)]
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherResult {
    pub fn new(place: &GeoMatch, current: &CurrentWeather) -> Self {
        Self {
            city: place.name.clone(),
            country: place.country.clone(),
            temperature: current.temperature,
            windspeed: current.windspeed,
            winddirection: current.winddirection,
            weathercode: current.weathercode,
            observed_at: current.observed_at(),
        }
    }

    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.weathercode)
    }
}

/// Weather condition categories mapped from WMO codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// See https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 | 66 | 67 => Self::Sleet,
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}
