use serde::{Deserialize, Serialize};

/// One time-stamped forecast record, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    /// ISO-8601-ish timestamp as sent by the server (e.g. `2024-01-01 09:00:00`).
    pub timestamp: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: f64,
    /// Icon token such as `01d`.
    pub condition_code: String,
    pub condition_description: String,
    pub predictions: Vec<String>,
}

/// Outcome of one completed forecast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub success: bool,
    pub entries: Vec<ForecastEntry>,
    pub message: Option<String>,
}

/// Entries sharing one calendar day, ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedDay {
    pub day_key: String,
    pub entries: Vec<ForecastEntry>,
}

// Wire format of a single forecast item. Field names are fixed by the server,
// which serializes absent sections and values as `null`.

#[derive(Debug, Deserialize)]
pub(crate) struct EntryJson {
    dt_txt: String,
    #[serde(default)]
    main: Option<MainJson>,
    #[serde(default)]
    weather: Option<Vec<WeatherJson>>,
    #[serde(default)]
    wind: Option<WindJson>,
    #[serde(default)]
    predictions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MainJson {
    temp: Option<f64>,
    feels_like: Option<f64>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WeatherJson {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WindJson {
    speed: Option<f64>,
}

impl From<EntryJson> for ForecastEntry {
    fn from(raw: EntryJson) -> Self {
        let main = raw.main.unwrap_or_default();
        let wind = raw.wind.unwrap_or_default();
        let weather = raw.weather.unwrap_or_default().into_iter().next().unwrap_or_default();

        Self {
            timestamp: raw.dt_txt,
            temperature: main.temp.unwrap_or_default(),
            feels_like: main.feels_like.unwrap_or_default(),
            temp_min: main.temp_min.unwrap_or_default(),
            temp_max: main.temp_max.unwrap_or_default(),
            humidity: main.humidity.unwrap_or_default().clamp(0.0, 100.0).round() as u8,
            wind_speed: wind.speed.unwrap_or_default(),
            pressure: main.pressure.unwrap_or_default(),
            condition_code: weather.icon.unwrap_or_default(),
            condition_description: weather.description.unwrap_or_default(),
            predictions: raw.predictions.unwrap_or_default(),
        }
    }
}
