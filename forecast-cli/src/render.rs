//! Plain-text rendering of the search view.

use std::fmt::Write;

use forecast_core::{
    ForecastEntry, GroupedDay, PredictionCategory, View,
    display::{condition_icon, error_icon},
    format_timestamp,
};

pub fn view(view: &View<'_>) -> String {
    match view {
        View::Empty => "Search for a city to see its forecast.\n".to_string(),
        View::Loading { city } => format!("Fetching forecast for {city}...\n"),
        View::Error { message, category, city } => {
            format!("{} Could not load forecast for {city}: {message}\n", error_icon(*category))
        }
        View::Forecast { city, days } => forecast(city, days),
    }
}

fn forecast(city: &str, days: &[GroupedDay]) -> String {
    let mut out = String::new();

    if days.is_empty() {
        let _ = writeln!(out, "No forecast entries for {city}.");
        return out;
    }

    let _ = writeln!(out, "Forecast for {city}");
    for day in days {
        let header = day
            .entries
            .first()
            .and_then(|e| format_timestamp(&e.timestamp))
            .map(|f| f.date)
            .unwrap_or_else(|| day.day_key.clone());

        let _ = writeln!(out, "\n== {header} ==");
        for entry in &day.entries {
            entry_block(&mut out, entry);
        }
    }

    out
}

fn entry_block(out: &mut String, e: &ForecastEntry) {
    let time = format_timestamp(&e.timestamp).map(|f| f.time).unwrap_or_else(|| e.timestamp.clone());

    let _ = writeln!(
        out,
        "  {time}  {} {:.0}°C (feels {:.0}°C)  {}",
        condition_icon(&e.condition_code),
        e.temperature,
        e.feels_like,
        e.condition_description,
    );
    let _ = writeln!(
        out,
        "      range {:.0}°–{:.0}°  humidity {}%  wind {} m/s  pressure {} hPa",
        e.temp_min, e.temp_max, e.humidity, e.wind_speed, e.pressure,
    );

    for prediction in &e.predictions {
        let _ = writeln!(out, "      {} {prediction}", PredictionCategory::classify(prediction).icon());
    }
}
