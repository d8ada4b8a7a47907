//! Pure lookups used by presentation layers, plus the state-to-view projection.

use crate::{
    error::ErrorCategory,
    model::GroupedDay,
    search::{SearchPhase, SearchState},
};

const DEFAULT_CONDITION_ICON: &str = "🌤️";

/// Icon for an OpenWeather-style condition code such as `01d`.
pub fn condition_icon(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => DEFAULT_CONDITION_ICON,
    }
}

/// Category of a free-text advisory such as "Carry umbrella".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionCategory {
    Rain,
    Sun,
    Cloud,
    Storm,
    Alert,
}

impl PredictionCategory {
    /// Keyword match, case-insensitive; first matching rule wins.
    pub fn classify(prediction: &str) -> Self {
        let lower = prediction.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has(&["umbrella", "rain"]) {
            PredictionCategory::Rain
        } else if has(&["sun", "clear"]) {
            PredictionCategory::Sun
        } else if has(&["cloud"]) {
            PredictionCategory::Cloud
        } else if has(&["storm", "thunder"]) {
            PredictionCategory::Storm
        } else {
            PredictionCategory::Alert
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionCategory::Rain => "rain",
            PredictionCategory::Sun => "sun",
            PredictionCategory::Cloud => "cloud",
            PredictionCategory::Storm => "storm",
            PredictionCategory::Alert => "alert",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PredictionCategory::Rain => "☔",
            PredictionCategory::Sun => "☀️",
            PredictionCategory::Cloud => "☁️",
            PredictionCategory::Storm => "⛈️",
            PredictionCategory::Alert => "⚠️",
        }
    }
}

pub fn error_icon(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Timeout => "⏱️",
        ErrorCategory::NetworkError => "📡",
        _ => "⚠️",
    }
}

/// What presentation should render for a given [`SearchState`].
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Empty,
    Loading { city: &'a str },
    Error { message: &'a str, category: ErrorCategory, city: &'a str },
    Forecast { city: &'a str, days: Vec<GroupedDay> },
}

impl<'a> View<'a> {
    pub fn of(state: &'a SearchState) -> Self {
        match state.phase {
            SearchPhase::Idle => View::Empty,
            SearchPhase::Loading => View::Loading { city: &state.requested_city },
            SearchPhase::Error => match &state.error {
                Some(err) => View::Error {
                    message: &err.message,
                    category: err.category,
                    city: &state.requested_city,
                },
                None => View::Empty,
            },
            SearchPhase::Success => View::Forecast { city: &state.city, days: state.grouped() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Failure, classify};

    #[test]
    fn known_condition_codes() {
        assert_eq!(condition_icon("01d"), "☀️");
        assert_eq!(condition_icon("01n"), "🌙");
        assert_eq!(condition_icon("10d"), "🌦️");
        assert_eq!(condition_icon("10n"), "🌧️");
        assert_eq!(condition_icon("50n"), "🌫️");
    }

    #[test]
    fn unknown_condition_code_uses_default() {
        assert_eq!(condition_icon(""), DEFAULT_CONDITION_ICON);
        assert_eq!(condition_icon("99x"), DEFAULT_CONDITION_ICON);
    }

    #[test]
    fn prediction_keywords() {
        assert_eq!(PredictionCategory::classify("Carry umbrella"), PredictionCategory::Rain);
        assert_eq!(PredictionCategory::classify("Use sunscreen lotion"), PredictionCategory::Sun);
        assert_eq!(PredictionCategory::classify("Cloudy afternoon"), PredictionCategory::Cloud);
        assert_eq!(PredictionCategory::classify("Don't step out! A Storm is brewing!"), PredictionCategory::Storm);
        assert_eq!(PredictionCategory::classify("It's too windy, watch out!"), PredictionCategory::Alert);
    }

    #[test]
    fn prediction_rules_apply_in_order() {
        // Contains both "rain" and "thunder": the rain rule is checked first.
        assert_eq!(PredictionCategory::classify("Thunder and RAIN"), PredictionCategory::Rain);
    }

    #[test]
    fn view_follows_phase() {
        let mut state = SearchState::default();
        assert_eq!(View::of(&state), View::Empty);

        state.phase = SearchPhase::Loading;
        state.requested_city = "Lima".to_string();
        assert_eq!(View::of(&state), View::Loading { city: "Lima" });

        state.phase = SearchPhase::Error;
        state.error = Some(classify(&Failure::Timeout, "Lima"));
        match View::of(&state) {
            View::Error { message, category, city } => {
                assert_eq!(message, "Request timeout. Please try again.");
                assert_eq!(category, ErrorCategory::Timeout);
                assert_eq!(city, "Lima");
                assert_eq!(error_icon(category), "⏱️");
            }
            other => panic!("unexpected view: {other:?}"),
        }

        state.phase = SearchPhase::Success;
        state.error = None;
        state.city = "Lima".to_string();
        assert_eq!(View::of(&state), View::Forecast { city: "Lima", days: vec![] });
    }
}
