//! Core library for the `forecast` client.
//!
//! This crate defines:
//! - The HTTP client for the forecast service and its failure taxonomy
//! - Normalization of (possibly re-wrapped) response envelopes
//! - Day grouping of forecast entries
//! - The search lifecycle state machine
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also back other presentation layers.

pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod group;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod search;

pub use config::Config;
pub use display::{PredictionCategory, View};
pub use error::{ClassifiedError, ErrorCategory, Failure, classify};
pub use format::{FormattedDateTime, format_timestamp};
pub use group::group;
pub use model::{ForecastEntry, ForecastResult, GroupedDay};
pub use normalize::{NormalizeError, normalize};
pub use provider::{ForecastProvider, http::ForecastClient, provider_from_config};
pub use search::{PendingSearch, Resolution, SearchLifecycle, SearchPhase, SearchState, SearchTicket};
