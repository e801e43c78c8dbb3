//! Actions driving the activation chain

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Position, WeatherSnapshot};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Screen category =====
    /// Intent: start a fresh activation (ignored while one is in flight)
    ScreenActivate,

    // ===== Location category =====
    /// Result: the user granted location access
    LocationPermissionDidGrant,

    /// Result: the user refused location access
    LocationPermissionDidDeny,

    /// Result: position fix obtained
    LocationDidFix(Position),

    /// Result: position fix failed
    LocationDidError(String),

    // ===== Weather category =====
    /// Result: weather snapshot loaded
    WeatherDidLoad(WeatherSnapshot),

    /// Result: the weather client returned nothing
    WeatherDidFail,

    // ===== UI category =====
    /// Switch between 24-hour and 12-hour times
    UiToggleClock,

    // ===== Uncategorized (global) =====
    /// Spinner animation tick
    Tick,

    /// Exit the application
    Quit,
}
