//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::{ClockStyle, ViewerZone};

/// Frame interval of the loading spinner.
pub const SPINNER_TICK_MS: u64 = 80;

pub const MSG_PERMISSION_DENIED: &str = "Location permission denied";
pub const MSG_POSITION_FAILED: &str = "Failed to get location";
pub const MSG_WEATHER_FAILED: &str = "Failed to load weather";

/// A point on the globe
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Human-readable form, e.g. `48.86°N, 2.35°E`
    pub fn label(&self) -> String {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        format!(
            "{:.2}°{}, {:.2}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// A single position fix from the location service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub coordinates: Coordinates,
    /// Place name, when the location service knows one
    pub place: Option<String>,
}

/// One fetched weather response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub name: String,
    /// Current temperature in °C
    pub temperature: f64,
    pub weather_code: u8, // WMO weather code
    pub description: String,
    /// Unix seconds
    pub sunrise: i64,
    /// Unix seconds
    pub sunset: i64,
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl WeatherSnapshot {
    /// Replace the display name, e.g. with the place from a position fix.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// What the screen shows. Loading → Error | Ready, once per activation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum ScreenState {
    #[default]
    Loading,
    Error(String),
    Ready(WeatherSnapshot),
}

impl ScreenState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        match self {
            ScreenState::Ready(weather) => Some(weather),
            _ => None,
        }
    }
}

/// Step of the activation chain currently awaiting a result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Stage {
    #[default]
    Pending,
    Permission,
    Position,
    Weather,
    Done,
}

impl Stage {
    pub fn in_flight(&self) -> bool {
        matches!(self, Stage::Permission | Stage::Position | Stage::Weather)
    }

    pub fn status(&self) -> &'static str {
        match self {
            Stage::Pending => "Starting",
            Stage::Permission => "Requesting location permission",
            Stage::Position => "Finding your location",
            Stage::Weather => "Fetching weather",
            Stage::Done => "Done",
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Screen", label = "State", debug_fmt)]
    pub screen: ScreenState,

    /// Not restored from snapshots: a step in flight when the snapshot was
    /// taken has no task behind it anymore.
    #[debug(section = "Screen", label = "Stage", debug_fmt)]
    #[serde(skip)]
    pub stage: Stage,

    /// Position fix of the current activation
    #[debug(section = "Location", label = "Position", debug_fmt)]
    pub position: Option<Position>,

    #[debug(section = "Display", label = "Clock", debug_fmt)]
    pub clock: ClockStyle,

    #[debug(section = "Display", label = "Zone", debug_fmt)]
    pub zone: ViewerZone,

    /// Spinner frame counter
    #[debug(skip)]
    pub spinner_tick: u32,
}

impl AppState {
    pub fn new(clock: ClockStyle, zone: ViewerZone) -> Self {
        Self {
            clock,
            zone,
            ..Default::default()
        }
    }
}
