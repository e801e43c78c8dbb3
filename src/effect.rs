//! Effects - side effects declared by the reducer

use std::sync::Arc;

use tracing::{info, warn};

use crate::action::Action;
use crate::api::WeatherClient;
use crate::location::{Locator, PermissionStatus};
use crate::state::Coordinates;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Ask the location service for permission
    RequestPermission,
    /// Obtain a single position fix
    FixPosition,
    /// Fetch weather for the given coordinates
    FetchWeather {
        coordinates: Coordinates,
        place: Option<String>,
    },
}

impl Effect {
    /// Task key the effect runs under
    pub fn task_key(&self) -> &'static str {
        match self {
            Effect::RequestPermission => "permission",
            Effect::FixPosition => "position",
            Effect::FetchWeather { .. } => "weather",
        }
    }
}

/// Runs effects against the location service and weather client,
/// turning each into the result action.
#[derive(Clone)]
pub struct EffectRunner {
    locator: Arc<dyn Locator>,
    weather: WeatherClient,
}

impl EffectRunner {
    pub fn new(locator: Arc<dyn Locator>, weather: WeatherClient) -> Self {
        Self { locator, weather }
    }

    pub async fn run(&self, effect: Effect) -> Action {
        match effect {
            Effect::RequestPermission => match self.locator.request_permission().await {
                PermissionStatus::Granted => Action::LocationPermissionDidGrant,
                PermissionStatus::Denied => {
                    info!("location permission denied");
                    Action::LocationPermissionDidDeny
                }
            },
            Effect::FixPosition => match self.locator.current_position().await {
                Ok(position) => Action::LocationDidFix(position),
                Err(e) => {
                    warn!(error = %e, "position fix failed");
                    Action::LocationDidError(e.to_string())
                }
            },
            Effect::FetchWeather { coordinates, place } => {
                let weather = self
                    .weather
                    .current_weather(coordinates.latitude, coordinates.longitude)
                    .await;
                match weather {
                    Some(snapshot) => match place {
                        Some(place) => Action::WeatherDidLoad(snapshot.named(place)),
                        None => Action::WeatherDidLoad(snapshot),
                    },
                    None => Action::WeatherDidFail,
                }
            }
        }
    }
}
