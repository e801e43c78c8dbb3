//! Location service: permission and a single position fix

use async_trait::async_trait;
use reqwest::StatusCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{Coordinates, Position};

pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com";

/// Outcome of a location permission request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(thiserror::Error, Debug)]
pub enum LocationError {
    #[error("location request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("location service returned status {0}")]
    Status(StatusCode),
    #[error("location lookup failed: {0}")]
    Lookup(String),
}

#[async_trait]
pub trait Locator: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// A position supplied up front (e.g. from the command line)
#[derive(Clone, Debug)]
pub struct FixedLocator {
    position: Position,
    permission: PermissionStatus,
}

impl FixedLocator {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            permission: PermissionStatus::Granted,
        }
    }

    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        Ok(self.position.clone())
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

/// Approximate position from the public IP address (ip-api.com)
#[derive(Clone, Debug)]
pub struct IpLocator {
    http: reqwest::Client,
    base_url: String,
    consent: bool,
}

impl IpLocator {
    pub fn new(base_url: impl Into<String>, consent: bool) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            consent,
        }
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn request_permission(&self) -> PermissionStatus {
        if self.consent {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        let url = format!(
            "{}/json/?fields=status,message,lat,lon,city",
            self.base_url
        );
        debug!(%url, "looking up position");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Status(status));
        }
        let data: IpLookupResponse = response.json().await?;

        if data.status != "success" {
            let reason = data.message.unwrap_or(data.status);
            return Err(LocationError::Lookup(reason));
        }
        match (data.lat, data.lon) {
            (Some(lat), Some(lon)) => Ok(Position {
                coordinates: Coordinates::new(lat, lon),
                place: data.city.filter(|c| !c.is_empty()),
            }),
            _ => Err(LocationError::Lookup("response missing coordinates".into())),
        }
    }
}
