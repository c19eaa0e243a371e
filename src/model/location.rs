use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Source the mobile client used to obtain a location fix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LocationProvider {
    Gps,
    Network,
    #[strum(to_string = "last_known", serialize = "lastknown", serialize = "last-known")]
    LastKnown,
    Fused,
    #[strum(to_string = "wifi", serialize = "wi-fi", serialize = "wi_fi")]
    Wifi,
    #[serde(other)]
    Unknown,
}

impl LocationProvider {
    /// Lenient parse used at the feed boundary: anything unrecognized maps
    /// to `Unknown` instead of failing.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(LocationProvider::Unknown)
    }
}

/// Location metadata attached to a checkpoint. The distance to the office is
/// computed upstream; this crate never does geodesy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationSample {
    pub provider: LocationProvider,
    pub accuracy_meters: Option<f64>,
    #[serde(default)]
    pub is_mocked: bool,
    pub distance_from_office_meters: Option<f64>,
}

impl LocationSample {
    pub fn new(provider: LocationProvider) -> Self {
        Self {
            provider,
            accuracy_meters: None,
            is_mocked: false,
            distance_from_office_meters: None,
        }
    }

    pub fn accuracy(mut self, meters: f64) -> Self {
        self.accuracy_meters = Some(meters);
        self
    }

    pub fn distance(mut self, meters: f64) -> Self {
        self.distance_from_office_meters = Some(meters);
        self
    }

    pub fn mocked(mut self) -> Self {
        self.is_mocked = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parse_is_case_insensitive() {
        assert_eq!(LocationProvider::parse_lenient("GPS"), LocationProvider::Gps);
        assert_eq!(LocationProvider::parse_lenient(" Fused "), LocationProvider::Fused);
        assert_eq!(LocationProvider::parse_lenient("WiFi"), LocationProvider::Wifi);
        assert_eq!(
            LocationProvider::parse_lenient("lastKnown"),
            LocationProvider::LastKnown
        );
    }

    #[test]
    fn unrecognized_provider_maps_to_unknown() {
        assert_eq!(
            LocationProvider::parse_lenient("satellite-phone"),
            LocationProvider::Unknown
        );
        assert_eq!(LocationProvider::parse_lenient(""), LocationProvider::Unknown);
    }
}
