use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public IP address as reported by the IP discovery service.
///
/// The text is kept exactly as received, no parsing or validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpAddress(String);

impl IpAddress {
    pub fn new(ip: impl Into<String>) -> Self {
        Self(ip.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IpAddress {
    fn from(ip: String) -> Self {
        Self(ip)
    }
}

impl From<&str> for IpAddress {
    fn from(ip: &str) -> Self {
        Self(ip.to_string())
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One predicted ISS fly-over
///
/// Both fields hold whatever JSON number the prediction service sent, so
/// `134564234.0` or a fractional duration survive unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassWindow {
    /// Start of the pass, unix epoch seconds
    pub risetime: f64,
    /// Visible duration in seconds
    pub duration: f64,
}

impl PassWindow {
    pub fn new(risetime: f64, duration: f64) -> Self {
        Self { risetime, duration }
    }

    /// Rise time as a UTC timestamp, `None` if not finite or out of chrono's range.
    pub fn rise_time(&self) -> Option<DateTime<Utc>> {
        if !self.risetime.is_finite() {
            return None;
        }
        let secs = self.risetime.floor();
        let nanos = ((self.risetime - secs) * 1e9) as u32;
        // saturating cast, chrono rejects the extremes
        DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
    }
}

/// Pass windows in the order the prediction service returned them
pub type PassWindowList = Vec<PassWindow>;
