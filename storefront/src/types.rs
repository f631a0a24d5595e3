//! Domain types for the storefront.
//!
//! Events arrive either from the compiled-in table (English field names) or from the remote
//! catalogue endpoint, which uses Spanish field names, numeric ids and a nested category
//! object. Both shapes deserialize into the same [`Event`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Image shown when an event has no usable image reference.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event
///
/// Opaque: the wire may carry a string or an integer, both are kept as text so
/// `/events/7` and `{"id": 7}` compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct EventId(String);

impl EventId {
    /// Create an `EventId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

// ============================================================================
// Value objects
// ============================================================================

/// Ticket price in cents
///
/// Non-negative by construction. Serialized as a decimal number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    /// Create a price from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Get the price in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` tickets
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Parse a decimal amount such as `45.5`
    ///
    /// Returns `None` for negative or non-finite amounts.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // checked non-negative and finite
    pub fn from_decimal(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount >= 0.0).then(|| Self((amount * 100.0).round() as u64))
    }

    /// The amount as a decimal number
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // ticket prices are far below 2^52 cents
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Self::from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {amount}")))
    }
}

/// Category label
///
/// The remote catalogue nests the label as `{ "id": 1, "nombre": "Música" }`; the
/// static table uses a plain string. Only the label matters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Category(String);

impl Category {
    /// Create a category from its label
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as shown to users
    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCategory {
            Label(String),
            Nested {
                #[serde(alias = "nombre")]
                name: String,
            },
        }

        Ok(match RawCategory::deserialize(deserializer)? {
            RawCategory::Label(label) | RawCategory::Nested { name: label } => Self(label),
        })
    }
}

/// When an event takes place
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) or a bare date
/// (midnight UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventDate(DateTime<Utc>);

impl EventDate {
    /// Wrap an instant
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Parse any accepted date format
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(instant.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    /// The comparable instant
    #[must_use]
    pub const fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

/// One entry of an event's programme
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Start time, display-only (e.g. `"18:00"`)
    pub time: String,
    /// What happens
    pub activity: String,
}

// ============================================================================
// Entities
// ============================================================================

/// A purchasable occasion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique id within the catalogue
    pub id: EventId,
    /// Event name
    #[serde(alias = "nombre")]
    pub name: String,
    /// Short description
    #[serde(alias = "descripcion")]
    pub description: String,
    /// Category label
    #[serde(alias = "categoria")]
    pub category: Category,
    /// Date and time
    #[serde(alias = "fecha")]
    pub date: EventDate,
    /// Display-only start time (e.g. `"20:00"`)
    #[serde(default)]
    pub time: Option<String>,
    /// Venue name
    #[serde(alias = "lugar")]
    pub venue: String,
    /// City or area
    #[serde(default)]
    pub location: String,
    /// Ticket price
    #[serde(alias = "precio")]
    pub price: Price,
    /// Image reference (URL or path)
    #[serde(alias = "imagen", default)]
    pub image: Option<String>,
    /// Longer text for the detail page
    #[serde(alias = "longDescription", default)]
    pub long_description: Option<String>,
    /// Performing artists
    #[serde(default)]
    pub lineup: Option<Vec<String>>,
    /// Programme
    #[serde(default)]
    pub schedule: Option<Vec<ScheduleItem>>,
}

impl Event {
    /// Image to display, falling back to the placeholder when absent or blank
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Detail text: the long description when present, else the short one
    #[must_use]
    pub fn about(&self) -> &str {
        self.long_description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(&self.description)
    }

    /// Lineup, if the event has a non-empty one
    #[must_use]
    pub fn lineup(&self) -> Option<&[String]> {
        self.lineup.as_deref().filter(|artists| !artists.is_empty())
    }

    /// Schedule, if the event has a non-empty one
    #[must_use]
    pub fn schedule(&self) -> Option<&[ScheduleItem]> {
        self.schedule.as_deref().filter(|items| !items.is_empty())
    }
}

/// The signed-in user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Opaque token from the remote auth endpoint, never validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
