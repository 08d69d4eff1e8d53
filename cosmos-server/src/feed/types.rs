//! Price feed DTOs.
//!
//! These types map directly to the TravelPrices JSON payload. The feed is
//! loose about shapes: planet and company fields may be plain strings or
//! objects carrying a `name`, numbers sometimes arrive as text, and ids or
//! timestamps may have the wrong type. Every field below `PriceList` decodes
//! leniently, and array elements that are not objects are kept as
//! [`FeedEntry::Malformed`], so one dirty leg cannot reject a whole payload.
//! Resolution into domain values happens in the planner.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{Planet, is_expired};

/// Company name used when a provider's company cannot be resolved.
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// One fetched price list. Immutable once fetched; `id` identifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
    pub id: String,

    /// Instant after which reservations against this list are refused.
    pub valid_until: DateTime<Utc>,

    #[serde(default, deserialize_with = "entries")]
    pub legs: Vec<FeedEntry<Leg>>,
}

impl PriceList {
    /// Returns true once `now` has reached `valid_until`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.valid_until, now)
    }

    /// Legs that decoded, in feed order.
    pub fn valid_legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter_map(FeedEntry::valid)
    }
}

/// One element of a feed array.
///
/// Elements that are objects decode into `T`; anything else is kept raw so
/// the payload still round-trips through storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeedEntry<T> {
    Valid(T),
    Malformed(Value),
}

impl<T> FeedEntry<T> {
    /// The decoded element, if it decoded.
    pub fn valid(&self) -> Option<&T> {
        match self {
            FeedEntry::Valid(item) => Some(item),
            FeedEntry::Malformed(_) => None,
        }
    }
}

impl<T: DeserializeOwned> FeedEntry<T> {
    fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return FeedEntry::Malformed(value);
        }
        match serde_json::from_value(value.clone()) {
            Ok(item) => FeedEntry::Valid(item),
            Err(_) => FeedEntry::Malformed(value),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FeedEntry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FeedEntry::from_value)
    }
}

/// A point-to-point leg with its provider offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default, deserialize_with = "object")]
    pub route_info: Option<RouteInfo>,

    /// Missing, null or non-array `providers` reads as no offers.
    #[serde(default, deserialize_with = "entries")]
    pub providers: Vec<FeedEntry<Provider>>,
}

impl Leg {
    /// Offers that decoded, in feed order.
    pub fn valid_providers(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter().filter_map(FeedEntry::valid)
    }
}

/// Route descriptor of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default)]
    pub from: Option<NameRef>,
    #[serde(default)]
    pub to: Option<NameRef>,
    #[serde(default)]
    pub distance: Option<RawNumber>,
}

/// One company's priced, timed offer for a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(default, deserialize_with = "text")]
    pub id: String,

    #[serde(default)]
    pub company: Option<NameRef>,
    #[serde(default)]
    pub price: Option<RawNumber>,

    #[serde(default, deserialize_with = "optional_text")]
    pub flight_start: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub flight_end: Option<String>,
}

/// Array of entries; any other shape is empty.
fn entries<'de, D, T>(deserializer: D) -> Result<Vec<FeedEntry<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(FeedEntry::from_value).collect(),
        _ => Vec::new(),
    })
}

/// Object decoded as `T`; any other shape is `None`.
fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// String or number as text; anything else is empty.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A name given either directly or through an entity object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NameRef {
    /// `"Mars"`
    Plain(String),

    /// `{ "id": "...", "name": "Mars" }` or `{ "company": { "name": ... } }`
    Entity(NamedEntity),

    /// Any other JSON shape (number, array, bool).
    Unrecognised(Value),
}

impl<'de> Deserialize<'de> for NameRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => NameRef::Plain(s),
            value @ Value::Object(_) => match serde_json::from_value(value.clone()) {
                Ok(entity) => NameRef::Entity(entity),
                Err(_) => NameRef::Unrecognised(value),
            },
            other => NameRef::Unrecognised(other),
        })
    }
}

/// Object form of a [`NameRef`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// Nested company entity, as some feeds wrap the company one level deeper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Box<NameRef>>,
}

impl NamedEntity {
    /// The `name` field as text, if it is a string or number.
    fn name_text(&self) -> Option<String> {
        match self.name.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl NameRef {
    /// Resolve as a planet: the trimmed plain string or entity name.
    pub fn planet(&self) -> Option<Planet> {
        match self {
            NameRef::Plain(s) => Planet::parse(s).ok(),
            NameRef::Entity(entity) => entity.name_text().and_then(|n| Planet::parse(&n).ok()),
            NameRef::Unrecognised(_) => None,
        }
    }

    /// Resolve as a company name.
    ///
    /// Prefers a plain string, then the entity's `name`, then the `name` of
    /// a nested `company` entity. Does not fall back to [`UNKNOWN_COMPANY`];
    /// see [`Provider::company_name`].
    pub fn company(&self) -> Option<String> {
        match self {
            NameRef::Entity(entity) => self.direct_name().or_else(|| {
                entity
                    .company
                    .as_deref()
                    .and_then(NameRef::direct_name)
            }),
            _ => self.direct_name(),
        }
    }

    /// Plain string or entity name, without looking at nested entities.
    fn direct_name(&self) -> Option<String> {
        let name = match self {
            NameRef::Plain(s) => Some(s.clone()),
            NameRef::Entity(entity) => entity.name_text(),
            NameRef::Unrecognised(_) => None,
        }?;

        (!name.is_empty()).then_some(name)
    }
}

/// A numeric field that may arrive as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawNumber {
    /// The value as a finite number, if it is one.
    ///
    /// Text is trimmed and parsed; blank text is not a number.
    pub fn finite(&self) -> Option<f64> {
        let n = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
            RawNumber::Other(_) => return None,
        };

        n.is_finite().then_some(n)
    }
}

impl RouteInfo {
    /// Leg distance, 0 when missing or non-numeric.
    pub fn distance_or_zero(&self) -> f64 {
        self.distance
            .as_ref()
            .and_then(RawNumber::finite)
            .unwrap_or(0.0)
    }
}

impl Provider {
    /// Company name, falling back to [`UNKNOWN_COMPANY`].
    pub fn company_name(&self) -> String {
        self.company
            .as_ref()
            .and_then(NameRef::company)
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
    }

    /// Price as a finite number, `None` if the offer should be skipped.
    pub fn finite_price(&self) -> Option<f64> {
        self.price.as_ref().and_then(RawNumber::finite)
    }
}
