//! Priced, directed edges derived from a price list.

use chrono::Duration;
use serde::Serialize;

use super::Planet;

/// One provider's offer for one leg, flattened for graph search.
///
/// Edges are derived on demand and never persisted. The `id` is built from
/// the leg and provider ids plus a position suffix when that pair repeats,
/// so it is unique within a price list and rebuilding edges from the same
/// list always yields the same identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Content-derived identifier (`legId:providerId`, then `#n` for the
    /// n-th repeat of that pair).
    pub id: String,

    /// Feed id of the leg this edge came from.
    pub leg_id: String,

    /// Feed id of the leg's route descriptor.
    pub route_id: String,

    pub from: Planet,
    pub to: Planet,

    /// Distance of the leg (0 when the feed omits it).
    pub distance: f64,

    pub provider_id: String,
    pub company_name: String,

    /// Quoted price; always finite.
    pub price: f64,

    /// Flight duration in milliseconds, never negative.
    pub duration_ms: i64,

    /// Raw flight start as sent by the feed.
    pub flight_start: Option<String>,

    /// Raw flight end as sent by the feed.
    pub flight_end: Option<String>,
}

impl Edge {
    /// Build the identifier for a (leg, provider) pair.
    pub fn make_id(leg_id: &str, provider_id: &str) -> String {
        format!("{leg_id}:{provider_id}")
    }

    /// Returns the flight duration.
    pub fn duration(&self) -> Duration {
        Duration::milliseconds(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_id_joins_leg_and_provider() {
        assert_eq!(Edge::make_id("leg-1", "prov-9"), "leg-1:prov-9");
    }

    #[test]
    fn duration_from_millis() {
        let edge = Edge {
            id: Edge::make_id("l", "p"),
            leg_id: "l".into(),
            route_id: "r".into(),
            from: Planet::parse("Earth").unwrap(),
            to: Planet::parse("Mars").unwrap(),
            distance: 100.0,
            provider_id: "p".into(),
            company_name: "SpaceX".into(),
            price: 10.0,
            duration_ms: 90 * 60_000,
            flight_start: None,
            flight_end: None,
        };

        assert_eq!(edge.duration(), Duration::minutes(90));
    }

    #[test]
    fn serializes_camel_case() {
        let edge = Edge {
            id: Edge::make_id("l", "p"),
            leg_id: "l".into(),
            route_id: "r".into(),
            from: Planet::parse("Earth").unwrap(),
            to: Planet::parse("Mars").unwrap(),
            distance: 1.5,
            provider_id: "p".into(),
            company_name: "SpaceX".into(),
            price: 10.0,
            duration_ms: 0,
            flight_start: Some("2024-03-15T10:00:00Z".into()),
            flight_end: None,
        };

        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["from"], "Earth");
        assert_eq!(json["companyName"], "SpaceX");
        assert_eq!(json["durationMs"], 0);
        assert_eq!(json["flightStart"], "2024-03-15T10:00:00Z");
        assert!(json["flightEnd"].is_null());
    }
}
