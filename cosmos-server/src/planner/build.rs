//! Conversion from a price list to graph edges.
//!
//! Dirty feed entries are skipped rather than failing the whole list:
//! a malformed leg or a leg whose endpoints cannot be resolved contributes
//! no edges, and a malformed offer or one without a finite price is
//! dropped. The report counts what was skipped so callers can log it.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::domain::{Edge, Planet, duration_ms};
use crate::feed::{Leg, PriceList, RouteInfo};

/// Result of building edges from a price list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildReport {
    /// Edges in input order: leg order, then provider order within a leg.
    pub edges: Vec<Edge>,

    /// Legs skipped because the entry was malformed or an endpoint could
    /// not be resolved.
    pub skipped_legs: usize,

    /// Offers skipped because the entry was malformed or the price was
    /// missing or not finite.
    pub skipped_providers: usize,
}

impl BuildReport {
    /// Returns true if nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped_legs == 0 && self.skipped_providers == 0
    }
}

/// Resolve both endpoints of a leg.
fn resolve_leg(leg: &Leg) -> Option<(&RouteInfo, Planet, Planet)> {
    let info = leg.route_info.as_ref()?;
    let from = info.from.as_ref()?.planet()?;
    let to = info.to.as_ref()?.planet()?;
    Some((info, from, to))
}

/// Claim `base` as an edge id, suffixing `#n` if an earlier edge holds it.
fn unique_id(used: &mut HashSet<String>, base: String) -> String {
    if used.insert(base.clone()) {
        return base;
    }

    let mut n = 1;
    loop {
        let candidate = format!("{base}#{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Build priced edges from a price list.
///
/// One edge is produced per (leg, provider) pair that passes validation.
/// Edge ids are unique within the list even when the feed repeats or omits
/// leg and provider ids. The transform is pure: the same price list always
/// yields the same edges, identifiers included.
pub fn build_edges(list: &PriceList) -> BuildReport {
    let mut report = BuildReport::default();
    let mut used_ids = HashSet::new();

    for entry in &list.legs {
        let Some(leg) = entry.valid() else {
            debug!("Skipping malformed leg entry");
            report.skipped_legs += 1;
            continue;
        };
        let Some((info, from, to)) = resolve_leg(leg) else {
            debug!(leg = %leg.id, "Skipping leg with unresolved endpoint");
            report.skipped_legs += 1;
            continue;
        };
        let distance = info.distance_or_zero();

        for entry in &leg.providers {
            let Some(provider) = entry.valid() else {
                debug!(leg = %leg.id, "Skipping malformed offer entry");
                report.skipped_providers += 1;
                continue;
            };
            let Some(price) = provider.finite_price() else {
                debug!(
                    leg = %leg.id,
                    provider = %provider.id,
                    "Skipping offer without a finite price"
                );
                report.skipped_providers += 1;
                continue;
            };

            report.edges.push(Edge {
                id: unique_id(&mut used_ids, Edge::make_id(&leg.id, &provider.id)),
                leg_id: leg.id.clone(),
                route_id: info.id.clone(),
                from: from.clone(),
                to: to.clone(),
                distance,
                provider_id: provider.id.clone(),
                company_name: provider.company_name(),
                price,
                duration_ms: duration_ms(
                    provider.flight_start.as_deref(),
                    provider.flight_end.as_deref(),
                ),
                flight_start: provider.flight_start.clone(),
                flight_end: provider.flight_end.clone(),
            });
        }
    }

    report
}

/// All planets named by the price list, sorted and de-duplicated.
///
/// Each endpoint counts on its own: a leg with one unresolvable side still
/// contributes the other.
pub fn list_planets(list: &PriceList) -> Vec<Planet> {
    let mut planets = BTreeSet::new();

    for info in list.valid_legs().filter_map(|l| l.route_info.as_ref()) {
        for side in [&info.from, &info.to] {
            if let Some(planet) = side.as_ref().and_then(|n| n.planet()) {
                planets.insert(planet);
            }
        }
    }

    planets.into_iter().collect()
}

/// All company names offering any leg, sorted and de-duplicated.
///
/// Includes companies whose offers are skipped during edge building.
pub fn list_companies(list: &PriceList) -> Vec<String> {
    list.valid_legs()
        .flat_map(Leg::valid_providers)
        .map(|p| p.company_name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
