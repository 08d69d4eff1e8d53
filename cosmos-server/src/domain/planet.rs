//! Planet name type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a planet name cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid planet name: {reason}")]
pub struct InvalidPlanet {
    reason: &'static str,
}

/// A resolved planet name.
///
/// Planet names are stored trimmed and are never empty. This type
/// guarantees that any `Planet` value is usable as a graph node.
///
/// # Examples
///
/// ```
/// use cosmos_server::domain::Planet;
///
/// let earth = Planet::parse("  Earth ").unwrap();
/// assert_eq!(earth.as_str(), "Earth");
///
/// // Blank names are rejected
/// assert!(Planet::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Planet(String);

impl Planet {
    /// Parse a planet name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidPlanet> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidPlanet {
                reason: "must not be blank",
            });
        }

        Ok(Planet(trimmed.to_string()))
    }

    /// Returns the planet name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Planet {
    type Error = InvalidPlanet;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Planet::parse(&value)
    }
}

impl From<Planet> for String {
    fn from(planet: Planet) -> Self {
        planet.0
    }
}

impl PartialEq<str> for Planet {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Debug for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Planet({})", self.0)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(Planet::parse("Mars").unwrap().as_str(), "Mars");
        assert_eq!(Planet::parse("  Mars\t").unwrap().as_str(), "Mars");
        assert_eq!(Planet::parse("Earth Moon").unwrap().as_str(), "Earth Moon");
    }

    #[test]
    fn reject_blank() {
        assert!(Planet::parse("").is_err());
        assert!(Planet::parse("   ").is_err());
        assert!(Planet::parse("\n\t").is_err());
    }

    #[test]
    fn display_and_debug() {
        let planet = Planet::parse("Jupiter").unwrap();
        assert_eq!(format!("{}", planet), "Jupiter");
        assert_eq!(format!("{:?}", planet), "Planet(Jupiter)");
    }

    #[test]
    fn compares_with_str() {
        let planet = Planet::parse("Venus").unwrap();
        assert!(planet == *"Venus");
        assert!(planet != *"Mercury");
    }

    #[test]
    fn serde_roundtrip_validates() {
        let planet: Planet = serde_json::from_str("\" Saturn \"").unwrap();
        assert_eq!(planet.as_str(), "Saturn");
        assert_eq!(serde_json::to_string(&planet).unwrap(), "\"Saturn\"");

        assert!(serde_json::from_str::<Planet>("\"  \"").is_err());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut planets = vec![
            Planet::parse("Uranus").unwrap(),
            Planet::parse("Earth").unwrap(),
            Planet::parse("Mars").unwrap(),
        ];
        planets.sort();
        let names: Vec<&str> = planets.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Earth", "Mars", "Uranus"]);
    }
}
