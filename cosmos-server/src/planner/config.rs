//! Search configuration for the route planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of legs in one route.
    pub hop_limit: usize,

    /// Maximum number of routes to return.
    /// Search stops as soon as this many routes are found.
    pub result_cap: usize,

    /// Maximum depth when listing reachable destinations.
    pub reach_hop_limit: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(hop_limit: usize, result_cap: usize, reach_hop_limit: usize) -> Self {
        Self {
            hop_limit,
            result_cap,
            reach_hop_limit,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hop_limit: 5,
            result_cap: 50,
            reach_hop_limit: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.hop_limit, 5);
        assert_eq!(config.result_cap, 50);
        assert_eq!(config.reach_hop_limit, 5);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(2, 10, 3);

        assert_eq!(config.hop_limit, 2);
        assert_eq!(config.result_cap, 10);
        assert_eq!(config.reach_hop_limit, 3);
    }
}
