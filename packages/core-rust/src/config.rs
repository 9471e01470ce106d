use std::time::Duration;

/// Client-level configuration for request construction.
///
/// Holds the per-service default timeouts stamped onto requests when they are
/// built. Passed explicitly to request constructors so behavior is
/// deterministic and testable; there is no ambient global configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default timeout for key-value operations.
    pub key_value_timeout: Duration,
    /// Default timeout for query service requests.
    pub query_timeout: Duration,
    /// Default timeout for search service requests.
    pub search_timeout: Duration,
    /// Default timeout for analytics service requests.
    pub analytics_timeout: Duration,
    /// Default timeout for management requests (index administration,
    /// bucket administration, stats).
    pub management_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key_value_timeout: Duration::from_millis(2_500),
            query_timeout: Duration::from_secs(75),
            search_timeout: Duration::from_secs(75),
            analytics_timeout: Duration::from_secs(75),
            management_timeout: Duration::from_secs(75),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.key_value_timeout, Duration::from_millis(2_500));
        assert_eq!(config.management_timeout, Duration::from_secs(75));
    }
}
