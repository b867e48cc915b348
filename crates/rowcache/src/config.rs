//! Facade configuration options

/// Configuration for the caching facade
///
/// Fixed at construction and shared by every fetch call. The key prefix
/// namespaces this facade's entries so several facades can share one store
/// without collisions.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether caching is enabled at all
    pub enabled: bool,
    /// Prefix prepended to every derived or explicit cache key
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key_prefix: String::new(),
        }
    }
}

impl CacheConfig {
    /// Create an enabled configuration with the given key prefix
    pub fn new(key_prefix: impl Into<String>) -> Self {
        Self {
            enabled: true,
            key_prefix: key_prefix.into(),
        }
    }

    /// Create a disabled configuration
    ///
    /// Every fetch behaves as if the per-call TTL were the disabled sentinel,
    /// regardless of the TTL actually passed.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the key prefix
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Enable or disable caching
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.key_prefix, "");
    }

    #[test]
    fn test_disabled_config() {
        let config = CacheConfig::disabled();
        assert!(!config.enabled);
    }

    #[test]
    fn test_builder_pattern() {
        let config = CacheConfig::default()
            .with_key_prefix("app:")
            .with_enabled(false);

        assert_eq!(config.key_prefix, "app:");
        assert!(!config.enabled);
    }
}
