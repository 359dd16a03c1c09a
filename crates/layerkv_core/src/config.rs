//! Stack configuration.

/// Configuration for constructing a [`TransactionStack`](crate::TransactionStack).
///
/// Settings are allocation hints only; none of them change read or write
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Initial capacity of each new layer's edit map.
    pub layer_capacity: usize,

    /// Initial capacity of the layer arena (root plus nested transactions).
    pub depth_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layer_capacity: 0,
            depth_capacity: 4,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial edit map capacity for new layers.
    #[must_use]
    pub const fn layer_capacity(mut self, capacity: usize) -> Self {
        self.layer_capacity = capacity;
        self
    }

    /// Sets the initial capacity of the layer arena.
    #[must_use]
    pub const fn depth_capacity(mut self, capacity: usize) -> Self {
        self.depth_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.layer_capacity, 0);
        assert_eq!(config.depth_capacity, 4);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().layer_capacity(64).depth_capacity(16);

        assert_eq!(config.layer_capacity, 64);
        assert_eq!(config.depth_capacity, 16);
    }
}
