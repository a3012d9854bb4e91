//! Conversion configuration.

/// Default nesting limit.
const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings applied to every conversion of a [`Serializer`](super::services::Serializer).
///
/// # Examples
///
/// ```
/// use protomap::serializer::config::ConversionConfig;
///
/// let config = ConversionConfig::default();
/// assert_eq!(config.max_depth(), 32);
///
/// let strict = ConversionConfig::strict();
/// assert!(strict.max_depth() < config.max_depth());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionConfig {
    max_depth: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConversionConfig {
    /// Creates a configuration with a shallow nesting limit.
    ///
    /// Useful when serializing untrusted or cyclic object graphs.
    #[must_use]
    pub const fn strict() -> Self {
        Self { max_depth: 8 }
    }

    /// Creates a configuration with a deep nesting limit.
    #[must_use]
    pub const fn lenient() -> Self {
        Self { max_depth: 128 }
    }

    /// Overrides the nesting limit.
    ///
    /// The top-level message is depth 0.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the nesting limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}
