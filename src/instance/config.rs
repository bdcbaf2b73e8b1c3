//! Parameters for creating an instance.

/// Buffer sizes, resource preferences and flag masks handed to every implementation factory
/// when an instance is created.
///
/// All counts default to zero, the resource list to empty and both flag masks to zero. The
/// `with_*` methods allow building a configuration in a single expression:
///
/// ```rust
/// use hmsbeagle::InstanceConfig;
///
/// let config = InstanceConfig::default()
///     .with_tip_count(4)
///     .with_state_count(4)
///     .with_pattern_count(1000)
///     .with_resource_list(vec![1, 0]);
///
/// assert_eq!(config.tip_count, 4);
/// assert_eq!(config.resource_list, vec![1, 0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstanceConfig {
    /// Number of tip data elements
    pub tip_count: usize,

    /// Number of partials buffers to create
    pub partials_buffer_count: usize,

    /// Number of compact state representation buffers to create
    pub compact_buffer_count: usize,

    /// Number of states in the continuous-time Markov chain
    pub state_count: usize,

    /// Number of site patterns to be handled by the instance
    pub pattern_count: usize,

    /// Number of eigen-decomposition buffers to allocate
    pub eigen_buffer_count: usize,

    /// Number of transition matrix buffers
    pub matrix_buffer_count: usize,

    /// Resource numbers the caller is willing to run on, in order of preference.
    /// Empty means any resource.
    pub resource_list: Vec<i32>,

    /// Opaque flags the caller would like the instance to have
    pub preference_flags: u64,

    /// Opaque flags the instance must have
    pub requirement_flags: u64,
}

impl InstanceConfig {
    /// Set the number of tips.
    #[must_use]
    pub fn with_tip_count(mut self, count: usize) -> Self {
        self.tip_count = count;
        self
    }

    /// Set the number of partials buffers.
    #[must_use]
    pub fn with_partials_buffer_count(mut self, count: usize) -> Self {
        self.partials_buffer_count = count;
        self
    }

    /// Set the number of compact buffers.
    #[must_use]
    pub fn with_compact_buffer_count(mut self, count: usize) -> Self {
        self.compact_buffer_count = count;
        self
    }

    /// Set the number of states.
    #[must_use]
    pub fn with_state_count(mut self, count: usize) -> Self {
        self.state_count = count;
        self
    }

    /// Set the number of site patterns.
    #[must_use]
    pub fn with_pattern_count(mut self, count: usize) -> Self {
        self.pattern_count = count;
        self
    }

    /// Set the number of eigen-decomposition buffers.
    #[must_use]
    pub fn with_eigen_buffer_count(mut self, count: usize) -> Self {
        self.eigen_buffer_count = count;
        self
    }

    /// Set the number of transition matrix buffers.
    #[must_use]
    pub fn with_matrix_buffer_count(mut self, count: usize) -> Self {
        self.matrix_buffer_count = count;
        self
    }

    /// Set the preferred resources.
    #[must_use]
    pub fn with_resource_list(mut self, resources: Vec<i32>) -> Self {
        self.resource_list = resources;
        self
    }

    /// Set the preference flags.
    #[must_use]
    pub fn with_preference_flags(mut self, flags: u64) -> Self {
        self.preference_flags = flags;
        self
    }

    /// Set the requirement flags.
    #[must_use]
    pub fn with_requirement_flags(mut self, flags: u64) -> Self {
        self.requirement_flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let config = InstanceConfig::default();
        assert_eq!(config.tip_count, 0);
        assert_eq!(config.partials_buffer_count, 0);
        assert_eq!(config.compact_buffer_count, 0);
        assert_eq!(config.state_count, 0);
        assert_eq!(config.pattern_count, 0);
        assert_eq!(config.eigen_buffer_count, 0);
        assert_eq!(config.matrix_buffer_count, 0);
        assert!(config.resource_list.is_empty());
        assert_eq!(config.preference_flags, 0);
        assert_eq!(config.requirement_flags, 0);
    }

    #[test]
    fn builder_sets_every_field() {
        let config = InstanceConfig::default()
            .with_tip_count(5)
            .with_partials_buffer_count(10)
            .with_compact_buffer_count(3)
            .with_state_count(4)
            .with_pattern_count(250)
            .with_eigen_buffer_count(1)
            .with_matrix_buffer_count(8)
            .with_resource_list(vec![2])
            .with_preference_flags(0x3)
            .with_requirement_flags(0x1);

        assert_eq!(config.tip_count, 5);
        assert_eq!(config.partials_buffer_count, 10);
        assert_eq!(config.compact_buffer_count, 3);
        assert_eq!(config.state_count, 4);
        assert_eq!(config.pattern_count, 250);
        assert_eq!(config.eigen_buffer_count, 1);
        assert_eq!(config.matrix_buffer_count, 8);
        assert_eq!(config.resource_list, vec![2]);
        assert_eq!(config.preference_flags, 0x3);
        assert_eq!(config.requirement_flags, 0x1);
    }
}
