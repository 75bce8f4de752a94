//! Configuration for pipe network generation.
//!
//! # Example
//!
//! ```
//! use pipe_gen::{CouplerElbowWeights, DegreeDistribution, GeneratorConfig};
//!
//! let config = GeneratorConfig::new(500)
//!     .with_tree_mode(true)
//!     .with_degrees(DegreeDistribution::two_to_six())
//!     .with_coupler_elbow(CouplerElbowWeights::new(0.7, 0.3))
//!     .with_seed(42);
//!
//! assert!(config.validate().is_ok());
//! ```

use pipe_types::{Direction, PipeError, PipeResult};

/// Largest port count a node can have.
pub const MAX_DEGREE: usize = Direction::ALL.len();

/// Discrete weighted distribution of target port counts.
///
/// Weight `i` belongs to degree `min_degree + i`.
///
/// # Example
///
/// ```
/// use pipe_gen::DegreeDistribution;
///
/// let d = DegreeDistribution::default();
/// assert_eq!(d.min_degree(), 1);
/// assert_eq!(d.max_degree(), 6);
/// assert_eq!(d.weights(), &[0.05, 0.50, 0.20, 0.10, 0.10, 0.05]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeDistribution {
    min_degree: usize,
    weights: Vec<f64>,
}

impl Default for DegreeDistribution {
    fn default() -> Self {
        Self {
            min_degree: 1,
            weights: vec![0.05, 0.50, 0.20, 0.10, 0.10, 0.05],
        }
    }
}

impl DegreeDistribution {
    /// Creates a distribution over `min_degree..min_degree + weights.len()`.
    ///
    /// The distribution is not checked here; see [`DegreeDistribution::validate`].
    #[must_use]
    pub const fn new(min_degree: usize, weights: Vec<f64>) -> Self {
        Self {
            min_degree,
            weights,
        }
    }

    /// Preset restricted to degrees 2 through 6, so no node is a dead end by choice.
    #[must_use]
    pub fn two_to_six() -> Self {
        Self::new(2, vec![0.50, 0.25, 0.10, 0.10, 0.05])
    }

    /// Every node targets exactly `degree` ports.
    #[must_use]
    pub fn fixed(degree: usize) -> Self {
        Self::new(degree, vec![1.0])
    }

    /// Smallest degree that can be drawn.
    #[must_use]
    pub const fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Largest degree that can be drawn.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        (self.min_degree + self.weights.len()).saturating_sub(1)
    }

    /// Weights in degree order.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterates `(degree, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (self.min_degree + i, w))
    }

    /// Checks the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidConfig`] if the weights are empty, negative,
    /// non-finite or all zero, or if the degree range leaves `1..=6`.
    pub fn validate(&self) -> PipeResult<()> {
        if self.weights.is_empty() {
            return Err(PipeError::invalid_config("degree weights must not be empty"));
        }
        if self.min_degree == 0 {
            return Err(PipeError::invalid_config("min_degree must be at least 1"));
        }
        if self.max_degree() > MAX_DEGREE {
            return Err(PipeError::invalid_config(format!(
                "max degree {} exceeds {MAX_DEGREE}",
                self.max_degree()
            )));
        }
        validate_weights("degree", &self.weights)
    }
}

/// Weights of the straight and bent outcomes of the ambiguous two-port case.
///
/// When a node already has one forced port and needs exactly one more, it
/// either continues straight through ("coupler") or turns ("elbow").
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouplerElbowWeights {
    /// Weight of the straight pass-through.
    pub coupler: f64,
    /// Weight of the bend.
    pub elbow: f64,
}

impl Default for CouplerElbowWeights {
    fn default() -> Self {
        Self {
            coupler: 0.8,
            elbow: 0.2,
        }
    }
}

impl CouplerElbowWeights {
    /// Creates a weight pair. Weights need not sum to one.
    #[must_use]
    pub const fn new(coupler: f64, elbow: f64) -> Self {
        Self { coupler, elbow }
    }

    /// Always pick the straight pass-through.
    #[must_use]
    pub const fn always_coupler() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Always pick a bend.
    #[must_use]
    pub const fn always_elbow() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Normalized probability of the coupler outcome.
    #[must_use]
    pub fn coupler_probability(&self) -> f64 {
        self.coupler / (self.coupler + self.elbow)
    }

    /// Checks the weights.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidConfig`] if a weight is negative or
    /// non-finite, or if both are zero.
    pub fn validate(&self) -> PipeResult<()> {
        validate_weights("coupler/elbow", &[self.coupler, self.elbow])
    }
}

fn validate_weights(what: &str, weights: &[f64]) -> PipeResult<()> {
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(PipeError::invalid_config(format!(
            "{what} weights must be finite and non-negative, got {bad}"
        )));
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(PipeError::invalid_config(format!(
            "{what} weights must not all be zero"
        )));
    }
    Ok(())
}

/// Rules the port completion step follows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionPolicy {
    /// Tie-break weights for the ambiguous two-port case.
    pub coupler_elbow: CouplerElbowWeights,
    /// When `false`, the ambiguous two-port case is resolved uniformly.
    pub special_cases: bool,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            coupler_elbow: CouplerElbowWeights::default(),
            special_cases: true,
        }
    }
}

/// Configuration for a generation run.
///
/// Defaults:
/// - 20 nodes
/// - Tree mode: off
/// - Degrees: [`DegreeDistribution::default`]
/// - Coupler/elbow: 0.8 / 0.2
/// - Special cases: on
/// - Seed: none (entropy)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    num_nodes: usize,
    tree_mode: bool,
    degrees: DegreeDistribution,
    policy: CompletionPolicy,
    seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(20)
    }
}

impl GeneratorConfig {
    /// Creates a configuration with a node budget and default settings.
    #[must_use]
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            tree_mode: false,
            degrees: DegreeDistribution::default(),
            policy: CompletionPolicy::default(),
            seed: None,
        }
    }

    /// Sets the node budget.
    #[must_use]
    pub const fn with_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = num_nodes;
        self
    }

    /// Enables or disables cycle removal.
    #[must_use]
    pub const fn with_tree_mode(mut self, tree_mode: bool) -> Self {
        self.tree_mode = tree_mode;
        self
    }

    /// Sets the target degree distribution.
    #[must_use]
    pub fn with_degrees(mut self, degrees: DegreeDistribution) -> Self {
        self.degrees = degrees;
        self
    }

    /// Sets the coupler/elbow tie-break weights.
    #[must_use]
    pub const fn with_coupler_elbow(mut self, weights: CouplerElbowWeights) -> Self {
        self.policy.coupler_elbow = weights;
        self
    }

    /// Enables or disables the coupler/elbow special case.
    #[must_use]
    pub const fn with_special_cases(mut self, enabled: bool) -> Self {
        self.policy.special_cases = enabled;
        self
    }

    /// Fixes the RNG seed, making runs reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Removes the seed (use entropy).
    #[must_use]
    pub const fn without_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Node budget.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Whether cycles are removed.
    #[must_use]
    pub const fn tree_mode(&self) -> bool {
        self.tree_mode
    }

    /// Target degree distribution.
    #[must_use]
    pub const fn degrees(&self) -> &DegreeDistribution {
        &self.degrees
    }

    /// Port completion rules.
    #[must_use]
    pub const fn policy(&self) -> &CompletionPolicy {
        &self.policy
    }

    /// RNG seed, if fixed.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> PipeResult<()> {
        if self.num_nodes == 0 {
            return Err(PipeError::invalid_config("num_nodes must be positive"));
        }
        self.degrees.validate()?;
        self.policy.coupler_elbow.validate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.num_nodes(), 20);
        assert!(!config.tree_mode());
        assert!(config.policy().special_cases);
        assert_eq!(config.seed(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new(5)
            .with_num_nodes(7)
            .with_tree_mode(true)
            .with_special_cases(false)
            .with_seed(9);
        assert_eq!(config.num_nodes(), 7);
        assert!(config.tree_mode());
        assert!(!config.policy().special_cases);
        assert_eq!(config.seed(), Some(9));
        assert_eq!(config.without_seed().seed(), None);
    }

    #[test]
    fn test_zero_nodes_rejected() {
        let err = GeneratorConfig::new(0).validate().unwrap_err();
        assert!(err.to_string().contains("num_nodes"));
    }

    #[test]
    fn test_degree_ranges() {
        assert_eq!(DegreeDistribution::two_to_six().min_degree(), 2);
        assert_eq!(DegreeDistribution::two_to_six().max_degree(), 6);
        assert_eq!(DegreeDistribution::fixed(3).max_degree(), 3);
        let pairs: Vec<_> = DegreeDistribution::fixed(4).iter().collect();
        assert_eq!(pairs, vec![(4, 1.0)]);
    }

    #[test]
    fn test_degree_validation() {
        assert!(DegreeDistribution::default().validate().is_ok());
        assert!(DegreeDistribution::new(1, vec![]).validate().is_err());
        assert!(DegreeDistribution::new(0, vec![1.0]).validate().is_err());
        assert!(DegreeDistribution::new(2, vec![1.0; 6]).validate().is_err());
        assert!(DegreeDistribution::new(1, vec![0.0, 0.0]).validate().is_err());
        assert!(DegreeDistribution::new(1, vec![1.0, -0.1]).validate().is_err());
        assert!(DegreeDistribution::new(1, vec![f64::NAN]).validate().is_err());
        assert!(DegreeDistribution::new(6, vec![1.0]).validate().is_ok());
    }

    #[test]
    fn test_coupler_elbow_validation() {
        assert!(CouplerElbowWeights::default().validate().is_ok());
        assert!(CouplerElbowWeights::always_coupler().validate().is_ok());
        assert!(CouplerElbowWeights::new(0.0, 0.0).validate().is_err());
        assert!(CouplerElbowWeights::new(-1.0, 2.0).validate().is_err());
        assert!(CouplerElbowWeights::new(f64::INFINITY, 1.0).validate().is_err());
        let config = GeneratorConfig::new(3).with_coupler_elbow(CouplerElbowWeights::new(0.0, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_coupler_probability_normalizes() {
        assert_relative_eq!(CouplerElbowWeights::new(4.0, 1.0).coupler_probability(), 0.8);
        assert_relative_eq!(CouplerElbowWeights::always_elbow().coupler_probability(), 0.0);
    }
}
