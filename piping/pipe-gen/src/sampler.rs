//! Target degree sampling.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use pipe_types::{PipeError, PipeResult};

use crate::config::DegreeDistribution;

/// Draws target port counts from a [`DegreeDistribution`].
///
/// # Example
///
/// ```
/// use pipe_gen::{DegreeDistribution, DegreeSampler};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let sampler = DegreeSampler::new(&DegreeDistribution::default()).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let degree = sampler.sample(&mut rng);
/// assert!((1..=6).contains(&degree));
/// ```
#[derive(Debug, Clone)]
pub struct DegreeSampler {
    min_degree: usize,
    index: WeightedIndex<f64>,
}

impl DegreeSampler {
    /// Builds a sampler for a distribution.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::InvalidConfig`] if the distribution is invalid.
    pub fn new(distribution: &DegreeDistribution) -> PipeResult<Self> {
        distribution.validate()?;
        let index = WeightedIndex::new(distribution.weights())
            .map_err(|e| PipeError::invalid_config(format!("degree weights: {e}")))?;
        Ok(Self {
            min_degree: distribution.min_degree(),
            index,
        })
    }

    /// Draws one target degree.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.min_degree + self.index.sample(rng)
    }
}
