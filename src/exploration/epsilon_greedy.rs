use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{error::ConfigError, util::ensure_interval};

use super::Choice;

/// Epsilon greedy exploration policy with a multiplicatively decaying epsilon
///
/// Owns its random source, so two agents never share random state.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    decay: f64,
    min_epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Initialize epsilon greedy policy from a start value, a per-episode decay factor and a floor
    ///
    /// `seed` makes the random source reproducible; `None` seeds it from system entropy.
    ///
    /// **Errors** if `epsilon` is not in `[0,1]`, `decay` is not in `(0,1]`, or `min_epsilon`
    /// is not in `[0, epsilon]`
    pub fn new(
        epsilon: f64,
        decay: f64,
        min_epsilon: f64,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        ensure_interval!(epsilon, 0.0, 1.0);
        ensure_interval!(decay, > 0.0, 1.0);
        ensure_interval!(min_epsilon, 0.0, 1.0);
        if min_epsilon > epsilon {
            return Err(ConfigError::MinExceedsInitial {
                min: min_epsilon,
                initial: epsilon,
            });
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            epsilon,
            decay,
            min_epsilon,
            rng,
        })
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Invoke epsilon greedy policy: explore with probability epsilon
    pub fn choose(&mut self) -> Choice {
        if self.rng.gen::<f64>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }

    /// Uniformly sample one of `items`, or `None` if empty
    pub fn sample<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Multiply epsilon by the decay factor, never going below the floor
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.decay).max(self.min_epsilon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_parameters() {
        assert!(EpsilonGreedy::new(1.5, 0.9, 0.0, None).is_err());
        assert!(EpsilonGreedy::new(1.0, 0.0, 0.0, None).is_err());
        assert!(EpsilonGreedy::new(1.0, 1.1, 0.0, None).is_err());
        assert!(EpsilonGreedy::new(1.0, 0.9, -0.1, None).is_err());
        assert_eq!(
            EpsilonGreedy::new(0.2, 0.9, 0.5, None).unwrap_err(),
            ConfigError::MinExceedsInitial {
                min: 0.5,
                initial: 0.2
            }
        );
        assert!(EpsilonGreedy::new(0.5, 1.0, 0.5, Some(0)).is_ok());
    }

    #[test]
    fn extremes_are_deterministic() {
        let mut always = EpsilonGreedy::new(1.0, 1.0, 0.0, Some(7)).unwrap();
        let mut never = EpsilonGreedy::new(0.0, 1.0, 0.0, Some(7)).unwrap();
        for _ in 0..1000 {
            assert!(matches!(always.choose(), Choice::Explore));
            assert!(matches!(never.choose(), Choice::Exploit));
        }
    }

    #[test]
    fn decay_respects_floor() {
        let mut policy = EpsilonGreedy::new(1.0, 0.5, 0.1, Some(0)).unwrap();
        policy.decay();
        assert_eq!(policy.epsilon(), 0.5);
        policy.decay();
        assert_eq!(policy.epsilon(), 0.25);
        for _ in 0..10 {
            policy.decay();
        }
        assert_eq!(policy.epsilon(), 0.1);
    }

    #[test]
    fn sample_empty_is_none() {
        let mut policy = EpsilonGreedy::new(1.0, 1.0, 0.0, Some(0)).unwrap();
        assert_eq!(policy.sample::<u8>(&[]), None);
        assert_eq!(policy.sample(&[3]), Some(&3));
    }
}
