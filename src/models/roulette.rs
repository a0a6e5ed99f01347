use rand::Rng;

/// How far a weight vector's total may stray from 1.0 before it is
/// rejected.
const WEIGHT_TOLERANCE: f64 = 1e-10;

/// Weighted random sampler over a normalized probability vector.
///
/// The wheel knows nothing about fitness; it receives non-negative weights
/// that total 1.0 and draws bin positions with probability proportional to
/// their weight. Draws are independent and with replacement.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

/// The supplied weights are not a probability vector.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum RouletteError {
    /// A negative weight would make the cumulative bounds non-monotonic.
    #[error("selection weights must be non-negative, got {0}")]
    NegativeWeight(f64),

    #[error("selection weights must total 1.0 within 1e-10, got {0}")]
    NotNormalized(f64),
}

impl RouletteWheel {
    /// Builds the cumulative distribution once, up front.
    pub fn new(weights: &[f64]) -> Result<Self, RouletteError> {
        if let Some(weight) = weights.iter().find(|weight| **weight < 0.0) {
            return Err(RouletteError::NegativeWeight(*weight));
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(RouletteError::NotNormalized(total));
        }

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut bound = 0.0;
        for weight in weights {
            bound += weight;
            cumulative.push(bound);
        }

        Ok(Self { cumulative })
    }

    /// Returns a single-pass iterator yielding exactly `count` positions.
    pub fn draws<R: Rng>(self, count: usize, rng: R) -> RouletteDraws<R> {
        RouletteDraws {
            cumulative: self.cumulative,
            remaining: count,
            rng,
        }
    }
}

/// Finite, non-restartable sequence of roulette draws.
#[derive(Debug)]
pub struct RouletteDraws<R: Rng> {
    cumulative: Vec<f64>,
    remaining: usize,
    rng: R,
}

impl<R: Rng> Iterator for RouletteDraws<R> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let roll: f64 = self.rng.random();

        // Linear scan for the first bin whose upper bound exceeds the
        // roll. Population sizes here are small enough that a binary
        // search would not pay for itself.
        for (position, bound) in self.cumulative.iter().enumerate() {
            if *bound > roll {
                return Some(position);
            }
        }

        // The tolerance allows totals a hair under 1.0, so a roll can land
        // past the last bound; it belongs to the final bin.
        Some(self.cumulative.len() - 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for RouletteDraws<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TOLERANCE: f64 = 0.05;

    /// Always rolls the largest representable value below 1.0.
    struct MaxRoll;

    impl rand::RngCore for MaxRoll {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff)
        }
    }

    #[test]
    fn test_rejects_weights_off_by_more_than_tolerance() {
        let result = RouletteWheel::new(&[0.5, 0.4999999999]);

        assert_eq!(result.unwrap_err(), RouletteError::NotNormalized(0.9999999999));
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let result = RouletteWheel::new(&[0.0, 0.0, 0.0]);

        assert_eq!(result.unwrap_err(), RouletteError::NotNormalized(0.0));
    }

    #[test]
    fn test_rejects_negative_weights() {
        // The pair totals 1.0, so only the sign check can catch it.
        let result = RouletteWheel::new(&[-0.5, 1.5]);

        assert_eq!(result.unwrap_err(), RouletteError::NegativeWeight(-0.5));
    }

    #[test]
    fn test_accepts_weights_within_tolerance() {
        assert!(RouletteWheel::new(&[0.25, 0.25, 0.5]).is_ok());
        assert!(RouletteWheel::new(&[0.5, 0.5 - 1e-11]).is_ok());
    }

    #[test]
    fn test_yields_exactly_the_requested_count() {
        let wheel = RouletteWheel::new(&[0.2, 0.3, 0.5]).unwrap();
        let rng = StdRng::seed_from_u64(7);

        let picks: Vec<usize> = wheel.draws(250, rng).collect();

        assert_eq!(picks.len(), 250);
        assert!(picks.iter().all(|&position| position < 3));
    }

    #[test]
    fn test_roll_past_the_last_bound_lands_in_the_final_bin() {
        // The tolerance admits totals a hair under 1.0; the largest
        // possible roll then exceeds the last cumulative bound and must
        // land in the final bin without shorting the draw count.
        let wheel = RouletteWheel::new(&[0.5, 0.5 - 1e-11]).unwrap();

        let picks: Vec<usize> = wheel.draws(3, MaxRoll).collect();

        assert_eq!(picks, vec![1, 1, 1]);
    }

    #[test]
    fn test_even_weights_converge_to_even_split() {
        let wheel = RouletteWheel::new(&[0.5, 0.5]).unwrap();
        let rng = StdRng::seed_from_u64(42);

        let draws = 10_000;
        let firsts = wheel
            .draws(draws, rng)
            .filter(|&position| position == 0)
            .count();

        let proportion = firsts as f64 / draws as f64;
        assert!((proportion - 0.5).abs() < TOLERANCE, "got {proportion}");
    }

    #[test]
    fn test_skewed_weights_converge_to_their_proportions() {
        let wheel = RouletteWheel::new(&[0.1, 0.3, 0.6]).unwrap();
        let rng = StdRng::seed_from_u64(3);

        let draws = 10_000;
        let mut counts = [0usize; 3];
        for position in wheel.draws(draws, rng) {
            counts[position] += 1;
        }

        for (count, expected) in counts.iter().zip([0.1, 0.3, 0.6]) {
            let proportion = *count as f64 / draws as f64;
            assert!((proportion - expected).abs() < TOLERANCE, "got {proportion}");
        }
    }
}
