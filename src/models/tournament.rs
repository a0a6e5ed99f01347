use crate::models::Direction;
use rand::Rng;

/// Repeated random-subset min/max selection over a working vector.
///
/// Each draw samples `size` positions uniformly at random with replacement
/// and keeps the position holding the smallest or largest value, per the
/// configured [`Direction`]. Larger tournaments raise selection pressure.
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    direction: Direction,
    size: usize,
}

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum TournamentError {
    #[error("tournament size must be at least 1")]
    EmptyTournament,

    #[error("tournament size {size} exceeds the population of {population}")]
    SizeExceedsPopulation { size: usize, population: usize },
}

impl Tournament {
    /// Validates the tournament size against the population it will sample.
    pub fn new(
        direction: Direction,
        size: usize,
        population: usize,
    ) -> Result<Self, TournamentError> {
        if size == 0 {
            return Err(TournamentError::EmptyTournament);
        }
        if size > population {
            return Err(TournamentError::SizeExceedsPopulation { size, population });
        }

        Ok(Self { direction, size })
    }

    /// Runs one tournament per population member, yielding exactly
    /// `values.len()` winning positions.
    pub fn draws<R: Rng>(self, values: Vec<f64>, rng: R) -> TournamentDraws<R> {
        let remaining = values.len();
        TournamentDraws {
            values,
            direction: self.direction,
            size: self.size,
            remaining,
            rng,
        }
    }
}

/// Finite, non-restartable sequence of tournament winners.
pub struct TournamentDraws<R: Rng> {
    values: Vec<f64>,
    direction: Direction,
    size: usize,
    remaining: usize,
    rng: R,
}

impl<R: Rng> Iterator for TournamentDraws<R> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // Strict comparisons keep the first occurrence in sampled order
        // on ties.
        let mut winner = self.rng.random_range(0..self.values.len());
        for _ in 1..self.size {
            let contender = self.rng.random_range(0..self.values.len());
            let beats = match self.direction {
                Direction::Maximize => self.values[contender] > self.values[winner],
                Direction::Minimize => self.values[contender] < self.values[winner],
            };
            if beats {
                winner = contender;
            }
        }

        Some(winner)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng> ExactSizeIterator for TournamentDraws<R> {}
