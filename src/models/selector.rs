//! Selection strategies that pick which members of a generation reproduce.
//!
//! Every strategy is built over one [`FitnessList`], derives its own
//! [`WorkingVector`] at construction, and is consumed by `select`, which
//! yields member ids. Randomized strategies sample with replacement and
//! yield one id per population member; [`Elites`] is deterministic and
//! yields a bounded best-first list.

use crate::models::{
    Direction, FitnessList, MissingTarget, Objective, RouletteDraws, RouletteError, RouletteWheel,
    Tournament, TournamentDraws, TournamentError, WorkingVector,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Exponent applied by exponential pre-scaling when no parameter is given.
pub const DEFAULT_EXPONENT: f64 = 2.0;

/// Tournament size used when the caller does not specify one.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 2;

/// Pre-scaling applied to the working vector before proportionate
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scaling {
    /// Normalize the scaled scores directly.
    Linear,
    /// Zero out every score below a caller-supplied threshold.
    Truncation,
    /// Raise every score to a power (default 2.0) to sharpen differences.
    Exponential,
    /// Take the natural log of every score to flatten differences.
    Logarithmic,
}

/// Errors raised while configuring or running a selection strategy.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum SelectionError {
    #[error("cannot select from an empty population")]
    EmptyPopulation,

    /// Rank probabilities divide by N - 1, so one member is not rankable.
    #[error("ranked selection needs at least two members, got {0}")]
    PopulationTooSmall(usize),

    /// Proportional sampling is meaningless over scores straddling zero.
    #[error("proportionate selection requires scores with a consistent sign")]
    MixedSigns,

    #[error("logarithmic scaling cannot be applied to negative scores")]
    NegativeLogScaling,

    #[error("logarithm undefined for non-positive score {0}")]
    LogUndefined(f64),

    #[error("truncation scaling requires a threshold parameter")]
    MissingTruncationThreshold,

    #[error("rate must be greater than 0.0 and at most 1.0, got {0}")]
    RateOutOfRange(f64),

    /// The truncation cutoff must leave members on both sides of the rank
    /// threshold.
    #[error("cutoff rank {cutoff} must fall strictly inside the population of {population}")]
    UnusableCutoff { cutoff: usize, population: usize },

    #[error("scaling error: {0}")]
    Scaling(#[from] MissingTarget),

    #[error("roulette error: {0}")]
    Roulette(#[from] RouletteError),

    #[error("tournament error: {0}")]
    Tournament(#[from] TournamentError),
}

/// Validates a `(0.0, 1.0]` rate shared by the elitist and
/// truncation-ranking strategies.
fn validate_rate(rate: f64) -> Result<f64, SelectionError> {
    if !(rate > 0.0 && rate <= 1.0) {
        return Err(SelectionError::RateOutOfRange(rate));
    }

    Ok(rate)
}

// ============================================================
// Proportionate
// ============================================================

/// Fitness-proportionate selection: roulette sampling over the scaled,
/// normalized working vector.
///
/// `Pr(member) = scaled(member) / Σ scaled`, so the approach assumes the
/// scaled scores are meaningful as proportions. Scores must share one
/// sign, and logarithmic pre-scaling additionally requires them positive.
#[derive(Debug)]
pub struct Proportionate {
    working: WorkingVector,
    scaling: Scaling,
    direction: Direction,
}

impl Proportionate {
    pub fn new(list: &FitnessList, scaling: Scaling) -> Result<Self, SelectionError> {
        let working = WorkingVector::new(list)?;
        if working.is_empty() {
            return Err(SelectionError::EmptyPopulation);
        }

        let min = working.values().iter().copied().fold(f64::INFINITY, f64::min);
        let max = working.values().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min < 0.0 && 0.0 < max {
            return Err(SelectionError::MixedSigns);
        }
        if min < 0.0 && scaling == Scaling::Logarithmic {
            return Err(SelectionError::NegativeLogScaling);
        }

        Ok(Self {
            working,
            scaling,
            direction: Direction::default(),
        })
    }

    /// Draws one member id per population member, with replacement.
    ///
    /// `param` is the exponent for `Exponential` scaling (defaults to
    /// [`DEFAULT_EXPONENT`]) and the required threshold for `Truncation`;
    /// the other scalings ignore it.
    #[instrument(
        level = "debug",
        skip(self, rng),
        fields(scaling = ?self.scaling, population = self.working.len())
    )]
    pub fn select<R: Rng>(
        mut self,
        param: Option<f64>,
        rng: R,
    ) -> Result<RouletteDraws<R>, SelectionError> {
        let population = self.working.len();

        match self.scaling {
            Scaling::Linear => {}
            Scaling::Exponential => {
                let exponent = param.unwrap_or(DEFAULT_EXPONENT);
                for value in self.working.values_mut() {
                    *value = value.powf(exponent);
                }
            }
            Scaling::Logarithmic => {
                for value in self.working.values_mut() {
                    if *value <= 0.0 {
                        return Err(SelectionError::LogUndefined(*value));
                    }
                    *value = value.ln();
                }
            }
            Scaling::Truncation => {
                let threshold = param.ok_or(SelectionError::MissingTruncationThreshold)?;
                for value in self.working.values_mut() {
                    if *value < threshold {
                        *value = 0.0;
                    }
                }
            }
        }

        self.working.normalize(self.direction);

        let wheel = RouletteWheel::new(self.working.values())?;
        Ok(wheel.draws(population, rng))
    }
}

// ============================================================
// TournamentSelection
// ============================================================

/// Tournament selection oriented by the list's objective: winners are the
/// members a driver should breed from.
#[derive(Debug)]
pub struct TournamentSelection {
    working: WorkingVector,
    tournament: Tournament,
}

impl TournamentSelection {
    /// The tournament direction follows the objective (`Maximize` stays
    /// `Maximize`; `Minimize` and `Center` compete for the smallest
    /// working value), so the vector needs no rescaling.
    pub fn new(list: &FitnessList, tournament_size: usize) -> Result<Self, SelectionError> {
        let working = WorkingVector::new(list)?;
        let direction = match list.objective() {
            Objective::Maximize => Direction::Maximize,
            Objective::Minimize | Objective::Center => Direction::Minimize,
        };
        let tournament = Tournament::new(direction, tournament_size, working.len())?;

        Ok(Self {
            working,
            tournament,
        })
    }

    /// Yields one tournament winner per population member.
    #[instrument(level = "debug", skip(self, rng), fields(population = self.working.len()))]
    pub fn select<R: Rng>(self, rng: R) -> TournamentDraws<R> {
        self.tournament.draws(self.working.into_values(), rng)
    }
}

// ============================================================
// Elites
// ============================================================

/// Deterministic retention of the objectively best slice of a generation.
#[derive(Debug)]
pub struct Elites {
    working: WorkingVector,
    rate: f64,
}

impl Elites {
    /// `rate` is the retained fraction of the population, in `(0.0, 1.0]`.
    pub fn new(list: &FitnessList, rate: f64) -> Result<Self, SelectionError> {
        let rate = validate_rate(rate)?;
        let working = WorkingVector::new(list)?;

        Ok(Self { working, rate })
    }

    /// Returns `round(rate × N)` member ids, best first. No randomness is
    /// involved.
    #[instrument(level = "debug", skip(self), fields(rate = self.rate, population = self.working.len()))]
    pub fn select(mut self) -> Vec<usize> {
        // Post-scaling convention: smaller working value means better.
        self.working.scale_for(Direction::Minimize);

        let count = (self.rate * self.working.len() as f64).round() as usize;
        let mut ranked: Vec<(f64, usize)> = self
            .working
            .values()
            .iter()
            .copied()
            .zip(0..)
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        ranked
            .into_iter()
            .take(count)
            .map(|(_, member)| member)
            .collect()
    }
}

// ============================================================
// LinearRanking
// ============================================================

/// Rank-based selection with a linear probability curve.
///
/// Rank `i` (1-based) receives weight
/// `(1/N) × (worstfactor + (bestfactor − worstfactor) × (i−1)/(N−1))`.
/// The curve sums to 1.0 when `bestfactor + worstfactor = 2`; the factors
/// are accepted as-is, and a curve that does not sum to 1.0 is rejected by
/// the roulette wheel at draw time.
///
/// Ranks are assigned in member order: the working vector is scaled for
/// direction but never sorted, so the highest weight lands on the
/// last-inserted member rather than the fittest one.
#[derive(Debug)]
pub struct LinearRanking {
    working: WorkingVector,
    worstfactor: f64,
    bestfactor: f64,
    direction: Direction,
}

fn ranking_weights(population: usize, worstfactor: f64, bestfactor: f64) -> Vec<f64> {
    let n = population as f64;
    (1..=population)
        .map(|rank| {
            (1.0 / n) * (worstfactor + (bestfactor - worstfactor) * (rank as f64 - 1.0) / (n - 1.0))
        })
        .collect()
}

impl LinearRanking {
    pub fn new(
        list: &FitnessList,
        worstfactor: f64,
        bestfactor: f64,
    ) -> Result<Self, SelectionError> {
        let working = WorkingVector::new(list)?;
        if working.len() < 2 {
            return Err(SelectionError::PopulationTooSmall(working.len()));
        }

        Ok(Self {
            working,
            worstfactor,
            bestfactor,
            direction: Direction::default(),
        })
    }

    /// Draws one member id per population member, with replacement.
    #[instrument(
        level = "debug",
        skip(self, rng),
        fields(worstfactor = self.worstfactor, bestfactor = self.bestfactor, population = self.working.len())
    )]
    pub fn select<R: Rng>(mut self, rng: R) -> Result<RouletteDraws<R>, SelectionError> {
        self.working.scale_for(self.direction);

        let population = self.working.len();
        let weights = ranking_weights(population, self.worstfactor, self.bestfactor);

        let wheel = RouletteWheel::new(&weights)?;
        Ok(wheel.draws(population, rng))
    }
}

// ============================================================
// TruncationRanking
// ============================================================

/// Rank cutoff with uniform probability above the threshold.
///
/// The scaled vector is sorted descending and the first
/// `round(trunc_rate × N)` positions share weight `1/(N − cutoff)` each;
/// everything past the cutoff gets zero. Weights are then mapped back to
/// member order and normalized before roulette sampling. Note that the
/// descending sort runs over the Minimize-scaled vector, so the slice
/// receiving probability mass holds the largest scaled values.
#[derive(Debug)]
pub struct TruncationRanking {
    working: WorkingVector,
    cutoff: usize,
}

impl TruncationRanking {
    /// `trunc_rate` is in `(0.0, 1.0]`; the derived cutoff rank must fall
    /// strictly inside the population so both sides of the threshold are
    /// populated.
    pub fn new(list: &FitnessList, trunc_rate: f64) -> Result<Self, SelectionError> {
        let trunc_rate = validate_rate(trunc_rate)?;
        let working = WorkingVector::new(list)?;

        let cutoff = (trunc_rate * working.len() as f64).round() as usize;
        if cutoff == 0 || cutoff >= working.len() {
            return Err(SelectionError::UnusableCutoff {
                cutoff,
                population: working.len(),
            });
        }

        Ok(Self { working, cutoff })
    }

    /// Draws one member id per population member, with replacement.
    #[instrument(
        level = "debug",
        skip(self, rng),
        fields(cutoff = self.cutoff, population = self.working.len())
    )]
    pub fn select<R: Rng>(mut self, rng: R) -> Result<RouletteDraws<R>, SelectionError> {
        self.working.scale_for(Direction::Minimize);

        let population = self.working.len();
        let mut ranked: Vec<(f64, usize)> = self
            .working
            .values()
            .iter()
            .copied()
            .zip(0..)
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ranked.reverse();

        let share = 1.0 / (population - self.cutoff) as f64;
        let mut weights = vec![0.0; population];
        for (position, (_, member)) in ranked.into_iter().enumerate() {
            if position < self.cutoff {
                weights[member] = share;
            }
        }

        let total: f64 = weights.iter().sum();
        for weight in &mut weights {
            *weight /= total;
        }

        let wheel = RouletteWheel::new(&weights)?;
        Ok(wheel.draws(population, rng))
    }
}
