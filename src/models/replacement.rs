//! Replacement strategies: mirror images of selection, surfacing the
//! members a driver should discard or overwrite rather than breed from.

use crate::models::{
    Direction, FitnessList, MissingTarget, Objective, Tournament, TournamentDraws,
    TournamentError, WorkingVector,
};
use rand::Rng;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum ReplacementError {
    /// The count is an absolute number of members, not a rate.
    #[error("replacement count {count} must be between 1 and the population of {population}")]
    CountOutOfRange { count: usize, population: usize },

    #[error("scaling error: {0}")]
    Scaling(#[from] MissingTarget),

    #[error("tournament error: {0}")]
    Tournament(#[from] TournamentError),
}

// ============================================================
// DeleteWorst
// ============================================================

/// Deterministic worst-first replacement: the mirror image of [`Elites`].
///
/// [`Elites`]: crate::models::Elites
#[derive(Debug)]
pub struct DeleteWorst {
    working: WorkingVector,
    count: usize,
}

impl DeleteWorst {
    /// `replacement_count` is the absolute number of members to discard,
    /// between 1 and the population size.
    pub fn new(list: &FitnessList, replacement_count: usize) -> Result<Self, ReplacementError> {
        let working = WorkingVector::new(list)?;
        if replacement_count == 0 || replacement_count > working.len() {
            return Err(ReplacementError::CountOutOfRange {
                count: replacement_count,
                population: working.len(),
            });
        }

        Ok(Self {
            working,
            count: replacement_count,
        })
    }

    /// Returns `replacement_count` member ids, worst first. No randomness
    /// is involved.
    #[instrument(level = "debug", skip(self), fields(count = self.count, population = self.working.len()))]
    pub fn select(mut self) -> Vec<usize> {
        // Smaller scaled value means better, so the descending sort puts
        // the worst members first.
        self.working.scale_for(Direction::Minimize);

        let mut ranked: Vec<(f64, usize)> = self
            .working
            .values()
            .iter()
            .copied()
            .zip(0..)
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ranked.reverse();

        ranked
            .into_iter()
            .take(self.count)
            .map(|(_, member)| member)
            .collect()
    }
}

// ============================================================
// TournamentReplacement
// ============================================================

/// Tournament sampling with the direction inverted from the objective, so
/// tournaments surface losers instead of winners.
#[derive(Debug)]
pub struct TournamentReplacement {
    working: WorkingVector,
    tournament: Tournament,
}

impl TournamentReplacement {
    pub fn new(list: &FitnessList, tournament_size: usize) -> Result<Self, ReplacementError> {
        let working = WorkingVector::new(list)?;
        let direction = match list.objective() {
            Objective::Maximize => Direction::Minimize,
            Objective::Minimize | Objective::Center => Direction::Maximize,
        };
        let tournament = Tournament::new(direction, tournament_size, working.len())?;

        Ok(Self {
            working,
            tournament,
        })
    }

    /// Yields one tournament loser per population member, with
    /// replacement.
    #[instrument(level = "debug", skip(self, rng), fields(population = self.working.len()))]
    pub fn select<R: Rng>(self, rng: R) -> TournamentDraws<R> {
        self.tournament.draws(self.working.into_values(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn list_of(objective: Objective, scores: &[f64]) -> FitnessList {
        let mut list = FitnessList::new(objective);
        for &score in scores {
            list.push(score);
        }
        list
    }

    #[test]
    fn test_delete_worst_returns_worst_first() {
        let list = list_of(Objective::Maximize, &[0.9, 0.1, 0.5, 0.3]);
        let strategy = DeleteWorst::new(&list, 2).unwrap();

        // Members 1 and 3 hold the lowest scores under Maximize.
        assert_eq!(strategy.select(), vec![1, 3]);
    }

    #[test]
    fn test_delete_worst_minimize_discards_largest() {
        let list = list_of(Objective::Minimize, &[0.2, 0.9, 0.1, 0.6]);
        let strategy = DeleteWorst::new(&list, 2).unwrap();

        assert_eq!(strategy.select(), vec![1, 3]);
    }

    #[test]
    fn test_delete_worst_count_bounds() {
        let list = list_of(Objective::Maximize, &[1.0, 2.0]);

        assert_eq!(
            DeleteWorst::new(&list, 0).unwrap_err(),
            ReplacementError::CountOutOfRange {
                count: 0,
                population: 2
            }
        );
        assert_eq!(
            DeleteWorst::new(&list, 3).unwrap_err(),
            ReplacementError::CountOutOfRange {
                count: 3,
                population: 2
            }
        );
    }

    #[test]
    fn test_tournament_replacement_surfaces_losers() {
        // Full-population tournaments with a single outlier: under
        // Maximize the replacement direction is Minimize, so the worst
        // score should dominate the draws across many generations.
        let mut losses = 0;
        for seed in 0..200u64 {
            let list = list_of(Objective::Maximize, &[5.0, 4.0, 0.1, 6.0, 7.0]);
            let strategy = TournamentReplacement::new(&list, 5).unwrap();
            losses += strategy
                .select(StdRng::seed_from_u64(seed))
                .filter(|&member| member == 2)
                .count();
        }

        assert!(losses > 500, "got {losses}/1000 losses");
    }

    #[test]
    fn test_tournament_replacement_yields_population_size_picks() {
        let list = list_of(Objective::Minimize, &[1.0, 2.0, 3.0]);
        let strategy = TournamentReplacement::new(&list, 2).unwrap();

        let picks: Vec<usize> = strategy.select(StdRng::seed_from_u64(3)).collect();

        assert_eq!(picks.len(), 3);
        assert!(picks.iter().all(|&member| member < 3));
    }

    #[test]
    fn test_tournament_replacement_rejects_oversized_tournament() {
        let list = list_of(Objective::Minimize, &[1.0, 2.0]);

        let result = TournamentReplacement::new(&list, 4);

        assert_eq!(
            result.unwrap_err(),
            ReplacementError::Tournament(TournamentError::SizeExceedsPopulation {
                size: 4,
                population: 2
            })
        );
    }
}
