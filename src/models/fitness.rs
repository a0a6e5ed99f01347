use crate::models::Objective;

/// One generation's fitness scores, paired with the member ids that earned
/// them.
///
/// The list is created fresh each generation, appended to until it holds
/// one score per population member, then handed read-only to exactly one
/// strategy instance. Member ids are assigned by [`push`](Self::push) in
/// insertion order, so they are always the dense range `0..len`.
///
/// Statistics come in two flavors: `min_*`/`max_*` scan raw scores, while
/// `best_*`/`worst_*` account for the stored [`Objective`]. For the
/// `Center` objective, `sorted`, `median` and the `best`/`worst` family
/// rank members by absolute distance from the target value, whereas
/// [`mean`](Self::mean) is always computed over the raw signed scores.
/// The two families deliberately measure different things for `Center`.
#[derive(Debug, Clone)]
pub struct FitnessList {
    records: Vec<(f64, usize)>,
    objective: Objective,
    target: Option<f64>,
}

/// Errors from statistics over a fitness list.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum StatsError {
    /// The list holds no scores yet.
    #[error("the fitness list is empty")]
    Empty,

    /// Sample standard deviation divides by N - 1.
    #[error("standard deviation needs at least two samples, got {0}")]
    TooFewSamples(usize),
}

impl FitnessList {
    /// Creates an empty list for the given objective.
    pub fn new(objective: Objective) -> Self {
        Self {
            records: Vec::new(),
            objective,
            target: None,
        }
    }

    /// Sets the target value that `Center` distances are measured against.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Appends a score, assigning it the next member id.
    pub fn push(&mut self, score: f64) {
        let member = self.records.len();
        self.records.push((score, member));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Raw scores in member order.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|(score, _)| *score)
    }

    /// `(score, member)` records in member order.
    pub fn records(&self) -> &[(f64, usize)] {
        &self.records
    }

    /// The smallest raw score.
    pub fn min_value(&self) -> Result<f64, StatsError> {
        self.scores()
            .min_by(f64::total_cmp)
            .ok_or(StatsError::Empty)
    }

    /// The largest raw score.
    pub fn max_value(&self) -> Result<f64, StatsError> {
        self.scores()
            .max_by(f64::total_cmp)
            .ok_or(StatsError::Empty)
    }

    /// The best value under the stored objective. For `Center` this is the
    /// smallest distance from the target, not a raw score.
    pub fn best_value(&self) -> Result<f64, StatsError> {
        match self.objective {
            Objective::Minimize => self.min_value(),
            Objective::Maximize => self.max_value(),
            Objective::Center => self.sorted().first().map(|(key, _)| *key).ok_or(StatsError::Empty),
        }
    }

    /// The worst value under the stored objective. For `Center` this is the
    /// largest distance from the target.
    pub fn worst_value(&self) -> Result<f64, StatsError> {
        match self.objective {
            Objective::Minimize => self.max_value(),
            Objective::Maximize => self.min_value(),
            Objective::Center => self.sorted().last().map(|(key, _)| *key).ok_or(StatsError::Empty),
        }
    }

    /// The member holding the smallest sort key.
    pub fn min_member(&self) -> Result<usize, StatsError> {
        let sorted = self.sorted();
        let record = match self.objective {
            Objective::Minimize | Objective::Center => sorted.first(),
            Objective::Maximize => sorted.last(),
        };
        record.map(|(_, member)| *member).ok_or(StatsError::Empty)
    }

    /// The member holding the largest sort key.
    pub fn max_member(&self) -> Result<usize, StatsError> {
        let sorted = self.sorted();
        let record = match self.objective {
            Objective::Minimize | Objective::Center => sorted.last(),
            Objective::Maximize => sorted.first(),
        };
        record.map(|(_, member)| *member).ok_or(StatsError::Empty)
    }

    /// The member with the best score under the stored objective.
    pub fn best_member(&self) -> Result<usize, StatsError> {
        match self.objective {
            Objective::Minimize | Objective::Center => self.min_member(),
            Objective::Maximize => self.max_member(),
        }
    }

    /// The member with the worst score under the stored objective.
    pub fn worst_member(&self) -> Result<usize, StatsError> {
        match self.objective {
            Objective::Minimize | Objective::Center => self.max_member(),
            Objective::Maximize => self.min_member(),
        }
    }

    /// Arithmetic mean of the raw signed scores, for every objective.
    pub fn mean(&self) -> Result<f64, StatsError> {
        if self.records.is_empty() {
            return Err(StatsError::Empty);
        }

        let total: f64 = self.scores().sum();
        Ok(total / self.records.len() as f64)
    }

    /// Middle of the sorted keys; for an even count, the average of the two
    /// central entries.
    pub fn median(&self) -> Result<f64, StatsError> {
        if self.records.is_empty() {
            return Err(StatsError::Empty);
        }

        let sorted = self.sorted();
        let half = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Ok((sorted[half - 1].0 + sorted[half].0) / 2.0)
        } else {
            Ok(sorted[half].0)
        }
    }

    /// Sample standard deviation of the raw scores (divisor N - 1).
    pub fn stddev(&self) -> Result<f64, StatsError> {
        if self.records.len() <= 1 {
            return Err(StatsError::TooFewSamples(self.records.len()));
        }

        let mean = self.mean()?;
        let total: f64 = self.scores().map(|score| (score - mean).powi(2)).sum();
        Ok((total / (self.records.len() - 1) as f64).sqrt())
    }

    /// Returns `(key, member)` pairs ordered best-first for the stored
    /// objective: ascending raw score for `Minimize`, descending for
    /// `Maximize`, ascending distance from the target for `Center`.
    ///
    /// An unset target counts as 0.0, so an untargeted `Center` list ranks
    /// by absolute score. Ties keep member order (reversed wholesale for
    /// `Maximize`).
    pub fn sorted(&self) -> Vec<(f64, usize)> {
        let mut keyed: Vec<(f64, usize)> = match self.objective {
            Objective::Center => {
                let target = self.target.unwrap_or(0.0);
                self.records
                    .iter()
                    .map(|(score, member)| ((score - target).abs(), *member))
                    .collect()
            }
            _ => self.records.clone(),
        };

        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        if self.objective == Objective::Maximize {
            keyed.reverse();
        }

        keyed
    }
}
