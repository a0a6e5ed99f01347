use crate::models::{Direction, FitnessList, Objective};

/// The position-aligned vector of scaled scores a strategy samples from.
///
/// Built once from a [`FitnessList`] and owned exclusively by one strategy
/// instance, which transforms it in place. For the `Center` objective each
/// entry is the absolute distance from the target value; for `Minimize`
/// and `Maximize` the raw scores are carried over unchanged.
#[derive(Debug, Clone)]
pub struct WorkingVector {
    values: Vec<f64>,
    objective: Objective,
}

/// A `Center` list was handed to a strategy without a target value.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
#[error("the center objective needs a target value to measure distance against")]
pub struct MissingTarget;

/// Reciprocal with zero mapped back to zero.
fn invert(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        1.0 / value
    }
}

impl WorkingVector {
    pub fn new(list: &FitnessList) -> Result<Self, MissingTarget> {
        let values = match list.objective() {
            Objective::Center => {
                let target = list.target().ok_or(MissingTarget)?;
                list.scores()
                    .map(|score| {
                        // A raw score of exactly zero stays zero, whatever
                        // the target.
                        if score != 0.0 {
                            (score - target).abs()
                        } else {
                            0.0
                        }
                    })
                    .collect()
            }
            Objective::Minimize | Objective::Maximize => list.scores().collect(),
        };

        Ok(Self {
            values,
            objective: list.objective(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub(crate) fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Reconciles the stored objective with the requested direction.
    ///
    /// When the two conflict with larger-is-better sampling, every entry
    /// is replaced by its reciprocal (zero stays zero): `Maximize`
    /// requested over a `Minimize` or `Center` list, or `Minimize`
    /// requested over a `Maximize` list. Otherwise the vector is
    /// untouched.
    pub fn scale_for(&mut self, direction: Direction) {
        let conflicting = matches!(
            (direction, self.objective),
            (Direction::Maximize, Objective::Minimize)
                | (Direction::Minimize, Objective::Maximize)
                | (Direction::Maximize, Objective::Center)
        );

        if conflicting {
            for value in &mut self.values {
                *value = invert(*value);
            }
        }
    }

    /// Scales for the direction, then divides every entry by the total so
    /// the vector sums to 1.0.
    ///
    /// A total of exactly 0.0 carries no probability mass; the vector is
    /// deliberately left unchanged rather than corrected, and the roulette
    /// wheel downstream rejects it with a descriptive error.
    pub fn normalize(&mut self, direction: Direction) {
        self.scale_for(direction);

        let total: f64 = self.values.iter().sum();
        if total != 0.0 {
            for value in &mut self.values {
                *value /= total;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn list_of(objective: Objective, scores: &[f64]) -> FitnessList {
        let mut list = FitnessList::new(objective);
        for &score in scores {
            list.push(score);
        }
        list
    }

    #[test]
    fn test_center_builds_distances_from_target() {
        let list = list_of(Objective::Center, &[4.0, 5.5, 9.0]).with_target(5.0);

        let working = WorkingVector::new(&list).unwrap();

        assert_eq!(working.values(), &[1.0, 0.5, 4.0]);
    }

    #[test]
    fn test_center_keeps_exact_zero_scores_at_zero() {
        let list = list_of(Objective::Center, &[0.0, 3.0]).with_target(5.0);

        let working = WorkingVector::new(&list).unwrap();

        assert_eq!(working.values(), &[0.0, 2.0]);
    }

    #[test]
    fn test_center_without_target_is_rejected() {
        let list = list_of(Objective::Center, &[1.0, 2.0]);

        assert_eq!(WorkingVector::new(&list).unwrap_err(), MissingTarget);
    }

    #[test]
    fn test_min_max_carry_raw_scores() {
        for objective in [Objective::Minimize, Objective::Maximize] {
            let list = list_of(objective, &[1.0, -2.0, 0.5]);
            let working = WorkingVector::new(&list).unwrap();

            assert_eq!(working.values(), &[1.0, -2.0, 0.5]);
        }
    }

    #[test]
    fn test_conflicting_directions_invert() {
        let cases = [
            (Objective::Minimize, Direction::Maximize, true),
            (Objective::Maximize, Direction::Minimize, true),
            (Objective::Maximize, Direction::Maximize, false),
            (Objective::Minimize, Direction::Minimize, false),
        ];

        for (objective, direction, inverted) in cases {
            let list = list_of(objective, &[2.0, 4.0]);
            let mut working = WorkingVector::new(&list).unwrap();
            working.scale_for(direction);

            let expected: &[f64] = if inverted { &[0.5, 0.25] } else { &[2.0, 4.0] };
            assert_eq!(working.values(), expected, "{objective:?} under {direction:?}");
        }
    }

    #[test]
    fn test_center_inverts_only_for_maximize() {
        let list = list_of(Objective::Center, &[2.0, 4.0]).with_target(0.0);

        let mut maximized = WorkingVector::new(&list).unwrap();
        maximized.scale_for(Direction::Maximize);
        assert_eq!(maximized.values(), &[0.5, 0.25]);

        let mut minimized = WorkingVector::new(&list).unwrap();
        minimized.scale_for(Direction::Minimize);
        assert_eq!(minimized.values(), &[2.0, 4.0]);
    }

    #[test]
    fn test_invert_maps_zero_to_zero() {
        let list = list_of(Objective::Minimize, &[0.0, 2.0]);
        let mut working = WorkingVector::new(&list).unwrap();

        working.scale_for(Direction::Maximize);

        assert_eq!(working.values(), &[0.0, 0.5]);
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let list = list_of(Objective::Maximize, &[1.0, 2.0, 5.0]);
        let mut working = WorkingVector::new(&list).unwrap();

        working.normalize(Direction::Maximize);

        let total: f64 = working.values().iter().sum();
        assert!((total - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_normalize_leaves_zero_total_unchanged() {
        let list = list_of(Objective::Maximize, &[0.0, 0.0]);
        let mut working = WorkingVector::new(&list).unwrap();

        working.normalize(Direction::Maximize);

        assert_eq!(working.values(), &[0.0, 0.0]);
    }
}
