use serde::{Deserialize, Serialize};

/// The optimization objective a generation's fitness scores were produced
/// under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// Larger raw scores are better.
    Maximize,
    /// Smaller raw scores are better.
    Minimize,
    /// Scores closest to a target value are better.
    Center,
}

/// The direction a selection pass works in once scores have been scaled.
///
/// Strategies reconcile a requested direction with the stored [`Objective`]
/// by inverting scaled values where the two conflict, so a `Maximize`
/// direction always means "larger working value wins".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Minimize,
    #[default]
    Maximize,
}
