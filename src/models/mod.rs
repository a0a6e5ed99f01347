mod fitness;
mod goal;
mod replacement;
mod roulette;
mod scaling;
mod selector;
mod tournament;

pub use fitness::{FitnessList, StatsError};
pub use goal::{Direction, Objective};
pub use replacement::{DeleteWorst, ReplacementError, TournamentReplacement};
pub use roulette::{RouletteDraws, RouletteError, RouletteWheel};
pub use scaling::{MissingTarget, WorkingVector};
pub use selector::{
    Elites, LinearRanking, Proportionate, Scaling, SelectionError, TournamentSelection,
    TruncationRanking, DEFAULT_EXPONENT, DEFAULT_TOURNAMENT_SIZE,
};
pub use tournament::{Tournament, TournamentDraws, TournamentError};
