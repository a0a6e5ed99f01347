//! Fitness tracking and member selection for generational evolutionary
//! search, such as grammatical evolution.
//!
//! Each generation the driver collects one raw fitness score per population
//! member into a [`FitnessList`], constructs a selection or replacement
//! strategy over it, and consumes the member ids the strategy yields to
//! build the next generation. Strategies are single-use: they derive a
//! private working vector from the list at construction, transform it in
//! place, and are consumed by `select`.
//!
//! Randomness is always injected. Every randomized `select` takes an owned
//! [`rand::Rng`], so production code passes `rand::rng()` and tests pass a
//! seeded `StdRng` for reproducible draws.

pub mod models;

pub use models::{
    DeleteWorst, Direction, Elites, FitnessList, LinearRanking, Objective, Proportionate,
    ReplacementError, RouletteError, RouletteWheel, Scaling, SelectionError, StatsError,
    Tournament, TournamentReplacement, TournamentSelection, TruncationRanking, WorkingVector,
};
