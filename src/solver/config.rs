use rand::{rngs::StdRng, SeedableRng};

use super::heuristic::{BranchingHeuristic, JeroslowWang, RandomChoice};

/// How the solver picks branching literals (and, for the random policy, unit clauses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Uniformly random variable and polarity.
    #[default]
    Random,
    /// Highest `Σ 2^-|C|` over the clauses containing the literal.
    JeroslowWang,
}

/// The primary configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// The branching policy.
    pub heuristic: Heuristic,

    /// Seed for the random source. `None` draws from the operating system, so repeated solves of
    /// the same input may explore different paths.
    pub seed: Option<u64>,
}

impl SolverConfig {
    pub fn new() -> SolverConfig {
        Self::default()
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> SolverConfig {
        self.heuristic = heuristic;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> SolverConfig {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub(crate) fn build_heuristic(&self) -> Box<dyn BranchingHeuristic> {
        match self.heuristic {
            Heuristic::Random => Box::new(RandomChoice::new(self.rng())),
            Heuristic::JeroslowWang => Box::new(JeroslowWang::default()),
        }
    }
}
