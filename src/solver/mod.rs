mod config;
pub use crate::solver::config::{Heuristic, SolverConfig};

mod heuristic;
pub use crate::solver::heuristic::{BranchingHeuristic, JeroslowWang, RandomChoice};

mod saturation;
pub use crate::solver::saturation::{reduce, saturate};

mod solution;
pub use crate::solver::solution::{EvaluationStats, Solution};

mod dpll;
pub use crate::solver::dpll::{solve, solve_with, Solver};
