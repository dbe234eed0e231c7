pub mod dimacs;
pub mod instance;
pub mod problem_builder;
pub mod solver;
pub mod structural;

pub use instance::*;
pub use solver::{solve, solve_with, Solution, Solver, SolverConfig};
