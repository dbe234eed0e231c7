use log::{debug, info, trace};

use crate::instance::*;
use crate::structural::RecursiveSet;

use super::config::SolverConfig;
use super::heuristic::BranchingHeuristic;
use super::saturation::saturate;
use super::solution::{EvaluationStats, Solution};

/// A Davis–Putnam solver. Each call to [`Solver::solve`] starts from a fresh random source, so a
/// seeded config reproduces the same search every time.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Solver {
        Solver { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&self, clauses: &ClauseSet) -> Solution {
        let mut heuristic = self.config.build_heuristic();
        let mut stats = EvaluationStats::default();
        let variables = clauses.variables();
        info!(
            "solving {} clauses over {} variables with {:?}",
            clauses.len(),
            variables.len(),
            self.config.heuristic
        );

        let result = search(
            clauses,
            &variables,
            &RecursiveSet::new().frozen(),
            heuristic.as_mut(),
            &mut stats,
            0,
        );
        info!(
            "{} after {} branches; stats={:?}",
            if result.is_falsum() { "unsat" } else { "sat" },
            stats.branch_count,
            stats
        );
        Solution::new(clauses.clone(), result, stats)
    }
}

/// Solves with the random policy and an entropy-seeded source.
pub fn solve(clauses: &ClauseSet) -> Solution {
    Solver::default().solve(clauses)
}

pub fn solve_with(clauses: &ClauseSet, config: SolverConfig) -> Solution {
    Solver::new(config).solve(clauses)
}

// Returns either the falsum sentinel or a set of unit clauses.
fn search(
    clauses: &ClauseSet,
    variables: &RecursiveSet,
    used: &RecursiveSet,
    heuristic: &mut dyn BranchingHeuristic,
    stats: &mut EvaluationStats,
    depth: usize,
) -> ClauseSet {
    stats.max_depth = stats.max_depth.max(depth);

    let saturated = saturate(clauses, heuristic, stats);
    if saturated.contains_empty_clause() {
        trace!("conflict at depth {}", depth);
        return ClauseSet::falsum();
    }
    if saturated.is_assignment() {
        return saturated;
    }

    // Saturation removes every clause that mentions a decided variable, so any remaining
    // non-unit clause has an unused one.
    let lit = heuristic
        .select_literal(&saturated, variables, used)
        .expect("non-unit clause without an unused variable");
    let mut used = used.thaw();
    used.add_frozen(lit.var().to_value());
    let used = used.frozen();

    debug!("depth {}: branching on {}", depth, lit);
    stats.branch_count += 1;
    let result = search(
        &saturated.with_clause(Clause::unit(lit.clone())),
        variables,
        &used,
        heuristic,
        stats,
        depth + 1,
    );
    if !result.is_falsum() {
        return result;
    }

    debug!("depth {}: backtracking to {}", depth, lit.complement());
    stats.backtrack_count += 1;
    search(
        &saturated.with_clause(Clause::unit(lit.complement())),
        variables,
        &used,
        heuristic,
        stats,
        depth + 1,
    )
}

#[cfg(test)]
mod test {
    use crate::instance::*;
    use crate::problem_builder::ProblemBuilder;
    use crate::solver::{Heuristic, SolverConfig};

    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn lit(name: &str, polarity: bool) -> Literal {
        Literal::new(Variable::new(name), polarity)
    }

    fn configs() -> Vec<SolverConfig> {
        vec![
            SolverConfig::new().with_seed(0),
            SolverConfig::new().with_seed(0xdead_beef),
            SolverConfig::new(),
            SolverConfig::new().with_heuristic(Heuristic::JeroslowWang),
        ]
    }

    #[test]
    fn test_unit_chain() {
        init();
        let cs = ClauseSet::new(vec![
            Clause::unit(lit("p", true)),
            Clause::new(vec![lit("p", false), lit("q", true)]),
        ]);
        for config in configs() {
            let solution = solve_with(&cs, config);
            assert_eq!(
                solution.result(),
                &ClauseSet::new(vec![Clause::unit(lit("p", true)), Clause::unit(lit("q", true))])
            );
            assert_eq!(solution.stats.branch_count, 0);
        }
    }

    #[test]
    fn test_direct_contradiction() {
        init();
        let cs = ClauseSet::new(vec![Clause::unit(lit("p", true)), Clause::unit(lit("p", false))]);
        for config in configs() {
            let solution = solve_with(&cs, config);
            assert!(solution.result().is_falsum());
            assert!(!solution.is_satisfiable());
        }
    }

    #[test]
    fn test_empty_input_is_trivially_satisfiable() {
        init();
        let solution = solve(&ClauseSet::empty());
        assert!(solution.is_satisfiable());
        assert_eq!(solution.result(), &ClauseSet::empty());
        assert_eq!(solution.to_string(), "{}");

        // the empty clause on its own is the opposite case
        assert!(!solve(&ClauseSet::falsum()).is_satisfiable());
    }

    #[test]
    fn test_exclusive_or() {
        init();
        let cs = ClauseSet::new(vec![
            Clause::new(vec![lit("p", true), lit("q", true)]),
            Clause::new(vec![lit("p", false), lit("q", false)]),
        ]);
        for config in configs() {
            let solution = solve_with(&cs, config);
            assert!(solution.is_satisfiable());
            let p = solution.value_of(&Variable::new("p"));
            let q = solution.value_of(&Variable::new("q"));
            assert!(p.is_some() && q.is_some());
            assert_ne!(p, q);
            assert!(solution.satisfies(&cs));
        }
    }

    #[test]
    fn test_positive_branch_first() {
        init();
        // one unconstrained binary clause: the first decision already satisfies it
        let cs = ClauseSet::new(vec![Clause::new(vec![lit("a", false), lit("b", false)])]);
        let solution = solve_with(&cs, SolverConfig::new().with_heuristic(Heuristic::JeroslowWang));
        assert_eq!(solution.stats.backtrack_count, 0);
        assert_eq!(solution.stats.branch_count, 1);
        assert_eq!(solution.stats.max_depth, 1);
        assert!(solution.satisfies(&cs));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        init();
        let mut pb = ProblemBuilder::new();
        let vars: Vec<_> = ["a", "b", "c", "d", "e"].iter().map(|n| pb.var(n)).collect();
        for w in vars.windows(3) {
            pb.require(&[w[0].clone(), w[1].clone(), w[2].clone()]);
            pb.require(&[pb.not(&w[0]), pb.not(&w[2])]);
        }
        let cs = pb.build();
        let config = SolverConfig::new().with_seed(17);
        let first = solve_with(&cs, config.clone());
        let second = solve_with(&cs, config);
        assert_eq!(first.result(), second.result());
        assert_eq!(first.stats, second.stats);
        assert!(first.satisfies(&cs));
    }

    // Starts with a satisfiable part (a or b), then chains into an unsatisfiable one.
    #[test]
    fn test_build_and_solve_infeasible() {
        init();
        let mut pb = ProblemBuilder::new();
        let a = pb.var("a");
        let b = pb.var("b");
        let x = pb.var("x");
        let y = pb.var("y");
        let z = pb.var("z");

        pb.require(&[a, b]);
        pb.require(&[x.clone(), y.clone()]);
        pb.require(&[y.clone(), z.clone()]);
        pb.require(&[z.clone(), x.clone()]);
        pb.require(&[pb.not(&x), pb.not(&y)]);
        pb.require(&[pb.not(&y), pb.not(&z)]);
        pb.require(&[pb.not(&z), pb.not(&x)]);

        let cs = pb.build();
        for config in configs() {
            let solution = solve_with(&cs, config);
            assert!(!solution.is_satisfiable());
            assert!(solution.to_string().ends_with(" is unsolvable"));
        }
    }

    #[test]
    fn test_build_and_solve_feasible() {
        init();
        let mut pb = ProblemBuilder::new();
        let a = pb.var("a");
        let b = pb.var("b");
        let c = pb.var("c");
        let x = pb.var("x");
        let y = pb.var("y");
        let z = pb.var("z");

        pb.require(&[pb.not(&a), pb.not(&b), pb.not(&c)]);
        pb.require(&[a.clone(), b.clone()]);
        pb.require(&[x.clone(), y.clone(), z.clone()]);
        pb.require(&[pb.not(&x), pb.not(&y)]);
        pb.require(&[pb.not(&y), pb.not(&z)]);
        pb.require(&[c.clone(), pb.not(&z)]);

        let cs = pb.build();
        for config in configs() {
            let solution = solve_with(&cs, config);
            assert!(solution.is_satisfiable(), "{:?}", solution);
            assert!(solution.satisfies(&cs), "{:?}", solution);
        }
    }
}
