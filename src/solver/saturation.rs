use log::trace;

use crate::instance::*;
use crate::structural::RecursiveSet;

use super::heuristic::BranchingHeuristic;
use super::solution::EvaluationStats;

/// Applies the forced assignment `lit`: clauses containing `lit` are satisfied and dropped, the
/// complement is cut from the rest, and `{lit}` is recorded in the result.
pub fn reduce(clauses: &ClauseSet, lit: &Literal) -> ClauseSet {
    let complement = lit.complement();
    clauses
        .clauses()
        .filter(|clause| !clause.contains(lit))
        .map(|clause| {
            if clause.contains(&complement) {
                clause.without(&complement)
            } else {
                clause
            }
        })
        .chain(std::iter::once(Clause::unit(lit.clone())))
        .collect()
}

/// Runs unit propagation to a fixed point. The heuristic picks which pending unit goes next;
/// each unit clause is consumed at most once.
pub fn saturate<H: BranchingHeuristic + ?Sized>(
    clauses: &ClauseSet,
    heuristic: &mut H,
    stats: &mut EvaluationStats,
) -> ClauseSet {
    let mut working = clauses.clone();
    let mut used = RecursiveSet::new();
    loop {
        let units: Vec<Clause> = working
            .clauses()
            .filter(|clause| clause.is_unit() && !used.contains(&clause.as_value()))
            .collect();
        let unit = match heuristic.select_unit(&units) {
            Some(unit) => unit,
            None => return working,
        };
        used.add_frozen(unit.as_value());

        let lit = unit.unit_literal();
        trace!("propagating {}", lit);
        stats.unit_prop_count += 1;
        working = reduce(&working, &lit);
    }
}
