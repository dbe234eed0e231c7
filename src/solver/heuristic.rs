use fnv::FnvHashMap;
use log::trace;
use rand::{seq::SliceRandom, Rng};

use crate::instance::{Clause, ClauseSet, Literal, Variable};
use crate::structural::{RecursiveSet, Value};

/// Chooses where the search goes next.
pub trait BranchingHeuristic {
    /// Picks a literal whose variable is in `variables` but not in `used`. The solver tries the
    /// literal first and its complement only if that branch fails. Returns `None` when every
    /// variable has been used.
    fn select_literal(
        &mut self,
        clauses: &ClauseSet,
        variables: &RecursiveSet,
        used: &RecursiveSet,
    ) -> Option<Literal>;

    /// Picks which of the pending unit clauses saturation propagates next.
    fn select_unit<'u>(&mut self, units: &'u [Clause]) -> Option<&'u Clause>;
}

fn unused_variables<'v>(
    variables: &'v RecursiveSet,
    used: &'v RecursiveSet,
) -> impl Iterator<Item = Variable> + 'v {
    variables
        .iter()
        .filter(move |v| !used.contains(v))
        .filter_map(Value::as_symbol)
        .map(|sym| Variable::from(sym.clone()))
}

/// The baseline policy: uniformly random everywhere. Avoids the deterministic worst cases that a
/// fixed order hits on otherwise easy instances.
pub struct RandomChoice<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChoice<R> {
    pub fn new(rng: R) -> RandomChoice<R> {
        RandomChoice { rng }
    }
}

impl<R: Rng> BranchingHeuristic for RandomChoice<R> {
    fn select_literal(
        &mut self,
        _clauses: &ClauseSet,
        variables: &RecursiveSet,
        used: &RecursiveSet,
    ) -> Option<Literal> {
        let candidates: Vec<Variable> = unused_variables(variables, used).collect();
        let var = candidates.choose(&mut self.rng)?.clone();
        let polarity = self.rng.gen_bool(0.5);
        Some(Literal::new(var, polarity))
    }

    fn select_unit<'u>(&mut self, units: &'u [Clause]) -> Option<&'u Clause> {
        units.choose(&mut self.rng)
    }
}

/// Jeroslow–Wang: prefer literals occurring in short clauses. Deterministic; ties go to the
/// first candidate in variable-set order, positive before negative.
#[derive(Debug, Default)]
pub struct JeroslowWang {}

impl JeroslowWang {
    /// `Σ 2^-|C|` for every literal that occurs in `clauses`.
    pub fn scores(clauses: &ClauseSet) -> FnvHashMap<Literal, f64> {
        let mut scores = FnvHashMap::default();
        for clause in clauses.clauses() {
            let weight = 2f64.powi(-(clause.len() as i32));
            for lit in clause.literals() {
                *scores.entry(lit).or_insert(0.0) += weight;
            }
        }
        scores
    }
}

impl BranchingHeuristic for JeroslowWang {
    fn select_literal(
        &mut self,
        clauses: &ClauseSet,
        variables: &RecursiveSet,
        used: &RecursiveSet,
    ) -> Option<Literal> {
        let scores = Self::scores(clauses);
        let mut best: Option<(Literal, f64)> = None;
        for var in unused_variables(variables, used) {
            for polarity in [true, false] {
                let lit = Literal::new(var.clone(), polarity);
                let score = scores.get(&lit).copied().unwrap_or(0.0);
                if best.as_ref().map_or(true, |(_, top)| score > *top) {
                    best = Some((lit, score));
                }
            }
        }
        if let Some((lit, score)) = &best {
            trace!("jw: {} scores {}", lit, score);
        }
        best.map(|(lit, _)| lit)
    }

    fn select_unit<'u>(&mut self, units: &'u [Clause]) -> Option<&'u Clause> {
        units.first()
    }
}
