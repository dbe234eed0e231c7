use std::fmt;

use fnv::FnvHashMap;
use itertools::Itertools;

use crate::instance::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    /// Decisions taken, i.e. positive branches entered.
    pub branch_count: usize,
    /// Positive branches that failed and were retried with the complement.
    pub backtrack_count: usize,
    pub unit_prop_count: usize,
    pub max_depth: usize,
}

/// The outcome of one solve: the input, the clause set the search returned, and counters.
#[derive(Clone)]
pub struct Solution {
    input: ClauseSet,
    result: ClauseSet,
    pub stats: EvaluationStats,
}

impl Solution {
    pub(crate) fn new(input: ClauseSet, result: ClauseSet, stats: EvaluationStats) -> Solution {
        Solution {
            input,
            result,
            stats,
        }
    }

    pub fn input(&self) -> &ClauseSet {
        &self.input
    }

    /// Either the falsum sentinel or a set of unit clauses.
    pub fn result(&self) -> &ClauseSet {
        &self.result
    }

    pub fn is_satisfiable(&self) -> bool {
        !self.result.contains_empty_clause()
    }

    /// The forced literals, ordered by variable name. `None` if unsatisfiable.
    pub fn assignments(&self) -> Option<Vec<Literal>> {
        if !self.is_satisfiable() {
            return None;
        }
        let lits = self
            .result
            .clauses()
            .filter(|clause| clause.is_unit())
            .map(|clause| clause.unit_literal())
            .sorted_by(|a, b| a.var().cmp(b.var()))
            .collect();
        Some(lits)
    }

    /// `None` when unsatisfiable or when `var` is unconstrained.
    pub fn value_of(&self, var: &Variable) -> Option<bool> {
        self.assignments()?
            .into_iter()
            .find(|lit| lit.var() == var)
            .map(|lit| lit.polarity())
    }

    /// Checks the assignment against `clauses`. Unassigned variables are free, so a clause
    /// mentioning one is satisfiable by choosing it.
    pub fn satisfies(&self, clauses: &ClauseSet) -> bool {
        let assignment: FnvHashMap<Variable, bool> = match self.assignments() {
            Some(lits) => lits
                .into_iter()
                .map(|lit| (lit.var().clone(), lit.polarity()))
                .collect(),
            None => return false,
        };
        clauses.clauses().all(|clause| {
            clause
                .literals()
                .any(|lit| match assignment.get(lit.var()) {
                    Some(&value) => value == lit.polarity(),
                    None => true,
                })
        })
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lits = match self.assignments() {
            Some(lits) => lits,
            None => return write!(f, "{} is unsolvable", self.input),
        };
        if lits.is_empty() {
            return write!(f, "{{}}");
        }
        let body = lits
            .iter()
            .map(|lit| {
                let value = if lit.polarity() { "True" } else { "False" };
                format!("{} ↦ {}", lit.var(), value)
            })
            .join(", ");
        write!(f, "{{ {} }}", body)
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; stats={:?}", self, self.stats)
    }
}

#[cfg(test)]
mod test {
    use crate::instance::*;

    use super::*;

    fn lit(name: &str, polarity: bool) -> Literal {
        Literal::new(Variable::new(name), polarity)
    }

    fn assignment(lits: &[(&str, bool)]) -> ClauseSet {
        lits.iter()
            .map(|&(name, polarity)| Clause::unit(lit(name, polarity)))
            .collect()
    }

    #[test]
    fn test_format_assignment() {
        let input = ClauseSet::new(vec![Clause::new(vec![lit("q", false), lit("p", true)])]);
        let solution = Solution::new(
            input,
            assignment(&[("q", false), ("p", true)]),
            EvaluationStats::default(),
        );
        assert_eq!(solution.to_string(), "{ p ↦ True, q ↦ False }");
        assert_eq!(solution.value_of(&Variable::new("q")), Some(false));
        assert_eq!(solution.value_of(&Variable::new("r")), None);
    }

    #[test]
    fn test_format_unsolvable() {
        let input = ClauseSet::new(vec![Clause::unit(lit("p", true)), Clause::unit(lit("p", false))]);
        let solution = Solution::new(input, ClauseSet::falsum(), EvaluationStats::default());
        assert!(!solution.is_satisfiable());
        assert_eq!(solution.assignments(), None);
        assert_eq!(solution.to_string(), "{{p}, {¬p}} is unsolvable");
    }

    #[test]
    fn test_format_trivial() {
        let solution = Solution::new(
            ClauseSet::empty(),
            ClauseSet::empty(),
            EvaluationStats::default(),
        );
        assert!(solution.is_satisfiable());
        assert_eq!(solution.to_string(), "{}");
        assert!(solution.satisfies(&ClauseSet::empty()));
    }

    #[test]
    fn test_satisfies_treats_missing_variables_as_free() {
        let solution = Solution::new(
            ClauseSet::empty(),
            assignment(&[("p", true)]),
            EvaluationStats::default(),
        );
        let free = ClauseSet::new(vec![Clause::new(vec![lit("p", false), lit("q", false)])]);
        assert!(solution.satisfies(&free));
        let violated = ClauseSet::new(vec![Clause::unit(lit("p", false))]);
        assert!(!solution.satisfies(&violated));
        assert!(!solution.satisfies(&ClauseSet::falsum()));
    }
}
