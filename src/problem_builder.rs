use crate::instance::*;

/// Collects clauses over named variables. Each `require` call adds one disjunction.
#[derive(Clone, Debug, Default)]
pub struct ProblemBuilder {
    clauses: Vec<Clause>,
}

impl ProblemBuilder {
    pub fn new() -> ProblemBuilder {
        Self::default()
    }

    /// The positive literal of the variable called `name`. Asking twice yields equal literals.
    pub fn var(&self, name: &str) -> Literal {
        Literal::positive(Variable::new(name))
    }

    pub fn not(&self, lit: &Literal) -> Literal {
        lit.complement()
    }

    /// At least one of `lits` must hold. An empty slice adds the empty clause.
    pub fn require(&mut self, lits: &[Literal]) {
        self.clauses.push(Clause::new(lits.iter().cloned()))
    }

    /// At most one of `lits` may hold, as pairwise exclusions.
    pub fn at_most_one(&mut self, lits: &[Literal]) {
        for (i, a) in lits.iter().enumerate() {
            for b in &lits[i + 1..] {
                self.require(&[a.complement(), b.complement()]);
            }
        }
    }

    pub fn build(self) -> ClauseSet {
        ClauseSet::new(self.clauses)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build() {
        let mut pb = ProblemBuilder::new();
        let a = pb.var("a");
        let b = pb.var("b");
        pb.require(&[a.clone(), pb.not(&b)]);
        pb.require(&[pb.not(&b), a.clone()]);
        pb.require(&[b.clone()]);

        let cs = pb.build();
        assert_eq!(cs.len(), 2);
        assert!(cs.contains(&Clause::unit(b.clone())));
        assert!(cs.contains(&Clause::new(vec![a, b.complement()])));
    }

    #[test]
    fn test_at_most_one() {
        let mut pb = ProblemBuilder::new();
        let lits: Vec<_> = ["x", "y", "z"].iter().map(|n| pb.var(n)).collect();
        pb.at_most_one(&lits);
        let cs = pb.build();
        assert_eq!(cs.len(), 3);
        assert_eq!(cs.to_string(), "{{¬x, ¬y}, {¬x, ¬z}, {¬y, ¬z}}");
    }

    #[test]
    fn test_empty_requirement_is_falsum() {
        let mut pb = ProblemBuilder::new();
        pb.require(&[]);
        assert!(pb.build().is_falsum());
    }
}
