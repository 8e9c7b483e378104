//! Inference rules of natural deduction.
//!
//! A rule takes antecedent sentences and term arguments and
//! returns the sentence that follows from them.
//! Premises and hypotheses are assumptions that follow from nothing;
//! applying them yields no sentence.

use crate::grammar::{self, Connective, Connective::*, Quantifier, Sentence, Term};
use core::fmt::{self, Display};
use core::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Premise,
    Hypothesis,
    ReductioAdAbsurdum,
    DoubleNegationElimination,
    DoubleNegationIntroduction,
    DeductionTheorem,
    ModusPonens,
    ModusTollens,
    Adjunction,
    Simplification1,
    Simplification2,
    /// same as [`Rule::Simplification1`]
    Simplification,
    Addition,
    CaseAnalysis,
    DisjunctiveSyllogism1,
    DisjunctiveSyllogism2,
    /// same as [`Rule::DisjunctiveSyllogism1`]
    DisjunctiveSyllogism,
    ConstructiveDilemma,
    BiconditionalIntroduction,
    BiconditionalElimination1,
    BiconditionalElimination2,
    /// same as [`Rule::BiconditionalElimination1`]
    BiconditionalElimination,
    BiconditionalNeg1,
    BiconditionalNeg2,
    /// same as [`Rule::BiconditionalNeg1`]
    BiconditionalNeg,
    UniversalGeneralization,
    UniversalInstantiation,
    ExistentialGeneralization,
    ExistentialInstantiation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    UnknownRule(String),
    /// wrong number of antecedents or term arguments
    Arity {
        rule: Rule,
        antecedents: usize,
        args: usize,
    },
    /// the antecedents do not have the shape the rule demands
    Precondition { rule: Rule, condition: &'static str },
    Capture(grammar::Error),
}

impl From<grammar::Error> for Error {
    fn from(err: grammar::Error) -> Self {
        Self::Capture(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownRule(r) => write!(f, "unknown rule {}", r),
            Self::Arity { rule, antecedents, args } => write!(
                f,
                "{} expects {} antecedents and {} arguments",
                rule, antecedents, args
            ),
            Self::Precondition { rule, condition } => write!(f, "{}: {}", rule, condition),
            Self::Capture(e) => e.fmt(f),
        }
    }
}

impl Rule {
    pub const ALL: [Self; 29] = {
        use Rule::*;
        [
            Premise,
            Hypothesis,
            ReductioAdAbsurdum,
            DoubleNegationElimination,
            DoubleNegationIntroduction,
            DeductionTheorem,
            ModusPonens,
            ModusTollens,
            Adjunction,
            Simplification1,
            Simplification2,
            Simplification,
            Addition,
            CaseAnalysis,
            DisjunctiveSyllogism1,
            DisjunctiveSyllogism2,
            DisjunctiveSyllogism,
            ConstructiveDilemma,
            BiconditionalIntroduction,
            BiconditionalElimination1,
            BiconditionalElimination2,
            BiconditionalElimination,
            BiconditionalNeg1,
            BiconditionalNeg2,
            BiconditionalNeg,
            UniversalGeneralization,
            UniversalInstantiation,
            ExistentialGeneralization,
            ExistentialInstantiation,
        ]
    };

    pub fn name(self) -> &'static str {
        use Rule::*;
        match self {
            Premise => "premise",
            Hypothesis => "hypothesis",
            ReductioAdAbsurdum => "reductio_ad_absurdum",
            DoubleNegationElimination => "double_negation_elimination",
            DoubleNegationIntroduction => "double_negation_introduction",
            DeductionTheorem => "deduction_theorem",
            ModusPonens => "modus_ponens",
            ModusTollens => "modus_tollens",
            Adjunction => "adjunction",
            Simplification1 => "simplification1",
            Simplification2 => "simplification2",
            Simplification => "simplification",
            Addition => "addition",
            CaseAnalysis => "case_analysis",
            DisjunctiveSyllogism1 => "disjunctive_syllogism1",
            DisjunctiveSyllogism2 => "disjunctive_syllogism2",
            DisjunctiveSyllogism => "disjunctive_syllogism",
            ConstructiveDilemma => "constructive_dilemma",
            BiconditionalIntroduction => "biconditional_introduction",
            BiconditionalElimination1 => "biconditional_elimination1",
            BiconditionalElimination2 => "biconditional_elimination2",
            BiconditionalElimination => "biconditional_elimination",
            BiconditionalNeg1 => "biconditional_neg1",
            BiconditionalNeg2 => "biconditional_neg2",
            BiconditionalNeg => "biconditional_neg",
            UniversalGeneralization => "universal_generalization",
            UniversalInstantiation => "universal_instantiation",
            ExistentialGeneralization => "existential_generalization",
            ExistentialInstantiation => "existential_instantiation",
        }
    }

    /// Return true for rules that introduce assumptions.
    pub fn is_assumption(self) -> bool {
        matches!(self, Self::Premise | Self::Hypothesis)
    }

    /// Number of antecedents and term arguments the rule takes.
    pub fn arity(self) -> (usize, usize) {
        use Rule::*;
        match self {
            Premise | Hypothesis => (0, 0),
            DoubleNegationElimination | DoubleNegationIntroduction => (1, 0),
            Simplification1 | Simplification2 | Simplification => (1, 0),
            UniversalGeneralization | ExistentialGeneralization => (1, 2),
            UniversalInstantiation | ExistentialInstantiation => (1, 1),
            ReductioAdAbsurdum | CaseAnalysis | ConstructiveDilemma => (3, 0),
            _ => (2, 0),
        }
    }

    /// Derive the conclusion of the rule.
    ///
    /// ~~~
    /// # use traduko::{grammar::Sentence, rules::Rule};
    /// let p = |s| Sentence::parse(s).unwrap();
    /// let c = Rule::ModusPonens.apply(&[p("A => B"), p("A")], &[])?;
    /// assert_eq!(c, Some(p("B")));
    /// assert_eq!(Rule::Premise.apply(&[], &[])?, None);
    /// # Ok::<_, traduko::rules::Error>(())
    /// ~~~
    pub fn apply(self, antecedents: &[Sentence], args: &[Term]) -> Result<Option<Sentence>, Error> {
        let (n_ants, n_args) = self.arity();
        if antecedents.len() != n_ants || args.len() != n_args {
            return Err(Error::Arity {
                rule: self,
                antecedents: n_ants,
                args: n_args,
            });
        }
        use Rule::*;
        let a = antecedents;
        let conclusion = match self {
            Premise | Hypothesis => return Ok(None),
            ReductioAdAbsurdum => {
                // the hypothesis leads to a sentence and its negation
                let neg = negation(self, &a[2], "third antecedent is not a negation")?;
                ensure(self, neg == &a[1], "third antecedent does not negate the second")?;
                Sentence::negation(a[0].clone())
            }
            DoubleNegationElimination => {
                let neg = negation(self, &a[0], "antecedent is not a double negation")?;
                negation(self, neg, "antecedent is not a double negation")?.clone()
            }
            DoubleNegationIntroduction => Sentence::negation(Sentence::negation(a[0].clone())),
            DeductionTheorem => Sentence::implication(a[0].clone(), a[1].clone()),
            ModusPonens => {
                let (l, r) = binary(self, &a[0], Implication, "first antecedent is not an implication")?;
                ensure(self, l == &a[1], "second antecedent does not match the premise")?;
                r.clone()
            }
            ModusTollens => {
                let (l, r) = binary(self, &a[0], Implication, "first antecedent is not an implication")?;
                let neg = negation(self, &a[1], "second antecedent is not a negation")?;
                ensure(self, neg == r, "second antecedent does not negate the conclusion")?;
                Sentence::negation(l.clone())
            }
            Adjunction => Sentence::conjunction(a[0].clone(), a[1].clone()),
            Simplification1 | Simplification => {
                binary(self, &a[0], Conjunction, "antecedent is not a conjunction")?.0.clone()
            }
            Simplification2 => binary(self, &a[0], Conjunction, "antecedent is not a conjunction")?.1.clone(),
            Addition => Sentence::disjunction(a[0].clone(), a[1].clone()),
            CaseAnalysis => {
                let (l1, r1) = binary(self, &a[0], Implication, "first antecedent is not an implication")?;
                let (l2, r2) = binary(self, &a[1], Implication, "second antecedent is not an implication")?;
                let (l, r) = binary(self, &a[2], Disjunction, "third antecedent is not a disjunction")?;
                ensure(self, r1 == r2, "implications have different conclusions")?;
                ensure(self, l1 == l && l2 == r, "disjunction does not match the premises")?;
                r1.clone()
            }
            DisjunctiveSyllogism1 | DisjunctiveSyllogism => {
                let (l, r) = binary(self, &a[0], Disjunction, "first antecedent is not a disjunction")?;
                let neg = negation(self, &a[1], "second antecedent is not a negation")?;
                ensure(self, neg == l, "second antecedent does not negate the left disjunct")?;
                r.clone()
            }
            DisjunctiveSyllogism2 => {
                let (l, r) = binary(self, &a[0], Disjunction, "first antecedent is not a disjunction")?;
                let neg = negation(self, &a[1], "second antecedent is not a negation")?;
                ensure(self, neg == r, "second antecedent does not negate the right disjunct")?;
                l.clone()
            }
            ConstructiveDilemma => {
                let (l1, r1) = binary(self, &a[0], Implication, "first antecedent is not an implication")?;
                let (l2, r2) = binary(self, &a[1], Implication, "second antecedent is not an implication")?;
                let (l, r) = binary(self, &a[2], Disjunction, "third antecedent is not a disjunction")?;
                ensure(self, l1 == l && l2 == r, "disjunction does not match the premises")?;
                Sentence::disjunction(r1.clone(), r2.clone())
            }
            BiconditionalIntroduction => {
                let (l1, r1) = binary(self, &a[0], Implication, "first antecedent is not an implication")?;
                let (l2, r2) = binary(self, &a[1], Implication, "second antecedent is not an implication")?;
                ensure(self, l1 == r2 && r1 == l2, "implications are not converse")?;
                Sentence::biconditional(l1.clone(), r1.clone())
            }
            BiconditionalElimination1 | BiconditionalElimination => {
                let (l, r) = binary(self, &a[0], Biconditional, "first antecedent is not a biconditional")?;
                ensure(self, l == &a[1], "second antecedent does not match the left side")?;
                r.clone()
            }
            BiconditionalElimination2 => {
                let (l, r) = binary(self, &a[0], Biconditional, "first antecedent is not a biconditional")?;
                ensure(self, r == &a[1], "second antecedent does not match the right side")?;
                l.clone()
            }
            BiconditionalNeg1 | BiconditionalNeg => {
                let (l, r) = binary(self, &a[0], Biconditional, "first antecedent is not a biconditional")?;
                let neg = negation(self, &a[1], "second antecedent is not a negation")?;
                ensure(self, neg == l, "second antecedent does not negate the left side")?;
                Sentence::negation(r.clone())
            }
            BiconditionalNeg2 => {
                let (l, r) = binary(self, &a[0], Biconditional, "first antecedent is not a biconditional")?;
                let neg = negation(self, &a[1], "second antecedent is not a negation")?;
                ensure(self, neg == r, "second antecedent does not negate the right side")?;
                Sentence::negation(l.clone())
            }
            UniversalGeneralization => generalize(self, Quantifier::Universal, &a[0], args)?,
            ExistentialGeneralization => generalize(self, Quantifier::Existential, &a[0], args)?,
            UniversalInstantiation => instantiate(self, Quantifier::Universal, &a[0], &args[0])?,
            ExistentialInstantiation => instantiate(self, Quantifier::Existential, &a[0], &args[0])?,
        };
        Ok(Some(conclusion))
    }
}

fn binary<'a>(
    rule: Rule,
    s: &'a Sentence,
    c: Connective,
    condition: &'static str,
) -> Result<(&'a Sentence, &'a Sentence), Error> {
    s.as_binary(c).ok_or(Error::Precondition { rule, condition })
}

fn negation<'a>(rule: Rule, s: &'a Sentence, condition: &'static str) -> Result<&'a Sentence, Error> {
    s.as_negation().ok_or(Error::Precondition { rule, condition })
}

fn ensure(rule: Rule, b: bool, condition: &'static str) -> Result<(), Error> {
    if b {
        Ok(())
    } else {
        Err(Error::Precondition { rule, condition })
    }
}

/// Replace a symbol by a fresh variable and bind the variable.
fn generalize(rule: Rule, q: Quantifier, s: &Sentence, args: &[Term]) -> Result<Sentence, Error> {
    let fail = |condition| Error::Precondition { rule, condition };
    let old = match &args[0] {
        Term::Constant(c) | Term::Variable(c) => c,
        Term::Function(..) => return Err(fail("generalized term is not a symbol")),
    };
    let x = match &args[1] {
        Term::Variable(x) => x,
        _ => return Err(fail("new term is not a variable")),
    };
    if old != x && s.is_free(x) {
        return Err(fail("new variable already occurs free"));
    }
    Ok(Sentence::quantified(q, x.clone(), s.substitute(old, &args[1])?))
}

/// Remove a quantifier and replace the bound variable by a term.
fn instantiate(rule: Rule, q: Quantifier, s: &Sentence, t: &Term) -> Result<Sentence, Error> {
    let condition = match q {
        Quantifier::Universal => "antecedent is not universally quantified",
        Quantifier::Existential => "antecedent is not existentially quantified",
    };
    let (x, body) = s.as_quantified(q).ok_or(Error::Precondition { rule, condition })?;
    Ok(body.substitute(x, t)?)
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let found = Self::ALL.iter().find(|r| r.name() == s);
        found.copied().ok_or_else(|| Error::UnknownRule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Sentence {
        Sentence::parse(s).unwrap()
    }

    fn conclude(rule: Rule, ants: &[&str]) -> Result<Option<Sentence>, Error> {
        let ants: Vec<_> = ants.iter().map(|s| p(s)).collect();
        rule.apply(&ants, &[])
    }

    #[test]
    fn names() {
        for rule in Rule::ALL {
            assert_eq!(rule.name().parse::<Rule>(), Ok(rule));
        }
        assert!(matches!("modus_bogus".parse::<Rule>(), Err(Error::UnknownRule(_))));
    }

    #[test]
    fn propositional() {
        use Rule::*;
        let cases: [(Rule, &[&str], &str); 20] = [
            (ReductioAdAbsurdum, &["A", "B", "-B"], "-A"),
            (DoubleNegationElimination, &["--A"], "A"),
            (DoubleNegationIntroduction, &["A"], "--A"),
            (DeductionTheorem, &["A", "B"], "A => B"),
            (ModusTollens, &["A => B", "-B"], "-A"),
            (Adjunction, &["A", "B"], "A AND B"),
            (Simplification1, &["A AND B"], "A"),
            (Simplification2, &["A AND B"], "B"),
            (Simplification, &["A AND B"], "A"),
            (Addition, &["A", "B"], "A OR B"),
            (CaseAnalysis, &["A => C", "B => C", "A OR B"], "C"),
            (DisjunctiveSyllogism1, &["A OR B", "-A"], "B"),
            (DisjunctiveSyllogism2, &["A OR B", "-B"], "A"),
            (DisjunctiveSyllogism, &["A OR B", "-A"], "B"),
            (ConstructiveDilemma, &["A => C", "B => D", "A OR B"], "C OR D"),
            (BiconditionalIntroduction, &["A => B", "B => A"], "A <=> B"),
            (BiconditionalElimination1, &["A <=> B", "A"], "B"),
            (BiconditionalElimination2, &["A <=> B", "B"], "A"),
            (BiconditionalNeg1, &["A <=> B", "-A"], "-B"),
            (BiconditionalNeg2, &["A <=> B", "-B"], "-A"),
        ];
        for (rule, ants, expected) in cases {
            assert_eq!(conclude(rule, ants), Ok(Some(p(expected))), "{}", rule);
        }
    }

    #[test]
    fn preconditions() {
        use Rule::*;
        let failing: [(Rule, &[&str]); 7] = [
            (ModusPonens, &["A => B", "B"]),
            (ModusTollens, &["A => B", "-A"]),
            (DoubleNegationElimination, &["-A"]),
            (CaseAnalysis, &["A => C", "B => D", "A OR B"]),
            (DisjunctiveSyllogism2, &["A OR B", "-A"]),
            (BiconditionalIntroduction, &["A => B", "A => B"]),
            (Simplification1, &["A OR B"]),
        ];
        for (rule, ants) in failing {
            assert!(matches!(conclude(rule, ants), Err(Error::Precondition { .. })), "{}", rule);
        }
    }

    #[test]
    fn arity() {
        let err = conclude(Rule::ModusPonens, &["A => B"]);
        assert!(matches!(err, Err(Error::Arity { antecedents: 2, .. })));
        assert!(matches!(conclude(Rule::Premise, &["A"]), Err(Error::Arity { .. })));
    }

    #[test]
    fn quantifiers() {
        let x = Term::variable("x").unwrap();
        let c = Term::constant("c").unwrap();
        let apply = |rule: Rule, s, args: &[Term]| rule.apply(&[p(s)], args);

        let inst = apply(Rule::UniversalInstantiation, "FORALL x P(x)", &[c.clone()]);
        assert_eq!(inst, Ok(Some(p("P(c)"))));
        let inst = apply(Rule::ExistentialInstantiation, "EXISTS x (P(x) AND Q)", &[c.clone()]);
        assert_eq!(inst, Ok(Some(p("P(c) AND Q"))));
        let wrong = apply(Rule::UniversalInstantiation, "EXISTS x P(x)", &[c.clone()]);
        assert!(matches!(wrong, Err(Error::Precondition { .. })));

        let args = [c.clone(), x.clone()];
        let gen = apply(Rule::UniversalGeneralization, "P(c) OR R(c, d)", &args);
        assert_eq!(gen, Ok(Some(p("FORALL x (P(x) OR R(x, d))"))));
        let gen = apply(Rule::ExistentialGeneralization, "P(c)", &args);
        assert_eq!(gen, Ok(Some(p("EXISTS x P(x)"))));
        let not_var = apply(Rule::UniversalGeneralization, "P(c)", &[c.clone(), c]);
        assert!(matches!(not_var, Err(Error::Precondition { .. })));
    }

    #[test]
    fn capture() {
        // instantiating x with y below a binder of y
        let y = Term::variable("y").unwrap();
        let s = p("FORALL x EXISTS y R(x, y)");
        let err = Rule::UniversalInstantiation.apply(&[s], &[y]);
        assert!(matches!(err, Err(Error::Capture(grammar::Error::VariableCapture(_)))));
    }
}
