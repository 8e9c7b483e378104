//! Scoping of parse structures, distinguishing variables from constants.
//!
//! An identifier becomes a variable if an enclosing quantifier binds it,
//! otherwise it becomes a constant.

use crate::grammar::{Args, Quantifier, Sentence, Symbol, Term};
use crate::{Error, Stack};
use formula_parse as parse;

type Bound<'s> = Stack<&'s str>;

pub trait Scope<Target> {
    fn scope(self) -> Target;
}

pub trait Scopen<'s, Target> {
    /// Scope an open structure using supplied bound variables.
    fn scopen(self, bnd: &mut Bound<'s>) -> Target;
}

impl<'s, Target, T: Scopen<'s, Target>> Scope<Target> for T {
    fn scope(self) -> Target {
        self.scopen(&mut Stack::new())
    }
}

type Result<T> = core::result::Result<T, crate::grammar::Error>;

impl<'s> Scopen<'s, Result<Term>> for parse::Term<&'s str> {
    fn scopen(self, bnd: &mut Bound<'s>) -> Result<Term> {
        match self {
            Self::Symb(s) if bnd.contains(&s) => Term::variable(s),
            Self::Symb(s) => Term::constant(s),
            Self::Appl(f, args) => Ok(Term::Function(Symbol::new(f)?, args.scopen(bnd)?)),
        }
    }
}

impl<'s> Scopen<'s, Result<Args>> for Vec<parse::Term<&'s str>> {
    fn scopen(self, bnd: &mut Bound<'s>) -> Result<Args> {
        let args = self.into_iter().map(|a| a.scopen(bnd));
        Args::new(args.collect::<Result<_>>()?)
    }
}

impl<'s> Scopen<'s, Result<Sentence>> for parse::Sentence<&'s str> {
    fn scopen(self, bnd: &mut Bound<'s>) -> Result<Sentence> {
        use parse::{BinOp, Quant};
        use crate::grammar::Connective::*;
        match self {
            Self::Bool(b) => Ok(Sentence::Bool(b)),
            Self::Pred(p, args) if args.is_empty() => Sentence::constant_predicate(p),
            Self::Pred(p, args) => Ok(Sentence::Predicate(Symbol::new(p)?, args.scopen(bnd)?)),
            Self::Neg(s) => Ok(Sentence::negation(s.scopen(bnd)?)),
            Self::Bin(l, op, r) => {
                let c = match op {
                    BinOp::And => Conjunction,
                    BinOp::Or => Disjunction,
                    BinOp::Imp => Implication,
                    BinOp::Iff => Biconditional,
                };
                Ok(Sentence::binary(c, l.scopen(bnd)?, r.scopen(bnd)?))
            }
            Self::Quant(q, x, s) => {
                let q = match q {
                    Quant::Forall => Quantifier::Universal,
                    Quant::Exists => Quantifier::Existential,
                };
                let s = bnd.with_pushed(x, |bnd| s.scopen(bnd))?;
                Ok(Sentence::quantified(q, Symbol::new(x)?, s))
            }
        }
    }
}

impl Sentence {
    /// Parse a sentence from text and scope it.
    ///
    /// ~~~
    /// # use traduko::grammar::{Sentence, Term};
    /// let s = Sentence::parse("FORALL x P(x, c)")?;
    /// let (_, body) = s.as_quantified(traduko::grammar::Quantifier::Universal).unwrap();
    /// match body {
    ///     Sentence::Predicate(_, args) => {
    ///         assert_eq!(args[0], Term::variable("x")?);
    ///         assert_eq!(args[1], Term::constant("c")?);
    ///     }
    ///     _ => panic!("expected predicate"),
    /// }
    /// # Ok::<_, traduko::Error>(())
    /// ~~~
    pub fn parse(s: &str) -> core::result::Result<Self, Error> {
        Ok(parse::Sentence::parse_str(s)?.scope()?)
    }
}

impl Term {
    /// Parse a term from text, treating the given names as bound variables.
    pub fn parse(s: &str, bound: &[&str]) -> core::result::Result<Self, Error> {
        let mut iter = parse::lex(s).peekable();
        let tm = parse::Term::parse(&mut iter)?;
        if iter.next().is_some() {
            return Err(Error::Parse(parse::Error::ExpectedEnd));
        }
        let mut bnd = Bound::new();
        bound.iter().for_each(|x| bnd.push(*x));
        Ok(tm.scopen(&mut bnd)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Connective;

    #[test]
    fn bound_and_free() -> core::result::Result<(), Error> {
        // the x in Q(x) lies outside of the quantifier
        let s = Sentence::parse("(FORALL x P(x)) AND Q(x)")?;
        let (l, r) = s.as_binary(Connective::Conjunction).unwrap();
        let x = Symbol::new("x")?;
        assert!(!l.is_free(&x));
        assert_eq!(r, &Sentence::predicate("Q", Vec::from([Term::constant("x")?]))?);
        Ok(())
    }

    #[test]
    fn shadowing() -> core::result::Result<(), Error> {
        let s = Sentence::parse("EXISTS x FORALL x P(x)")?;
        let inner = Sentence::predicate("P", Vec::from([Term::variable("x")?]))?;
        let x = || Symbol::new("x");
        let expected = Sentence::quantified(
            Quantifier::Existential,
            x()?,
            Sentence::quantified(Quantifier::Universal, x()?, inner),
        );
        assert_eq!(s, expected);
        Ok(())
    }

    #[test]
    fn terms() -> core::result::Result<(), Error> {
        assert_eq!(Term::parse("x", &["x"])?, Term::variable("x")?);
        assert_eq!(Term::parse("x", &[])?, Term::constant("x")?);
        let t = Term::parse("f(x, y)", &["y"])?;
        let args = Vec::from([Term::constant("x")?, Term::variable("y")?]);
        assert_eq!(t, Term::function("f", args)?);
        assert!(Term::parse("f(x) g", &[]).is_err());
        Ok(())
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(Sentence::parse("A AND"), Err(Error::Parse(_))));
        assert!(matches!(Sentence::parse("P(x"), Err(Error::Parse(_))));
    }
}
