//! Sentences and terms of first-order logic.
//!
//! All values of the types in this module are well-formed:
//! symbols can only be built via [`Symbol::new`] and
//! argument lists via [`Args::new`], both of which reject malformed input.

use core::fmt::{self, Display};
use core::ops::Deref;
use formula_parse::sentence::fmt_args;

/// Name of a constant, variable, function, or predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

/// Nonempty list of arguments of a function or predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Args(Vec<Term>);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Constant(Symbol),
    Variable(Symbol),
    Function(Symbol, Args),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connective {
    Conjunction,
    Disjunction,
    Implication,
    Biconditional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Universal,
    Existential,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sentence {
    Bool(bool),
    ConstantPredicate(Symbol),
    Predicate(Symbol, Args),
    Negation(Box<Self>),
    Binary(Connective, Box<Self>, Box<Self>),
    Quantified(Quantifier, Symbol, Box<Self>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    MalformedSymbol(String),
    MalformedTerm(&'static str),
    MalformedSentence(&'static str),
    /// substitution would place the replacement under a binder of this variable
    VariableCapture(Symbol),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MalformedSymbol(s) => write!(f, "malformed symbol \"{}\"", s),
            Self::MalformedTerm(s) => write!(f, "malformed term: {}", s),
            Self::MalformedSentence(s) => write!(f, "malformed sentence: {}", s),
            Self::VariableCapture(x) => write!(f, "substitution captures variable {}", x),
        }
    }
}

const KEYWORDS: [&str; 6] = ["true", "false", "AND", "OR", "FORALL", "EXISTS"];

impl Symbol {
    /// Create a symbol, failing if it could not be read back from text.
    ///
    /// ~~~
    /// # use traduko::grammar::Symbol;
    /// assert!(Symbol::new("x'").is_ok());
    /// assert!(Symbol::new("").is_err());
    /// assert!(Symbol::new("AND").is_err());
    /// assert!(Symbol::new("a b").is_err());
    /// ~~~
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        let mut chars = s.chars();
        let head = chars.next().filter(|c| c.is_ascii_alphanumeric() || *c == '_');
        let tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'');
        if head.is_some() && tail && !KEYWORDS.contains(&s.as_str()) {
            Ok(Self(s))
        } else {
            Err(Error::MalformedSymbol(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Args {
    pub fn new(args: Vec<Term>) -> Result<Self, Error> {
        if args.is_empty() {
            Err(Error::MalformedTerm("empty argument list"))
        } else {
            Ok(Self(args))
        }
    }

    fn map(&self, f: impl FnMut(&Term) -> Term) -> Self {
        Self(self.0.iter().map(f).collect())
    }
}

impl Deref for Args {
    type Target = [Term];

    fn deref(&self) -> &[Term] {
        &self.0
    }
}

impl Term {
    pub fn constant(s: &str) -> Result<Self, Error> {
        Ok(Self::Constant(Symbol::new(s)?))
    }

    pub fn variable(s: &str) -> Result<Self, Error> {
        Ok(Self::Variable(Symbol::new(s)?))
    }

    pub fn function(s: &str, args: Vec<Term>) -> Result<Self, Error> {
        Ok(Self::Function(Symbol::new(s)?, Args::new(args)?))
    }

    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Constant(s) | Self::Variable(s) | Self::Function(s, _) => s,
        }
    }

    /// Return true if the term contains a constant or variable named `x`.
    pub fn mentions(&self, x: &Symbol) -> bool {
        match self {
            Self::Constant(s) | Self::Variable(s) => s == x,
            Self::Function(_, args) => args.iter().any(|a| a.mentions(x)),
        }
    }

    /// Replace all constants and variables named `x` by `new`.
    pub fn substitute(&self, x: &Symbol, new: &Term) -> Term {
        match self {
            Self::Constant(s) | Self::Variable(s) if s == x => new.clone(),
            Self::Constant(_) | Self::Variable(_) => self.clone(),
            Self::Function(f, args) => Self::Function(f.clone(), args.map(|a| a.substitute(x, new))),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Constant(s) | Self::Variable(s) => s.fmt(f),
            Self::Function(s, args) => {
                write!(f, "{}(", s)?;
                fmt_args(args, f)?;
                write!(f, ")")
            }
        }
    }
}

impl Sentence {
    pub fn constant_predicate(s: &str) -> Result<Self, Error> {
        Ok(Self::ConstantPredicate(Symbol::new(s)?))
    }

    pub fn predicate(s: &str, terms: Vec<Term>) -> Result<Self, Error> {
        let args = Args::new(terms).map_err(|_| Error::MalformedSentence("predicate without terms"))?;
        Ok(Self::Predicate(Symbol::new(s)?, args))
    }

    pub fn negation(s: Self) -> Self {
        Self::Negation(Box::new(s))
    }

    pub fn binary(c: Connective, l: Self, r: Self) -> Self {
        Self::Binary(c, Box::new(l), Box::new(r))
    }

    pub fn conjunction(l: Self, r: Self) -> Self {
        Self::binary(Connective::Conjunction, l, r)
    }

    pub fn disjunction(l: Self, r: Self) -> Self {
        Self::binary(Connective::Disjunction, l, r)
    }

    pub fn implication(l: Self, r: Self) -> Self {
        Self::binary(Connective::Implication, l, r)
    }

    pub fn biconditional(l: Self, r: Self) -> Self {
        Self::binary(Connective::Biconditional, l, r)
    }

    pub fn quantified(q: Quantifier, x: Symbol, s: Self) -> Self {
        Self::Quantified(q, x, Box::new(s))
    }

    /// Return the operands if the sentence is built with the given connective.
    pub fn as_binary(&self, c: Connective) -> Option<(&Self, &Self)> {
        match self {
            Self::Binary(c2, l, r) if *c2 == c => Some((l, r)),
            _ => None,
        }
    }

    /// Return the negated sentence if the sentence is a negation.
    pub fn as_negation(&self) -> Option<&Self> {
        match self {
            Self::Negation(s) => Some(s),
            _ => None,
        }
    }

    /// Return the bound variable and body if the sentence uses the given quantifier.
    pub fn as_quantified(&self, q: Quantifier) -> Option<(&Symbol, &Self)> {
        match self {
            Self::Quantified(q2, x, s) if *q2 == q => Some((x, s)),
            _ => None,
        }
    }

    /// Replace the free occurrences of `x` by `new`.
    ///
    /// Occurrences below a quantifier binding `x` are not free and stay untouched.
    /// If a free occurrence lies below a quantifier binding a symbol of `new`,
    /// the substitution fails instead of capturing it.
    ///
    /// ~~~
    /// # use traduko::grammar::{Error, Sentence, Symbol, Term};
    /// let s = Sentence::parse("P(x) AND FORALL x Q(x)").unwrap();
    /// let x = Symbol::new("x")?;
    /// let t = s.substitute(&x, &Term::constant("c")?)?;
    /// assert_eq!(t, Sentence::parse("P(c) AND FORALL x Q(x)").unwrap());
    ///
    /// let s = Sentence::parse("FORALL y R(x, y)").unwrap();
    /// let err = s.substitute(&x, &Term::variable("y")?);
    /// assert_eq!(err, Err(Error::VariableCapture(Symbol::new("y")?)));
    /// # Ok::<_, Error>(())
    /// ~~~
    pub fn substitute(&self, x: &Symbol, new: &Term) -> Result<Self, Error> {
        let sub = |s: &Self| s.substitute(x, new).map(Box::new);
        match self {
            Self::Bool(_) | Self::ConstantPredicate(_) => Ok(self.clone()),
            Self::Predicate(p, args) => {
                let args = args.map(|a| a.substitute(x, new));
                Ok(Self::Predicate(p.clone(), args))
            }
            Self::Negation(s) => Ok(Self::Negation(sub(s)?)),
            Self::Binary(c, l, r) => Ok(Self::Binary(*c, sub(l)?, sub(r)?)),
            Self::Quantified(_, y, _) if y == x => Ok(self.clone()),
            Self::Quantified(q, y, s) => {
                if new.mentions(y) && s.is_free(x) {
                    return Err(Error::VariableCapture(y.clone()));
                }
                Ok(Self::Quantified(*q, y.clone(), sub(s)?))
            }
        }
    }

    /// Return true if `x` occurs in the sentence outside of any quantifier binding `x`.
    ///
    /// A symbol that does not occur at all is not free.
    pub fn is_free(&self, x: &Symbol) -> bool {
        match self {
            Self::Bool(_) | Self::ConstantPredicate(_) => false,
            Self::Predicate(_, args) => args.iter().any(|a| a.mentions(x)),
            Self::Negation(s) => s.is_free(x),
            Self::Binary(_, l, r) => l.is_free(x) || r.is_free(x),
            Self::Quantified(_, y, s) => y != x && s.is_free(x),
        }
    }

    fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(..))
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Conjunction => "AND",
            Self::Disjunction => "OR",
            Self::Implication => "=>",
            Self::Biconditional => "<=>",
        };
        s.fmt(f)
    }
}

impl Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Universal => "FORALL".fmt(f),
            Self::Existential => "EXISTS".fmt(f),
        }
    }
}

/// Print a sentence such that it can be parsed back with [`Sentence::parse`].
///
/// Variables and constants print the same;
/// parsing makes every symbol bound by a quantifier a variable
/// and every other symbol a constant.
impl Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let operand = |s: &Self, f: &mut fmt::Formatter| {
            if s.is_binary() {
                write!(f, "({})", s)
            } else {
                s.fmt(f)
            }
        };
        match self {
            Self::Bool(true) => "true".fmt(f),
            Self::Bool(false) => "false".fmt(f),
            Self::ConstantPredicate(p) => p.fmt(f),
            Self::Predicate(p, args) => {
                write!(f, "{}(", p)?;
                fmt_args(args, f)?;
                write!(f, ")")
            }
            Self::Negation(s) => {
                write!(f, "-")?;
                operand(s, f)
            }
            Self::Binary(c, l, r) => {
                operand(l, f)?;
                write!(f, " {} ", c)?;
                operand(r, f)
            }
            Self::Quantified(q, x, s) => {
                write!(f, "{} {} ", q, x)?;
                operand(s, f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn malformed() {
        assert_eq!(Term::function("f", Vec::new()), Err(Error::MalformedTerm("empty argument list")));
        assert!(matches!(Sentence::predicate("P", Vec::new()), Err(Error::MalformedSentence(_))));
        assert!(matches!(Sentence::constant_predicate("A B"), Err(Error::MalformedSymbol(_))));
        assert!(matches!(Term::variable("FORALL"), Err(Error::MalformedSymbol(_))));
    }

    #[test]
    fn structural_equality() {
        let a = || Sentence::constant_predicate("A").unwrap();
        let b = || Sentence::constant_predicate("B").unwrap();
        assert_eq!(Sentence::conjunction(a(), b()), Sentence::conjunction(a(), b()));
        assert_ne!(Sentence::conjunction(a(), b()), Sentence::conjunction(b(), a()));
        assert_ne!(Sentence::conjunction(a(), b()), Sentence::disjunction(a(), b()));
        assert_ne!(Term::constant("x"), Term::variable("x"));
    }

    #[test]
    fn shadowed_substitution() {
        let x = sym("x");
        let body = Sentence::predicate("P", Vec::from([Term::variable("x").unwrap()])).unwrap();
        let s = Sentence::quantified(Quantifier::Universal, x.clone(), body);
        let t = s.substitute(&x, &Term::variable("y").unwrap()).unwrap();
        assert_eq!(s, t);
    }

    #[test]
    fn capture() {
        // FORALL y P(x, y)
        let args = Vec::from([Term::variable("x").unwrap(), Term::variable("y").unwrap()]);
        let body = Sentence::predicate("P", args).unwrap();
        let s = Sentence::quantified(Quantifier::Universal, sym("y"), body);
        let new = Term::function("f", Vec::from([Term::variable("y").unwrap()])).unwrap();
        assert_eq!(s.substitute(&sym("x"), &new), Err(Error::VariableCapture(sym("y"))));
        // nothing to replace below the binder, so nothing is captured
        assert!(s.substitute(&sym("z"), &new).is_ok());
    }

    #[test]
    fn free() {
        let x = sym("x");
        let px = Sentence::predicate("P", Vec::from([Term::variable("x").unwrap()])).unwrap();
        assert!(px.is_free(&x));
        assert!(!px.is_free(&sym("y")));
        let all = Sentence::quantified(Quantifier::Existential, x.clone(), px.clone());
        assert!(!all.is_free(&x));
        assert!(Sentence::conjunction(all, px).is_free(&x));
        assert!(!Sentence::Bool(true).is_free(&x));
    }

    #[test]
    fn display() {
        let fx = Term::function("f", Vec::from([Term::variable("x").unwrap()])).unwrap();
        let p = Sentence::predicate("P", Vec::from([fx, Term::constant("c").unwrap()])).unwrap();
        let s = Sentence::quantified(Quantifier::Universal, sym("x"), Sentence::negation(p));
        let s = Sentence::implication(s, Sentence::Bool(false));
        // the body of a quantifier never extends over a connective
        assert_eq!(s.to_string(), "FORALL x -P(f(x), c) => false");
    }

    #[test]
    fn display_parses_back() {
        let sentences = [
            "FORALL x -P(f(x), c) => false",
            "(EXISTS y (P(y) AND Q(y))) OR -(A <=> B)",
            "-FORALL x EXISTS y R(x, g(y, c))",
            "A => (B => FORALL x (P(x) OR Q(x)))",
        ];
        for text in sentences {
            let s = Sentence::parse(text).unwrap();
            assert_eq!(Sentence::parse(&s.to_string()).unwrap(), s, "{}", text);
        }
        let s = Sentence::parse("(FORALL x P(x)) AND Q(x)").unwrap();
        assert_eq!(s.to_string(), "FORALL x P(x) AND Q(x)");
    }
}
