//! Sentences and terms with unresolved identifiers.

use crate::Token;
use alloc::{boxed::Box, vec::Vec};
use core::fmt::{self, Display};
use core::iter::Peekable;

/// Term whose identifiers are not yet known to be variables or constants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term<S> {
    /// `x`
    Symb(S),
    /// `f(t1, ..., tn)`
    Appl(S, Vec<Self>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    And,
    Or,
    Imp,
    Iff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quant {
    Forall,
    Exists,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sentence<S> {
    /// `true` or `false`
    Bool(bool),
    /// `P` or `P(t1, ..., tn)`
    Pred(S, Vec<Term<S>>),
    /// `- s`
    Neg(Box<Self>),
    /// `s1 AND s2`, `s1 OR s2`, `s1 => s2`, `s1 <=> s2`
    Bin(Box<Self>, BinOp, Box<Self>),
    /// `FORALL x s`, `EXISTS x s`
    Quant(Quant, S, Box<Self>),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    UnknownToken,
    ExpectedSentence,
    ExpectedIdent,
    ExpectedTerm,
    ExpectedCommaOrRPar,
    ExpectedRPar,
    ExpectedEnd,
}

type Result<T> = core::result::Result<T, Error>;

impl BinOp {
    fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::And => Some(Self::And),
            Token::Or => Some(Self::Or),
            Token::Imp => Some(Self::Imp),
            Token::Iff => Some(Self::Iff),
            _ => None,
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Imp => "=>",
            Self::Iff => "<=>",
        };
        s.fmt(f)
    }
}

impl Display for Quant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Forall => "FORALL".fmt(f),
            Self::Exists => "EXISTS".fmt(f),
        }
    }
}

impl<'s> Term<&'s str> {
    pub fn parse<I>(iter: &mut Peekable<I>) -> Result<Self>
    where
        I: Iterator<Item = Token<'s>>,
    {
        match iter.next() {
            Some(Token::Ident(s)) => {
                if iter.peek() == Some(&Token::LPar) {
                    iter.next();
                    Ok(Self::Appl(s, Self::args(iter)?))
                } else {
                    Ok(Self::Symb(s))
                }
            }
            Some(Token::Error) => Err(Error::UnknownToken),
            _ => Err(Error::ExpectedTerm),
        }
    }

    /// Parse `t1, ..., tn)`, where the opening parenthesis was already consumed.
    fn args<I>(iter: &mut Peekable<I>) -> Result<Vec<Self>>
    where
        I: Iterator<Item = Token<'s>>,
    {
        let mut args = Vec::from([Self::parse(iter)?]);
        loop {
            match iter.next() {
                Some(Token::Comma) => args.push(Self::parse(iter)?),
                Some(Token::RPar) => return Ok(args),
                _ => return Err(Error::ExpectedCommaOrRPar),
            }
        }
    }
}

impl<'s> Sentence<&'s str> {
    /// Parse a sentence, possibly followed by further tokens.
    pub fn parse<I>(iter: &mut Peekable<I>) -> Result<Self>
    where
        I: Iterator<Item = Token<'s>>,
    {
        let left = Self::unary(iter)?;
        let op = match iter.peek().and_then(BinOp::from_token) {
            Some(op) => op,
            None => return Ok(left),
        };
        iter.next();
        let right = Self::unary(iter)?;
        Ok(Self::Bin(Box::new(left), op, Box::new(right)))
    }

    fn unary<I>(iter: &mut Peekable<I>) -> Result<Self>
    where
        I: Iterator<Item = Token<'s>>,
    {
        match iter.next() {
            Some(Token::Neg) => Ok(Self::Neg(Box::new(Self::unary(iter)?))),
            Some(tok @ (Token::Forall | Token::Exists)) => {
                let q = if tok == Token::Forall {
                    Quant::Forall
                } else {
                    Quant::Exists
                };
                match iter.next() {
                    Some(Token::Ident(x)) => Ok(Self::Quant(q, x, Box::new(Self::unary(iter)?))),
                    _ => Err(Error::ExpectedIdent),
                }
            }
            Some(Token::LPar) => {
                let s = Self::parse(iter)?;
                match iter.next() {
                    Some(Token::RPar) => Ok(s),
                    _ => Err(Error::ExpectedRPar),
                }
            }
            Some(Token::True) => Ok(Self::Bool(true)),
            Some(Token::False) => Ok(Self::Bool(false)),
            Some(Token::Ident(p)) => {
                if iter.peek() == Some(&Token::LPar) {
                    iter.next();
                    Ok(Self::Pred(p, Term::args(iter)?))
                } else {
                    Ok(Self::Pred(p, Vec::new()))
                }
            }
            Some(Token::Error) => Err(Error::UnknownToken),
            _ => Err(Error::ExpectedSentence),
        }
    }

    /// Parse a string that contains exactly one sentence.
    pub fn parse_str(s: &'s str) -> Result<Self> {
        let mut iter = crate::lex(s).peekable();
        let sentence = Self::parse(&mut iter)?;
        match iter.next() {
            None => Ok(sentence),
            Some(Token::Error) => Err(Error::UnknownToken),
            Some(_) => Err(Error::ExpectedEnd),
        }
    }
}

impl<S: Display> Display for Term<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Symb(s) => s.fmt(f),
            Self::Appl(s, args) => {
                write!(f, "{}(", s)?;
                fmt_args(args, f)?;
                write!(f, ")")
            }
        }
    }
}

/// Print comma-separated arguments.
pub fn fmt_args<T: Display>(args: &[T], f: &mut fmt::Formatter) -> fmt::Result {
    let mut iter = args.iter();
    if let Some(head) = iter.next() {
        head.fmt(f)?;
    }
    iter.try_for_each(|a| write!(f, ", {}", a))
}

impl<S> Sentence<S> {
    fn is_binary(&self) -> bool {
        matches!(self, Self::Bin(..))
    }
}

impl<S: Display> Display for Sentence<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // binary sentences are the only ones that need parentheses as operands
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
            Self::Pred(p, args) if args.is_empty() => p.fmt(f),
            Self::Pred(p, args) => {
                write!(f, "{}(", p)?;
                fmt_args(args, f)?;
                write!(f, ")")
            }
            Self::Neg(s) => {
                write!(f, "-")?;
                operand(s, f)
            }
            Self::Bin(l, op, r) => {
                operand(l, f)?;
                write!(f, " {} ", op)?;
                operand(r, f)
            }
            Self::Quant(q, x, s) => {
                write!(f, "{} {} ", q, x)?;
                operand(s, f)
            }
        }
    }
}

#[test]
fn positive() -> Result<()> {
    Sentence::parse_str("true")?;
    Sentence::parse_str("(A) => (B)")?;
    Sentence::parse_str("A AND B")?;
    Sentence::parse_str("-(A OR B)")?;
    Sentence::parse_str("--A")?;
    Sentence::parse_str("P(x, f(y, c))")?;
    Sentence::parse_str("FORALL x (P(x) => EXISTS y Q(x, y))")?;
    Sentence::parse_str("(A <=> B) AND (C)")?;
    Ok(())
}

#[test]
fn negative() {
    use Error::*;
    let err = |s| Sentence::parse_str(s).unwrap_err();
    assert_eq!(err(""), ExpectedSentence);
    assert_eq!(err("A AND B OR C"), ExpectedEnd);
    assert_eq!(err("(A AND B"), ExpectedRPar);
    assert_eq!(err("FORALL (A)"), ExpectedIdent);
    assert_eq!(err("P()"), ExpectedTerm);
    assert_eq!(err("P(x y)"), ExpectedCommaOrRPar);
    assert_eq!(err("A & B"), UnknownToken);
}

#[test]
fn display_reparses() -> Result<()> {
    use alloc::string::ToString;
    for s in [
        "A => B",
        "-(A OR B)",
        "FORALL x (P(x) => Q(f(x), c))",
        "(A AND B) <=> -C",
        "EXISTS x -P(x)",
    ] {
        let parsed = Sentence::parse_str(s)?;
        assert_eq!(parsed.to_string(), s);
        assert_eq!(Sentence::parse_str(&parsed.to_string())?, parsed);
    }
    Ok(())
}
