//! Common error type.

use crate::grammar::Error as GrammarError;
use crate::language::Error as LanguageError;
use crate::lean::Error as LeanError;
use crate::proof::Error as ProofError;
use crate::rules::Error as RuleError;
use crate::xml::Error as XmlError;
use core::fmt::{self, Display};
use formula_parse::Error as ParseError;

/// Common error type.
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Grammar(GrammarError),
    Xml(XmlError),
    Rule(RuleError),
    Proof(ProofError),
    Language(LanguageError),
    Lean(LeanError),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<GrammarError> for Error {
    fn from(err: GrammarError) -> Self {
        Self::Grammar(err)
    }
}

impl From<XmlError> for Error {
    fn from(err: XmlError) -> Self {
        Self::Xml(err)
    }
}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        Self::Rule(err)
    }
}

impl From<ProofError> for Error {
    fn from(err: ProofError) -> Self {
        Self::Proof(err)
    }
}

impl From<LanguageError> for Error {
    fn from(err: LanguageError) -> Self {
        Self::Language(err)
    }
}

impl From<LeanError> for Error {
    fn from(err: LeanError) -> Self {
        Self::Lean(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {:?}", e),
            Self::Grammar(e) => e.fmt(f),
            Self::Xml(e) => write!(f, "XML error: {}", e),
            Self::Rule(e) => e.fmt(f),
            Self::Proof(e) => e.fmt(f),
            Self::Language(e) => e.fmt(f),
            Self::Lean(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
