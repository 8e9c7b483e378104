//! Translation of statements and tactics between natural language and Lean.
//!
//! Natural language is written in a LaTeX-like notation,
//! where mathematical content is enclosed in `$` delimiters.
//! Every translatable form can be rendered to and matched from both languages.
//! Matching always considers the whole string, and
//! subexpressions are matched by trying a list of candidate forms in order,
//! taking the first that matches.
//! The order of these candidate lists therefore decides ambiguities.
//!
//! Matching may depend on and update a [`Context`]:
//! for example, `$a_n$` denotes a sequence application only if
//! `a` was previously declared to be a sequence.
//!
//! ~~~
//! use traduko::language::{Class, Context, Kind, Language, Statement};
//!
//! let mut ctx = Context::new();
//! ctx.add("a", Class::Sequence);
//! let s = Statement::from_natural(r"$\forall n : a_n \leq b$", &mut ctx).unwrap();
//! assert_eq!(s.to_lean(), "∀ n, a n ≤ b");
//! assert_eq!(Kind::Inequality.lean("a n < ε", &mut ctx).unwrap().to_natural(false), r"$a_n < \epsilon$");
//! ~~~

mod context;
mod feedback;
mod manager;
mod sentences;
mod tactic;

pub use context::{Class, Classification, Context};
pub use feedback::{extract_error, extract_goal, extract_goals, extract_variable, is_accomplished};
pub use feedback::{goal_to_natural, normalize_lean, variable_to_natural};
pub use manager::{Feedback, Manager, Rendering, Step};
pub use sentences::{ArithOp, Ineq, Kind, Statement};
pub use tactic::{Tactic, TacticKind};

use core::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    UnrecognizedHypothesis(String),
    UnrecognizedGoal(String),
    UnrecognizedTactic(String),
    /// a proof line was given before the goal
    NoGoal,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnrecognizedHypothesis(s) => write!(f, "unrecognized hypothesis: {}", s),
            Self::UnrecognizedGoal(s) => write!(f, "unrecognized goal: {}", s),
            Self::UnrecognizedTactic(s) => write!(f, "unrecognized proof line: {}", s),
            Self::NoGoal => write!(f, "the goal must be set before the proof"),
        }
    }
}

/// Rendering to and matching from natural language and Lean.
///
/// For every value `v` and the context `ctx` that `v` was produced in,
/// matching `v.to_natural(false)` or `v.to_lean()` in `ctx` yields `v` again.
pub trait Language: Sized {
    fn to_lean(&self) -> String;

    /// Render to natural language.
    ///
    /// If `in_math` is true, the output is embedded in already opened math delimiters.
    fn to_natural(&self, in_math: bool) -> String;

    fn match_natural(s: &str, ctx: &mut Context, in_math: bool) -> Option<Self>;

    fn from_lean(s: &str, ctx: &mut Context) -> Option<Self>;

    fn from_natural(s: &str, ctx: &mut Context) -> Option<Self> {
        Self::match_natural(s, ctx, false)
    }
}

/// Compile a regular expression once, anchored to match whole strings only.
///
/// With `search`, the expression is not anchored.
macro_rules! regex {
    (search $re:literal) => {{
        static RE: std::sync::LazyLock<regex::Regex> =
            std::sync::LazyLock::new(|| regex::Regex::new($re).unwrap());
        &*RE
    }};
    ($re:literal) => {{
        static RE: std::sync::LazyLock<regex::Regex> =
            std::sync::LazyLock::new(|| regex::Regex::new(concat!("^(?:", $re, ")$")).unwrap());
        &*RE
    }};
}
pub(crate) use regex;

/// Enclose math content in delimiters unless it is already in math mode.
fn enclose(s: String, in_math: bool) -> String {
    if in_math {
        s
    } else {
        format!("${}$", s)
    }
}

/// Return the math content of a string, which must be enclosed in delimiters unless in math mode.
fn inside(s: &str, in_math: bool) -> Option<&str> {
    if in_math {
        return Some(s);
    }
    let s = s.strip_prefix('$')?.strip_suffix('$')?;
    (!s.contains('$')).then_some(s)
}

/// Split a string around any occurrence of any separator, from left to right.
fn splits<'s>(s: &'s str, seps: &[&'static str]) -> Vec<(&'s str, &'static str, &'s str)> {
    let mut out: Vec<_> = seps
        .iter()
        .flat_map(|sep| s.match_indices(sep).map(move |(i, _)| (i, *sep)))
        .collect();
    out.sort_by_key(|(i, _)| *i);
    out.into_iter()
        .map(|(i, sep)| (&s[..i], sep, &s[i + sep.len()..]))
        .collect()
}

/// Normalise natural-language input.
///
/// This removes empty math (`$$`), normalises whitespace, and
/// separates LaTeX commands from a preceding character.
///
/// ~~~
/// # use traduko::language::preprocess;
/// assert_eq!(preprocess("  Let   $n$ \n\n "), "Let $n$");
/// assert_eq!(preprocess("a  \n  b"), "a\nb");
/// assert_eq!(preprocess(r"$$ $a_n\rightarrow l$"), r"$a_n \rightarrow l$");
/// ~~~
pub fn preprocess(s: &str) -> String {
    let s = s.trim().replace("$$", "");
    let lines = s.lines().map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "));
    let s = lines.filter(|l| !l.is_empty()).collect::<Vec<_>>().join("\n");
    regex!(search r"([^\s$])\\").replace_all(&s, r"$1 \").into_owned()
}

#[test]
fn split_positions() {
    let parts = splits("a - b < c - d", &[" < ", " - "]);
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], ("a", " - ", "b < c - d"));
    assert_eq!(parts[1], ("a - b", " < ", "c - d"));
}

#[test]
fn commands_separated() {
    let s = preprocess(r"$\forall n : \left\lvert a_n - l\right\rvert < \epsilon$");
    assert_eq!(s, r"$\forall n : \left \lvert a_n - l \right \rvert < \epsilon$");
    assert_eq!(preprocess(r"Let $N = \max\left(N_a, N_c\right)$"), r"Let $N = \max \left(N_a, N_c \right)$");
    assert_eq!(preprocess("$$\n$x$ $$"), "$x$");
}

#[test]
fn math_delimiters() {
    assert_eq!(inside("$x$", false), Some("x"));
    assert_eq!(inside("$x$ and $y$", false), None);
    assert_eq!(inside("x", false), None);
    assert_eq!(inside("x", true), Some("x"));
    assert_eq!(enclose("x".into(), false), "$x$");
}
