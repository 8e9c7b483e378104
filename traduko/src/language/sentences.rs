//! Statements about sequences and real numbers.

use super::{enclose, inside, regex, splits, Class, Context, Language};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ineq {
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// `x`
    Identifier(String),
    /// `\epsilon`, `ε`
    Epsilon,
    /// `a_n`, `a n`
    ApplySequence { seq: String, index: String },
    Arithmetic(Box<Self>, ArithOp, Box<Self>),
    /// `\left\lvert a - b\right\rvert`, `|a - b|`
    AbsoluteDiff(Box<Self>, Box<Self>),
    Inequality(Box<Self>, Ineq, Box<Self>),
    Conjunction(Box<Self>, Box<Self>),
    /// `$a_n, b_n$ are real-valued sequences`, `a b : ℕ → ℝ`
    RealValuedSequences(Vec<String>),
    /// `l \in \mathbb{R}`, `l : ℝ`
    RealDeclaration(String),
    /// `N \in \mathbb{N}`, `N : ℕ`
    NatDeclaration(String),
    /// `a_n \rightarrow l`, `is_limit a l`
    SequenceLimit { seq: String, limit: String },
    /// `\left(a_n + b_n\right) \rightarrow l + m`, `is_limit (λ n, a n + b n) (l + m)`
    ComposedSequenceLimit {
        seqs: (String, String),
        op: ArithOp,
        limits: (String, String),
    },
    /// `\forall x : P`, `∀ x, P`
    ForAll(String, Box<Self>),
    /// `\forall n \geq N : P`, `∀ n ≥ N, P`
    ForAllNatIneqThen { var: String, bound: String, body: Box<Self> },
    /// `\exists x : P`, `∃ x, P`
    Exists(String, Box<Self>),
}

/// Form of a statement, used to try matching a particular form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Identifier,
    Epsilon,
    ApplySequence,
    Arithmetic,
    AbsoluteDiff,
    Inequality,
    Conjunction,
    RealValuedSequences,
    RealDeclaration,
    NatDeclaration,
    SequenceLimit,
    ComposedSequenceLimit,
    ForAll,
    ForAllNatIneqThen,
    Exists,
}

impl Kind {
    /// Hypotheses of a theorem.
    pub const HYPOTHESES: &'static [Self] = &[
        Self::RealValuedSequences,
        Self::RealDeclaration,
        Self::SequenceLimit,
        Self::ForAll,
    ];

    /// Goals of a theorem.
    pub const GOALS: &'static [Self] = &[Self::SequenceLimit, Self::ComposedSequenceLimit];

    /// Proof states returned by Lean.
    pub const FEEDBACK: &'static [Self] = &[
        Self::SequenceLimit,
        Self::ComposedSequenceLimit,
        Self::Exists,
        Self::ForAllNatIneqThen,
        Self::ForAll,
        Self::Conjunction,
        Self::Inequality,
    ];

    pub const DECLARATIONS: &'static [Self] = &[
        Self::RealValuedSequences,
        Self::RealDeclaration,
        Self::NatDeclaration,
    ];

    /// Bodies of quantifiers and operands of conjunctions.
    pub const BODIES: &'static [Self] = &[Self::ForAllNatIneqThen, Self::ForAll, Self::Inequality];

    /// Sides of inequalities.
    pub const SIDES: &'static [Self] = &[
        Self::AbsoluteDiff,
        Self::Arithmetic,
        Self::ApplySequence,
        Self::Epsilon,
        Self::Identifier,
    ];

    /// Operands of arithmetic and absolute differences.
    pub const LEAVES: &'static [Self] = &[Self::ApplySequence, Self::Epsilon, Self::Identifier];

    const ALL: &'static [Self] = &[
        Self::RealValuedSequences,
        Self::RealDeclaration,
        Self::NatDeclaration,
        Self::SequenceLimit,
        Self::ComposedSequenceLimit,
        Self::Exists,
        Self::ForAllNatIneqThen,
        Self::ForAll,
        Self::Conjunction,
        Self::Inequality,
        Self::AbsoluteDiff,
        Self::Arithmetic,
        Self::ApplySequence,
        Self::Epsilon,
        Self::Identifier,
    ];

    /// Match natural language as a statement of this form.
    pub fn natural(self, s: &str, ctx: &mut Context, in_math: bool) -> Option<Statement> {
        if self == Self::RealValuedSequences {
            let caps = regex!(r"\$(\w+_n(?:, \w+_n)*)\$ are real-valued sequences").captures(s)?;
            let seqs = caps[1].split(", ").map(|x| x.strip_suffix("_n").map(String::from));
            let seqs = seqs.collect::<Option<Vec<_>>>()?;
            seqs.iter().for_each(|x| ctx.add(x, Class::Sequence));
            return Some(Statement::RealValuedSequences(seqs));
        }
        self.math(inside(s, in_math)?, ctx)
    }

    /// Match math content as a statement of this form.
    fn math(self, s: &str, ctx: &mut Context) -> Option<Statement> {
        use Statement as S;
        let leaf = |s: &str, ctx: &mut Context| natural(s, ctx, Self::LEAVES, true);
        let body = |s: &str, ctx: &mut Context| natural(s, ctx, Self::BODIES, true);
        match self {
            Self::Identifier => regex!(r"\w+").is_match(s).then(|| S::Identifier(s.into())),
            Self::Epsilon => (s == r"\epsilon").then_some(S::Epsilon),
            Self::ApplySequence => {
                let caps = regex!(r"(\w+)_(\w+)").captures(s)?;
                apply_sequence(&caps[1], &caps[2], ctx)
            }
            Self::Arithmetic => splits(s, &[" + ", " - ", r" \cdot "]).into_iter().find_map(|(l, op, r)| {
                let op = match op {
                    " + " => ArithOp::Add,
                    " - " => ArithOp::Sub,
                    _ => ArithOp::Mul,
                };
                Some(S::Arithmetic(Box::new(leaf(l, ctx)?), op, Box::new(leaf(r, ctx)?)))
            }),
            Self::AbsoluteDiff => {
                let s = s.strip_prefix(r"\left")?.trim_start();
                let s = s.strip_prefix(r"\lvert").or_else(|| s.strip_prefix('|'))?;
                let s = s.strip_suffix(r"\rvert").or_else(|| s.strip_suffix('|'))?;
                let s = s.trim_end().strip_suffix(r"\right")?;
                let (l, r) = s.trim().split_once(" - ")?;
                Some(S::AbsoluteDiff(Box::new(leaf(l, ctx)?), Box::new(leaf(r, ctx)?)))
            }
            Self::Inequality => {
                let seps = [" < ", " > ", r" \leq ", r" \geq "];
                splits(s, &seps).into_iter().find_map(|(l, op, r)| {
                    let op = match op {
                        " < " => Ineq::Lt,
                        " > " => Ineq::Gt,
                        r" \leq " => Ineq::Le,
                        _ => Ineq::Ge,
                    };
                    let l = natural(l, ctx, Self::SIDES, true)?;
                    let r = natural(r, ctx, Self::SIDES, true)?;
                    Some(S::Inequality(Box::new(l), op, Box::new(r)))
                })
            }
            Self::Conjunction => splits(s, &[r" \wedge "]).into_iter().find_map(|(l, _, r)| {
                Some(S::Conjunction(Box::new(body(l, ctx)?), Box::new(body(r, ctx)?)))
            }),
            Self::RealValuedSequences => None,
            Self::RealDeclaration => {
                let caps = regex!(r"(\\epsilon|\w+) \\in \\mathbb\{R\}").captures(s)?;
                let x = ident_from_natural(&caps[1]);
                ctx.add(&x, Class::Real);
                Some(S::RealDeclaration(x))
            }
            Self::NatDeclaration => {
                let caps = regex!(r"(\w+) \\in \\mathbb\{N\}").captures(s)?;
                ctx.add(&caps[1], Class::Natural);
                Some(S::NatDeclaration(caps[1].into()))
            }
            Self::SequenceLimit => {
                let caps = regex!(r"(\w+)_n \\rightarrow (\w+)").captures(s)?;
                let (seq, limit) = (caps[1].into(), caps[2].into());
                Some(S::SequenceLimit { seq, limit })
            }
            Self::ComposedSequenceLimit => {
                let re = regex!(r"\\left\((\w+)_n (\+|\\cdot) (\w+)_n ?\\right\) \\rightarrow (\w+) (\+|\\cdot) (\w+)");
                let caps = re.captures(s)?;
                let op = if &caps[2] == "+" { ArithOp::Add } else { ArithOp::Mul };
                if caps[2] != caps[5] {
                    return None;
                }
                let seqs = (caps[1].into(), caps[3].into());
                let limits = (caps[4].into(), caps[6].into());
                Some(S::ComposedSequenceLimit { seqs, op, limits })
            }
            Self::ForAll => {
                let caps = regex!(r"\\forall (\w+) : (.+)").captures(s)?;
                Some(S::ForAll(caps[1].into(), Box::new(body(&caps[2], ctx)?)))
            }
            Self::ForAllNatIneqThen => {
                let caps = regex!(r"\\forall (\w+) \\geq (\w+) : (.+)").captures(s)?;
                let (var, bound) = (caps[1].into(), caps[2].into());
                let body = Box::new(body(&caps[3], ctx)?);
                Some(S::ForAllNatIneqThen { var, bound, body })
            }
            Self::Exists => {
                let caps = regex!(r"\\exists (\w+) : (.+)").captures(s)?;
                Some(S::Exists(caps[1].into(), Box::new(body(&caps[2], ctx)?)))
            }
        }
    }

    /// Match Lean text as a statement of this form.
    pub fn lean(self, s: &str, ctx: &mut Context) -> Option<Statement> {
        use Statement as S;
        let leaf = |s: &str, ctx: &mut Context| lean(s, ctx, Self::LEAVES);
        let body = |s: &str, ctx: &mut Context| lean(s, ctx, Self::BODIES);
        match self {
            Self::Identifier => regex!(r"\w+").is_match(s).then(|| S::Identifier(s.into())),
            Self::Epsilon => (s == "ε").then_some(S::Epsilon),
            Self::ApplySequence => {
                let caps = regex!(r"(\w+) (\w+)").captures(s)?;
                apply_sequence(&caps[1], &caps[2], ctx)
            }
            Self::Arithmetic => splits(s, &[" + ", " - ", " * "]).into_iter().find_map(|(l, op, r)| {
                let op = match op {
                    " + " => ArithOp::Add,
                    " - " => ArithOp::Sub,
                    _ => ArithOp::Mul,
                };
                Some(S::Arithmetic(Box::new(leaf(l, ctx)?), op, Box::new(leaf(r, ctx)?)))
            }),
            Self::AbsoluteDiff => {
                let caps = regex!(r"\|(.+) - (.+)\|").captures(s)?;
                Some(S::AbsoluteDiff(Box::new(leaf(&caps[1], ctx)?), Box::new(leaf(&caps[2], ctx)?)))
            }
            Self::Inequality => splits(s, &[" < ", " > ", " ≤ ", " ≥ "]).into_iter().find_map(|(l, op, r)| {
                let op = match op {
                    " < " => Ineq::Lt,
                    " > " => Ineq::Gt,
                    " ≤ " => Ineq::Le,
                    _ => Ineq::Ge,
                };
                let l = lean(l, ctx, Self::SIDES)?;
                let r = lean(r, ctx, Self::SIDES)?;
                Some(S::Inequality(Box::new(l), op, Box::new(r)))
            }),
            Self::Conjunction => splits(s, &[" ∧ "]).into_iter().find_map(|(l, _, r)| {
                Some(S::Conjunction(Box::new(body(l, ctx)?), Box::new(body(r, ctx)?)))
            }),
            Self::RealValuedSequences => {
                let caps = regex!(r"((?:\w+ )+): ℕ → ℝ").captures(s)?;
                let seqs: Vec<String> = caps[1].split_whitespace().map(String::from).collect();
                seqs.iter().for_each(|x| ctx.add(x, Class::Sequence));
                Some(S::RealValuedSequences(seqs))
            }
            Self::RealDeclaration => {
                let caps = regex!(r"(\w+) : ℝ").captures(s)?;
                ctx.add(&caps[1], Class::Real);
                Some(S::RealDeclaration(caps[1].into()))
            }
            Self::NatDeclaration => {
                let caps = regex!(r"(\w+) : ℕ").captures(s)?;
                ctx.add(&caps[1], Class::Natural);
                Some(S::NatDeclaration(caps[1].into()))
            }
            Self::SequenceLimit => {
                let caps = regex!(r"is_limit (\w+) (\w+)").captures(s)?;
                let (seq, limit) = (caps[1].into(), caps[2].into());
                Some(S::SequenceLimit { seq, limit })
            }
            Self::ComposedSequenceLimit => {
                let re = regex!(r"is_limit \(λ n, (\w+) n (\+|\*) (\w+) n\) \((\w+) (\+|\*) (\w+)\)");
                let caps = re.captures(s)?;
                let op = if &caps[2] == "+" { ArithOp::Add } else { ArithOp::Mul };
                if caps[2] != caps[5] {
                    return None;
                }
                let seqs = (caps[1].into(), caps[3].into());
                let limits = (caps[4].into(), caps[6].into());
                Some(S::ComposedSequenceLimit { seqs, op, limits })
            }
            Self::ForAll => {
                let caps = regex!(r"∀ (\w+), (.+)").captures(s)?;
                Some(S::ForAll(caps[1].into(), Box::new(body(&caps[2], ctx)?)))
            }
            Self::ForAllNatIneqThen => {
                let caps = regex!(r"∀ (\w+) ≥ (\w+), (.+)").captures(s)?;
                let (var, bound) = (caps[1].into(), caps[2].into());
                let body = Box::new(body(&caps[3], ctx)?);
                Some(S::ForAllNatIneqThen { var, bound, body })
            }
            Self::Exists => {
                let caps = regex!(r"∃ (\w+), (.+)").captures(s)?;
                Some(S::Exists(caps[1].into(), Box::new(body(&caps[2], ctx)?)))
            }
        }
    }
}

/// Try to match natural language with the candidate forms in order.
pub fn natural(s: &str, ctx: &mut Context, kinds: &[Kind], in_math: bool) -> Option<Statement> {
    kinds.iter().find_map(|k| {
        let m = k.natural(s, ctx, in_math)?;
        log::debug!("{:?} matches \"{}\"", k, s);
        Some(m)
    })
}

/// Try to match Lean text with the candidate forms in order.
pub fn lean(s: &str, ctx: &mut Context, kinds: &[Kind]) -> Option<Statement> {
    kinds.iter().find_map(|k| {
        let m = k.lean(s, ctx)?;
        log::debug!("{:?} matches \"{}\"", k, s);
        Some(m)
    })
}

fn apply_sequence(seq: &str, index: &str, ctx: &Context) -> Option<Statement> {
    let (seq, index) = (seq.to_string(), index.to_string());
    ctx.is(&seq, Class::Sequence).then_some(Statement::ApplySequence { seq, index })
}

fn ident_from_natural(x: &str) -> String {
    if x == r"\epsilon" {
        "ε".into()
    } else {
        x.into()
    }
}

fn ident_to_natural(x: &str) -> &str {
    if x == "ε" {
        r"\epsilon"
    } else {
        x
    }
}

impl ArithOp {
    fn natural(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => r"\cdot",
        }
    }

    fn lean(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
        }
    }
}

impl Ineq {
    fn natural(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => r"\leq",
            Self::Gt => ">",
            Self::Ge => r"\geq",
        }
    }

    fn lean(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "≤",
            Self::Gt => ">",
            Self::Ge => "≥",
        }
    }
}

impl Statement {
    /// Return true for statements that only declare identifiers.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Self::RealValuedSequences(_) | Self::RealDeclaration(_) | Self::NatDeclaration(_)
        )
    }

    /// Replace the identifier `from` by `to`, except below binders of `from`.
    pub fn rename(&self, from: &str, to: &str) -> Self {
        let name = |x: &String| if x == from { to.to_string() } else { x.clone() };
        let re = |s: &Self| Box::new(s.rename(from, to));
        match self {
            Self::Identifier(x) => Self::Identifier(name(x)),
            Self::Epsilon => Self::Epsilon,
            Self::ApplySequence { seq, index } => Self::ApplySequence {
                seq: name(seq),
                index: name(index),
            },
            Self::Arithmetic(l, op, r) => Self::Arithmetic(re(l), *op, re(r)),
            Self::AbsoluteDiff(l, r) => Self::AbsoluteDiff(re(l), re(r)),
            Self::Inequality(l, op, r) => Self::Inequality(re(l), *op, re(r)),
            Self::Conjunction(l, r) => Self::Conjunction(re(l), re(r)),
            Self::RealValuedSequences(xs) => Self::RealValuedSequences(xs.iter().map(name).collect()),
            Self::RealDeclaration(x) => Self::RealDeclaration(name(x)),
            Self::NatDeclaration(x) => Self::NatDeclaration(name(x)),
            Self::SequenceLimit { seq, limit } => Self::SequenceLimit {
                seq: name(seq),
                limit: name(limit),
            },
            Self::ComposedSequenceLimit { seqs, op, limits } => Self::ComposedSequenceLimit {
                seqs: (name(&seqs.0), name(&seqs.1)),
                op: *op,
                limits: (name(&limits.0), name(&limits.1)),
            },
            Self::ForAll(x, _) | Self::Exists(x, _) if x == from => self.clone(),
            Self::ForAll(x, s) => Self::ForAll(x.clone(), re(s)),
            Self::Exists(x, s) => Self::Exists(x.clone(), re(s)),
            Self::ForAllNatIneqThen { var, .. } if var == from => self.clone(),
            Self::ForAllNatIneqThen { var, bound, body } => Self::ForAllNatIneqThen {
                var: var.clone(),
                bound: name(bound),
                body: re(body),
            },
        }
    }
}

impl Language for Statement {
    fn to_lean(&self) -> String {
        match self {
            Self::Identifier(x) => x.clone(),
            Self::Epsilon => "ε".into(),
            Self::ApplySequence { seq, index } => format!("{} {}", seq, index),
            Self::Arithmetic(l, op, r) => format!("{} {} {}", l.to_lean(), op.lean(), r.to_lean()),
            Self::AbsoluteDiff(l, r) => format!("|{} - {}|", l.to_lean(), r.to_lean()),
            Self::Inequality(l, op, r) => format!("{} {} {}", l.to_lean(), op.lean(), r.to_lean()),
            Self::Conjunction(l, r) => format!("{} ∧ {}", l.to_lean(), r.to_lean()),
            Self::RealValuedSequences(xs) => format!("{} : ℕ → ℝ", xs.join(" ")),
            Self::RealDeclaration(x) => format!("{} : ℝ", x),
            Self::NatDeclaration(x) => format!("{} : ℕ", x),
            Self::SequenceLimit { seq, limit } => format!("is_limit {} {}", seq, limit),
            Self::ComposedSequenceLimit { seqs, op, limits } => format!(
                "is_limit (λ n, {} n {op} {} n) ({} {op} {})",
                seqs.0,
                seqs.1,
                limits.0,
                limits.1,
                op = op.lean()
            ),
            Self::ForAll(x, s) => format!("∀ {}, {}", x, s.to_lean()),
            Self::ForAllNatIneqThen { var, bound, body } => {
                format!("∀ {} ≥ {}, {}", var, bound, body.to_lean())
            }
            Self::Exists(x, s) => format!("∃ {}, {}", x, s.to_lean()),
        }
    }

    fn to_natural(&self, in_math: bool) -> String {
        let math = |s: &Self| s.to_natural(true);
        let inner = match self {
            Self::Identifier(x) => x.clone(),
            Self::Epsilon => r"\epsilon".into(),
            Self::ApplySequence { seq, index } => format!("{}_{}", seq, index),
            Self::Arithmetic(l, op, r) => format!("{} {} {}", math(l), op.natural(), math(r)),
            Self::AbsoluteDiff(l, r) => {
                format!(r"\left\lvert {} - {}\right\rvert", math(l), math(r))
            }
            Self::Inequality(l, op, r) => format!("{} {} {}", math(l), op.natural(), math(r)),
            Self::Conjunction(l, r) => format!(r"{} \wedge {}", math(l), math(r)),
            Self::RealValuedSequences(xs) => {
                let seqs: Vec<_> = xs.iter().map(|x| format!("{}_n", x)).collect();
                return format!("{} are real-valued sequences", enclose(seqs.join(", "), in_math));
            }
            Self::RealDeclaration(x) => format!(r"{} \in \mathbb{{R}}", ident_to_natural(x)),
            Self::NatDeclaration(x) => format!(r"{} \in \mathbb{{N}}", x),
            Self::SequenceLimit { seq, limit } => format!(r"{}_n \rightarrow {}", seq, limit),
            Self::ComposedSequenceLimit { seqs, op, limits } => format!(
                r"\left({}_n {op} {}_n\right) \rightarrow {} {op} {}",
                seqs.0,
                seqs.1,
                limits.0,
                limits.1,
                op = op.natural()
            ),
            Self::ForAll(x, s) => format!(r"\forall {} : {}", x, math(s)),
            Self::ForAllNatIneqThen { var, bound, body } => {
                format!(r"\forall {} \geq {} : {}", var, bound, math(body))
            }
            Self::Exists(x, s) => format!(r"\exists {} : {}", x, math(s)),
        };
        enclose(inner, in_math)
    }

    fn match_natural(s: &str, ctx: &mut Context, in_math: bool) -> Option<Self> {
        natural(s, ctx, Kind::ALL, in_math)
    }

    fn from_lean(s: &str, ctx: &mut Context) -> Option<Self> {
        lean(s, ctx, Kind::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequences(names: &[&str]) -> Context {
        let mut ctx = Context::new();
        names.iter().for_each(|x| ctx.add(x, Class::Sequence));
        ctx
    }

    /// Check that a form matches both texts to the same statement,
    /// which renders back to the texts.
    fn bijective(kind: Kind, natural: &str, lean: &str, ctx: &Context) -> Statement {
        let (mut c1, mut c2) = (ctx.clone(), ctx.clone());
        let from_nat = kind.natural(natural, &mut c1, false).unwrap();
        let from_lean = kind.lean(lean, &mut c2).unwrap();
        assert_eq!(from_nat, from_lean);
        assert_eq!(c1, c2);
        assert_eq!(from_nat.to_natural(false), natural);
        assert_eq!(from_nat.to_lean(), lean);
        from_nat
    }

    #[test]
    fn declarations() {
        let ctx = Context::new();
        let s = bijective(
            Kind::RealValuedSequences,
            "$a_n, b_n, c_n$ are real-valued sequences",
            "a b c : ℕ → ℝ",
            &ctx,
        );
        let mut ctx2 = ctx.clone();
        Kind::RealValuedSequences.lean(&s.to_lean(), &mut ctx2);
        assert!(ctx2.is("b", Class::Sequence));

        bijective(Kind::RealDeclaration, r"$l \in \mathbb{R}$", "l : ℝ", &ctx);
        bijective(Kind::RealDeclaration, r"$\epsilon \in \mathbb{R}$", "ε : ℝ", &ctx);
        bijective(Kind::NatDeclaration, r"$N \in \mathbb{N}$", "N : ℕ", &ctx);
    }

    #[test]
    fn limits() {
        let ctx = Context::new();
        bijective(Kind::SequenceLimit, r"$a_n \rightarrow l$", "is_limit a l", &ctx);
        bijective(
            Kind::ComposedSequenceLimit,
            r"$\left(a_n + b_n\right) \rightarrow l + m$",
            "is_limit (λ n, a n + b n) (l + m)",
            &ctx,
        );
        let mixed = r"$\left(a_n + b_n\right) \rightarrow l \cdot m$";
        assert_eq!(Kind::ComposedSequenceLimit.natural(mixed, &mut ctx.clone(), false), None);
    }

    #[test]
    fn inequalities() {
        let ctx = Context::new();
        bijective(Kind::Inequality, "$a > b$", "a > b", &ctx);
        bijective(Kind::Inequality, r"$a \geq b$", "a ≥ b", &ctx);
        bijective(Kind::Inequality, "$a < b$", "a < b", &ctx);
        bijective(Kind::Inequality, r"$a \leq b$", "a ≤ b", &ctx);
        bijective(Kind::Inequality, r"$a + b \leq c \cdot d$", "a + b ≤ c * d", &ctx);

        let ctx = sequences(&["a", "b"]);
        bijective(Kind::Inequality, r"$a_n \leq b_n$", "a n ≤ b n", &ctx);
        bijective(
            Kind::Inequality,
            r"$\left\lvert a_n - b_n\right\rvert \leq n$",
            "|a n - b n| ≤ n",
            &ctx,
        );
        bijective(Kind::Conjunction, r"$a_n < b_n \wedge b_n < a_n$", "a n < b n ∧ b n < a n", &ctx);
    }

    #[test]
    fn absolute_diff() {
        let ctx = Context::new();
        bijective(Kind::AbsoluteDiff, r"$\left\lvert a - b\right\rvert$", "|a - b|", &ctx);
        // alternative notation
        let mut ctx = sequences(&["a", "b"]);
        let alt = Kind::AbsoluteDiff.natural(r"$\left|a_n - b_n \right|$", &mut ctx, false);
        assert_eq!(alt, Kind::AbsoluteDiff.lean("|a n - b n|", &mut ctx));
        assert!(alt.is_some());
        let ineq = Kind::Inequality.natural(r"$\left|a - b \right| \leq n$", &mut ctx, false);
        assert_eq!(ineq.map(|s| s.to_lean()), Some("|a - b| ≤ n".into()));
        // commands separated by preprocessing
        let spaced = crate::language::preprocess(r"$\left\lvert a_n - b_n\right\rvert$");
        assert_eq!(Kind::AbsoluteDiff.natural(&spaced, &mut ctx, false), alt);
        let limit = crate::language::preprocess(r"$\left(a_n + b_n\right) \rightarrow l + m$");
        let limit = Kind::ComposedSequenceLimit.natural(&limit, &mut ctx, false);
        assert_eq!(limit.map(|s| s.to_lean()), Some("is_limit (λ n, a n + b n) (l + m)".into()));
    }

    #[test]
    fn quantifiers() {
        let ctx = Context::new();
        bijective(Kind::ForAll, r"$\forall x : x < a$", "∀ x, x < a", &ctx);
        let ctx = sequences(&["b"]);
        bijective(
            Kind::Exists,
            r"$\exists N : \forall n \geq N : \left\lvert b_n - l\right\rvert < \epsilon$",
            "∃ N, ∀ n ≥ N, |b n - l| < ε",
            &ctx,
        );
    }

    #[test]
    fn sequence_ambiguity() {
        let mut ctx = sequences(&["a"]);
        let s = natural("$a_n$", &mut ctx, Kind::LEAVES, false);
        let seq = ("a".to_string(), "n".to_string());
        assert_eq!(s, Some(Statement::ApplySequence { seq: seq.0, index: seq.1 }));

        let mut ctx = Context::new();
        assert_eq!(Kind::ApplySequence.natural("$a_n$", &mut ctx, false), None);
        let s = natural("$a_n$", &mut ctx, Kind::LEAVES, false);
        assert_eq!(s, Some(Statement::Identifier("a_n".into())));
    }

    #[test]
    fn whole_strings() {
        let mut ctx = Context::new();
        assert_eq!(Kind::RealDeclaration.natural(r"so $l \in \mathbb{R}$", &mut ctx, false), None);
        assert_eq!(Kind::SequenceLimit.lean("is_limit a l b", &mut ctx), None);
        assert_eq!(Kind::Identifier.lean("a b", &mut ctx), None);
    }

    #[test]
    fn rename() {
        let ctx = sequences(&["b"]);
        let s = Kind::Exists.lean("∃ N, ∀ n ≥ N, |b n - l| < ε", &mut ctx.clone()).unwrap();
        let body = match s {
            Statement::Exists(x, body) => body.rename(&x, "M"),
            _ => panic!("expected existential"),
        };
        assert_eq!(body.to_lean(), "∀ n ≥ M, |b n - l| < ε");
        assert_eq!(body.rename("n", "m"), body);
    }
}
