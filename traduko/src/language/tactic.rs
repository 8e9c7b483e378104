//! Proof steps.

use super::sentences::{self, Ineq, Kind};
use super::{regex, Context, Language, Statement};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tactic {
    /// `Let $\epsilon$`, `intros ε A1`
    LetGoalLimit { ident: Statement, hyp: String },
    /// `Let's choose $N_a$ such that H1 uses $\epsilon$`, `cases H1 ε A1 with N_a A2`
    ChooseNEpsilonLimit {
        limit_def: String,
        eps: Statement,
        hyp_eps: String,
        n_chosen: String,
        hyp_n: String,
    },
    /// `Let $N = \max\left(N_a, N_c\right)$`, `let N := max N_a N_c`
    LetMax { ident: String, left: String, right: String },
    /// `We claim $N$ works`, `use N`
    Use(String),
    /// `By inequality properties, $N_a \leq N$`, `have A1 : N_a ≤ N := by obvious_ineq`
    ByInequalityProperties { hyp: String, sentence: Statement },
    /// `Let $n$`, `intros n A1`
    LetNInequality { ident: String, hyp: String },
    /// `$a_n \leq b_n$ by H1 with n`, `have A1 : a n ≤ b n := H1 n`
    BySentenceWith {
        hyp: String,
        sentence: Statement,
        by: String,
        with: String,
    },
    /// `Let's choose n in H1`, `have A1 := H1 n`
    LetsChooseIn { hyp: String, from: String, point: String },
    /// `Let's use absolute value inequality property on H1 and on goal`,
    /// `rw abs_sub_lt_iff at H1 ⊢`
    ///
    /// The goal is denoted by `goal`.
    AbsoluteValueIneqProperty(Vec<String>),
    /// `Let's separate H1`, `cases H1`
    Cases(String),
    /// `Let's split the goal`, `split`
    SplitGoal,
    /// `Let's split the goal and do on all subgoals`, `split;`
    DoAllSubgoals,
    /// `By linear arithmetic`, `linarith`
    LinearArithmetic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TacticKind {
    LetGoalLimit,
    ChooseNEpsilonLimit,
    LetMax,
    Use,
    ByInequalityProperties,
    LetNInequality,
    BySentenceWith,
    LetsChooseIn,
    AbsoluteValueIneqProperty,
    Cases,
    SplitGoal,
    DoAllSubgoals,
    LinearArithmetic,
}

impl TacticKind {
    /// Order in which proof lines are matched.
    pub const ALL: &'static [Self] = &[
        Self::DoAllSubgoals,
        Self::SplitGoal,
        Self::LetMax,
        Self::LetGoalLimit,
        Self::LetNInequality,
        Self::ChooseNEpsilonLimit,
        Self::LetsChooseIn,
        Self::Use,
        Self::ByInequalityProperties,
        Self::BySentenceWith,
        Self::AbsoluteValueIneqProperty,
        Self::Cases,
        Self::LinearArithmetic,
    ];

    /// Match a natural-language proof line as a tactic of this form.
    pub fn natural(self, s: &str, ctx: &mut Context) -> Option<Tactic> {
        use Tactic as T;
        match self {
            Self::LetGoalLimit => {
                let caps = regex!(r"Let \$(\\?\w+)\$").captures(s)?;
                if !matches!(ctx.current_goal, Some(Statement::SequenceLimit { .. })) {
                    return None;
                }
                let ident = identifier(sentences::natural(&caps[1], ctx, IDENTS, true)?)?;
                let hyp = ctx.next_anonymous();
                ctx.associate(&ident.to_lean(), &hyp);
                Some(T::LetGoalLimit { ident, hyp })
            }
            Self::ChooseNEpsilonLimit => {
                let re = regex!(r"Let's choose \$(\w+)\$ such that (\w+) uses \$(\\?\w+)\$");
                let caps = re.captures(s)?;
                let eps = identifier(sentences::natural(&caps[3], ctx, IDENTS, true)?)?;
                let hyp_eps = ctx.associate_of(&eps.to_lean())?.to_string();
                let (n_chosen, limit_def) = (caps[1].to_string(), caps[2].to_string());
                let hyp_n = ctx.next_anonymous();
                ctx.associate(&n_chosen, &hyp_n);
                Some(T::ChooseNEpsilonLimit { limit_def, eps, hyp_eps, n_chosen, hyp_n })
            }
            Self::LetMax => {
                let caps = regex!(r"Let \$(\w+) = \\max ?\\left\((\w+), (\w+) ?\\right\)\$").captures(s)?;
                let (ident, left, right) = (caps[1].into(), caps[2].into(), caps[3].into());
                Some(T::LetMax { ident, left, right })
            }
            Self::Use => {
                let caps = regex!(r"We claim \$(\w+)\$ works").captures(s)?;
                Some(T::Use(caps[1].into()))
            }
            Self::ByInequalityProperties => {
                let caps = regex!(r"By inequality properties, (.+)").captures(s)?;
                let sentence = Kind::Inequality.natural(&caps[1], ctx, false)?;
                let hyp = ctx.next_anonymous();
                Some(T::ByInequalityProperties { hyp, sentence })
            }
            Self::LetNInequality => {
                let caps = regex!(r"Let \$(\w+)\$").captures(s)?;
                if !matches!(ctx.current_goal, Some(Statement::ForAllNatIneqThen { .. })) {
                    return None;
                }
                let hyp = ctx.next_anonymous();
                Some(T::LetNInequality { ident: caps[1].into(), hyp })
            }
            Self::BySentenceWith => {
                let caps = regex!(r"(.+) by (\w+) with (\w+)").captures(s)?;
                let sentence = Kind::Inequality.natural(&caps[1], ctx, false)?;
                let hyp = ctx.next_anonymous();
                let (by, with) = (caps[2].into(), caps[3].into());
                Some(T::BySentenceWith { hyp, sentence, by, with })
            }
            Self::LetsChooseIn => {
                let caps = regex!(r"Let's choose (\w+) in (\w+)").captures(s)?;
                let hyp = ctx.next_anonymous();
                let (point, from) = (caps[1].into(), caps[2].into());
                Some(T::LetsChooseIn { hyp, from, point })
            }
            Self::AbsoluteValueIneqProperty => {
                let re = regex!(r"Let's use absolute value inequality property on((?: \w+)*) and on (\w+)");
                let caps = re.captures(s)?;
                let mut idents: Vec<String> = caps[1].split_whitespace().map(String::from).collect();
                idents.push(caps[2].into());
                Some(T::AbsoluteValueIneqProperty(idents))
            }
            Self::Cases => {
                let caps = regex!(r"Let's separate (\w+)").captures(s)?;
                Some(T::Cases(caps[1].into()))
            }
            Self::SplitGoal => (s == "Let's split the goal").then_some(T::SplitGoal),
            Self::DoAllSubgoals => {
                (s == "Let's split the goal and do on all subgoals").then_some(T::DoAllSubgoals)
            }
            Self::LinearArithmetic => (s == "By linear arithmetic").then_some(T::LinearArithmetic),
        }
    }

    /// Match a Lean proof line as a tactic of this form.
    pub fn lean(self, s: &str, ctx: &mut Context) -> Option<Tactic> {
        use Tactic as T;
        match self {
            Self::LetGoalLimit => {
                let caps = regex!(r"intros (\w+) (\w+)").captures(s)?;
                if !matches!(ctx.current_goal, Some(Statement::SequenceLimit { .. })) {
                    return None;
                }
                let ident = identifier(sentences::lean(&caps[1], ctx, IDENTS)?)?;
                let hyp = caps[2].to_string();
                ctx.observe_anonymous(&hyp);
                ctx.associate(&ident.to_lean(), &hyp);
                Some(T::LetGoalLimit { ident, hyp })
            }
            Self::ChooseNEpsilonLimit => {
                let caps = regex!(r"cases (\w+) (\w+) (\w+) with (\w+) (\w+)").captures(s)?;
                let eps = identifier(sentences::lean(&caps[2], ctx, IDENTS)?)?;
                let limit_def = caps[1].to_string();
                let (hyp_eps, n_chosen, hyp_n) = (caps[3].to_string(), caps[4].to_string(), caps[5].to_string());
                ctx.observe_anonymous(&hyp_eps);
                ctx.observe_anonymous(&hyp_n);
                ctx.associate(&n_chosen, &hyp_n);
                Some(T::ChooseNEpsilonLimit { limit_def, eps, hyp_eps, n_chosen, hyp_n })
            }
            Self::LetMax => {
                let caps = regex!(r"let (\w+) := max (\w+) (\w+)").captures(s)?;
                let (ident, left, right) = (caps[1].into(), caps[2].into(), caps[3].into());
                Some(T::LetMax { ident, left, right })
            }
            Self::Use => {
                let caps = regex!(r"use (\w+)").captures(s)?;
                Some(T::Use(caps[1].into()))
            }
            Self::ByInequalityProperties => {
                let caps = regex!(r"have (\w+) : (.+) := by obvious_ineq").captures(s)?;
                let sentence = Kind::Inequality.lean(&caps[2], ctx)?;
                let hyp = caps[1].to_string();
                ctx.observe_anonymous(&hyp);
                Some(T::ByInequalityProperties { hyp, sentence })
            }
            Self::LetNInequality => {
                let caps = regex!(r"intros (\w+) (\w+)").captures(s)?;
                if !matches!(ctx.current_goal, Some(Statement::ForAllNatIneqThen { .. })) {
                    return None;
                }
                let hyp = caps[2].to_string();
                ctx.observe_anonymous(&hyp);
                Some(T::LetNInequality { ident: caps[1].into(), hyp })
            }
            Self::BySentenceWith => {
                let caps = regex!(r"have (\w+) : (.+) := (\w+) (\w+)").captures(s)?;
                // `by obvious_ineq` is a justification, not a hypothesis
                if &caps[3] == "by" {
                    return None;
                }
                let sentence = Kind::Inequality.lean(&caps[2], ctx)?;
                let hyp = caps[1].to_string();
                ctx.observe_anonymous(&hyp);
                let (by, with) = (caps[3].into(), caps[4].into());
                Some(T::BySentenceWith { hyp, sentence, by, with })
            }
            Self::LetsChooseIn => {
                let caps = regex!(r"have (\w+) := (\w+) (\w+)").captures(s)?;
                let hyp = caps[1].to_string();
                ctx.observe_anonymous(&hyp);
                let (from, point) = (caps[2].into(), caps[3].into());
                Some(T::LetsChooseIn { hyp, from, point })
            }
            Self::AbsoluteValueIneqProperty => {
                let caps = regex!(r"rw abs_sub_lt_iff at((?: (?:\w+|⊢))+)").captures(s)?;
                let idents = caps[1].split_whitespace();
                let idents = idents.map(|x| if x == "⊢" { "goal" } else { x });
                Some(T::AbsoluteValueIneqProperty(idents.map(String::from).collect()))
            }
            Self::Cases => {
                let caps = regex!(r"cases (\w+)").captures(s)?;
                Some(T::Cases(caps[1].into()))
            }
            Self::SplitGoal => (s == "split").then_some(T::SplitGoal),
            Self::DoAllSubgoals => (s == "split;").then_some(T::DoAllSubgoals),
            Self::LinearArithmetic => (s == "linarith").then_some(T::LinearArithmetic),
        }
    }
}

/// Forms of the identifiers introduced by tactics.
const IDENTS: &[Kind] = &[Kind::Epsilon, Kind::Identifier];

fn identifier(s: Statement) -> Option<Statement> {
    matches!(s, Statement::Epsilon | Statement::Identifier(_)).then_some(s)
}

impl Tactic {
    /// Names that this tactic introduces and whose types are shown in the proof state.
    pub fn to_extract(&self) -> Vec<String> {
        match self {
            Self::LetGoalLimit { hyp, .. }
            | Self::ByInequalityProperties { hyp, .. }
            | Self::BySentenceWith { hyp, .. }
            | Self::LetsChooseIn { hyp, .. } => vec![hyp.clone()],
            Self::ChooseNEpsilonLimit { hyp_n, .. } => vec![hyp_n.clone()],
            Self::LetNInequality { ident, hyp } => vec![ident.clone(), hyp.clone()],
            Self::LetMax { ident, .. } => vec![ident.clone()],
            Self::AbsoluteValueIneqProperty(idents) => {
                idents.iter().filter(|x| *x != "goal").cloned().collect()
            }
            Self::Use(_) | Self::Cases(_) | Self::SplitGoal | Self::DoAllSubgoals | Self::LinearArithmetic => {
                Vec::new()
            }
        }
    }

    /// Punctuation that ends the tactic in a Lean proof.
    pub fn terminator(&self) -> &'static str {
        match self {
            Self::DoAllSubgoals => "",
            _ => ",",
        }
    }

    /// The goal after applying the tactic to `goal`.
    ///
    /// Returns `None` if the tactic leaves the goal unchanged.
    pub fn next_goal(&self, goal: &Statement) -> Option<Statement> {
        use Statement as S;
        match (self, goal) {
            (Self::LetGoalLimit { ident, .. }, S::SequenceLimit { seq, limit }) => {
                let seq = S::ApplySequence { seq: seq.clone(), index: "n".into() };
                let diff = S::AbsoluteDiff(Box::new(seq), Box::new(S::Identifier(limit.clone())));
                let body = S::Inequality(Box::new(diff), Ineq::Lt, Box::new(ident.clone()));
                let var = "n".to_string();
                let bound = "N".to_string();
                let forall = S::ForAllNatIneqThen { var, bound, body: Box::new(body) };
                Some(S::Exists("N".into(), Box::new(forall)))
            }
            (Self::Use(x), S::Exists(y, body)) => Some(body.rename(y, x)),
            (Self::LetNInequality { ident, .. }, S::ForAllNatIneqThen { var, body, .. }) => {
                Some(body.rename(var, ident))
            }
            _ => None,
        }
    }
}

impl Language for Tactic {
    fn to_lean(&self) -> String {
        match self {
            Self::LetGoalLimit { ident, hyp } => format!("intros {} {}", ident.to_lean(), hyp),
            Self::ChooseNEpsilonLimit { limit_def, eps, hyp_eps, n_chosen, hyp_n } => format!(
                "cases {} {} {} with {} {}",
                limit_def,
                eps.to_lean(),
                hyp_eps,
                n_chosen,
                hyp_n
            ),
            Self::LetMax { ident, left, right } => format!("let {} := max {} {}", ident, left, right),
            Self::Use(x) => format!("use {}", x),
            Self::ByInequalityProperties { hyp, sentence } => {
                format!("have {} : {} := by obvious_ineq", hyp, sentence.to_lean())
            }
            Self::LetNInequality { ident, hyp } => format!("intros {} {}", ident, hyp),
            Self::BySentenceWith { hyp, sentence, by, with } => {
                format!("have {} : {} := {} {}", hyp, sentence.to_lean(), by, with)
            }
            Self::LetsChooseIn { hyp, from, point } => format!("have {} := {} {}", hyp, from, point),
            Self::AbsoluteValueIneqProperty(idents) => {
                let idents = idents.iter().map(|x| if x == "goal" { "⊢" } else { x });
                format!("rw abs_sub_lt_iff at {}", idents.collect::<Vec<_>>().join(" "))
            }
            Self::Cases(x) => format!("cases {}", x),
            Self::SplitGoal => "split".into(),
            Self::DoAllSubgoals => "split;".into(),
            Self::LinearArithmetic => "linarith".into(),
        }
    }

    fn to_natural(&self, _in_math: bool) -> String {
        match self {
            Self::LetGoalLimit { ident, .. } => format!("Let {}", ident.to_natural(false)),
            Self::ChooseNEpsilonLimit { limit_def, eps, n_chosen, .. } => format!(
                "Let's choose ${}$ such that {} uses {}",
                n_chosen,
                limit_def,
                eps.to_natural(false)
            ),
            Self::LetMax { ident, left, right } => {
                format!(r"Let ${} = \max\left({}, {}\right)$", ident, left, right)
            }
            Self::Use(x) => format!("We claim ${}$ works", x),
            Self::ByInequalityProperties { sentence, .. } => {
                format!("By inequality properties, {}", sentence.to_natural(false))
            }
            Self::LetNInequality { ident, .. } => format!("Let ${}$", ident),
            Self::BySentenceWith { sentence, by, with, .. } => {
                format!("{} by {} with {}", sentence.to_natural(false), by, with)
            }
            Self::LetsChooseIn { from, point, .. } => format!("Let's choose {} in {}", point, from),
            Self::AbsoluteValueIneqProperty(idents) => {
                let (last, firsts) = match idents.split_last() {
                    Some((last, firsts)) => (last.as_str(), firsts.join(" ")),
                    None => ("goal", String::new()),
                };
                let on = "Let's use absolute value inequality property on";
                if firsts.is_empty() {
                    format!("{} and on {}", on, last)
                } else {
                    format!("{} {} and on {}", on, firsts, last)
                }
            }
            Self::Cases(x) => format!("Let's separate {}", x),
            Self::SplitGoal => "Let's split the goal".into(),
            Self::DoAllSubgoals => "Let's split the goal and do on all subgoals".into(),
            Self::LinearArithmetic => "By linear arithmetic".into(),
        }
    }

    fn match_natural(s: &str, ctx: &mut Context, _in_math: bool) -> Option<Self> {
        TacticKind::ALL.iter().find_map(|k| {
            let t = k.natural(s, ctx)?;
            log::debug!("{:?} matches \"{}\"", k, s);
            Some(t)
        })
    }

    fn from_lean(s: &str, ctx: &mut Context) -> Option<Self> {
        TacticKind::ALL.iter().find_map(|k| {
            let t = k.lean(s, ctx)?;
            log::debug!("{:?} matches \"{}\"", k, s);
            Some(t)
        })
    }
}
