//! Reading proof states returned by Lean.
//!
//! A proof state lists the local context, one `names : type` entry per line,
//! followed by the goal after `⊢ `.
//! Long entries are continued on indented lines.

use super::sentences::{self, Kind};
use super::{regex, Context, Language, Statement};

/// Entries of a proof state, with continuation lines joined.
fn entries(state: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for line in state.lines() {
        match out.last_mut() {
            Some(last) if line.starts_with(char::is_whitespace) => {
                last.push(' ');
                last.push_str(line.trim());
            }
            _ => out.push(line.trim().to_string()),
        }
    }
    out
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return the goal of a proof state.
///
/// ~~~
/// # use traduko::language::extract_goal;
/// let state = "l : ℝ\nH1 : is_limit a l\n⊢ is_limit b\n    l";
/// assert_eq!(extract_goal(state).as_deref(), Some("is_limit b l"));
/// assert_eq!(extract_goal("no goals"), None);
/// ~~~
pub fn extract_goal(state: &str) -> Option<String> {
    let (_, goal) = state.rsplit_once("⊢ ")?;
    Some(collapse(goal))
}

pub fn extract_goals(states: &[String]) -> Vec<Option<String>> {
    states.iter().map(|s| extract_goal(s)).collect()
}

/// Return the type of an identifier in the local context of a proof state.
pub fn extract_variable(state: &str, ident: &str) -> Option<String> {
    entries(state).into_iter().find_map(|entry| {
        if entry.starts_with("⊢") {
            return None;
        }
        let (names, ty) = entry.split_once(" : ")?;
        names.split_whitespace().any(|n| n == ident).then(|| collapse(ty))
    })
}

/// Return the part of an error message before the proof state.
pub fn extract_error(err: &str) -> String {
    let lines = err.lines().take_while(|l| !regex!(search r"\bstate\b").is_match(l));
    lines.collect::<Vec<_>>().join("\n").trim().to_string()
}

pub fn is_accomplished(state: &str) -> bool {
    let state = state.trim();
    state.is_empty() || state == "no goals"
}

/// Remove type ascriptions that Lean prints in binders.
///
/// ~~~
/// # use traduko::language::normalize_lean;
/// let goal = "∃ (N : ℕ), ∀ (n : ℕ), n ≥ N → |b n - l| < ε";
/// assert_eq!(normalize_lean(goal), "∃ N, ∀ n ≥ N, |b n - l| < ε");
/// ~~~
pub fn normalize_lean(s: &str) -> String {
    let s = collapse(s);
    let nat_bound = regex!(search r"∀ \((\w+) : ℕ\), (\w+) ≥ (\w+) →");
    let s = nat_bound.replace_all(&s, |caps: &regex::Captures| {
        if caps[1] == caps[2] {
            format!("∀ {} ≥ {},", &caps[1], &caps[3])
        } else {
            caps[0].to_string()
        }
    });
    let binder = regex!(search r"([∀∃]) \((\w+) : [^()]+\),");
    binder.replace_all(&s, "$1 $2,").into_owned()
}

/// Translate a goal from a proof state to natural language.
pub fn goal_to_natural(goal: &str, ctx: &Context) -> Option<String> {
    let goal = normalize_lean(goal);
    let s = sentences::lean(&goal, &mut ctx.clone(), Kind::FEEDBACK);
    if s.is_none() {
        log::warn!("cannot translate goal \"{}\"", goal);
    }
    Some(s?.to_natural(false))
}

/// Translate the type of an identifier from a proof state to natural language.
///
/// Identifiers of type `ℝ`, `ℕ`, or `ℕ → ℝ` are rendered as declarations.
pub fn variable_to_natural(ident: &str, ty: &str, ctx: &Context) -> Option<String> {
    let decl = match ty.trim() {
        "ℝ" => Statement::RealDeclaration(ident.into()),
        "ℕ" => Statement::NatDeclaration(ident.into()),
        "ℕ → ℝ" => Statement::RealValuedSequences(vec![ident.into()]),
        _ => return goal_to_natural(ty, ctx),
    };
    Some(decl.to_natural(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Class;

    const STATE: &str = "a b c : ℕ → ℝ
l ε : ℝ
H1 : is_limit a l
A1 : ε > 0
N_a : ℕ
A2 : ∀ (n : ℕ), n ≥ N_a →
  |a n - l| < ε
⊢ ∃ (N : ℕ), ∀ (n : ℕ), n ≥ N → |b n - l| < ε";

    #[test]
    fn variables() {
        assert_eq!(extract_variable(STATE, "b").as_deref(), Some("ℕ → ℝ"));
        assert_eq!(extract_variable(STATE, "A1").as_deref(), Some("ε > 0"));
        let a2 = "∀ (n : ℕ), n ≥ N_a → |a n - l| < ε";
        assert_eq!(extract_variable(STATE, "A2").as_deref(), Some(a2));
        assert_eq!(extract_variable(STATE, "A3"), None);
    }

    #[test]
    fn goals() {
        let states = vec![STATE.to_string(), "no goals".to_string()];
        let goals = extract_goals(&states);
        let goal = "∃ (N : ℕ), ∀ (n : ℕ), n ≥ N → |b n - l| < ε";
        assert_eq!(goals, vec![Some(goal.to_string()), None]);
        assert!(!is_accomplished(STATE));
        assert!(is_accomplished("  no goals\n"));
        assert!(is_accomplished(""));
    }

    #[test]
    fn errors() {
        let err = "linarith failed\nstate:\n⊢ false";
        assert_eq!(extract_error(err), "linarith failed");
        assert_eq!(extract_error("  unknown identifier 'x'\n"), "unknown identifier 'x'");
        let err = "type mismatch, term restated\nas H1\nstate:\n⊢ false";
        assert_eq!(extract_error(err), "type mismatch, term restated\nas H1");
    }

    #[test]
    fn natural() {
        let mut ctx = Context::new();
        ctx.add("a", Class::Sequence);
        ctx.add("b", Class::Sequence);
        let goal = extract_goal(STATE).unwrap();
        let expected = r"$\exists N : \forall n \geq N : \left\lvert b_n - l\right\rvert < \epsilon$";
        assert_eq!(goal_to_natural(&goal, &ctx).as_deref(), Some(expected));

        let a2 = extract_variable(STATE, "A2").unwrap();
        let expected = r"$\forall n \geq N_a : \left\lvert a_n - l\right\rvert < \epsilon$";
        assert_eq!(variable_to_natural("A2", &a2, &ctx).as_deref(), Some(expected));
        let expected = r"$N_a \in \mathbb{N}$";
        assert_eq!(variable_to_natural("N_a", "ℕ", &ctx).as_deref(), Some(expected));
        assert_eq!(goal_to_natural("x = y", &ctx), None);
    }
}
