//! Theorem sessions.

use super::feedback::{extract_error, extract_goals, extract_variable, is_accomplished};
use super::feedback::{goal_to_natural, variable_to_natural};
use super::sentences::{self, Kind};
use super::{preprocess, Context, Error, Language, Statement, Tactic};
use crate::lean::{LeanServer, Response};

const HEADER: &str = "import data.real.basic
import tactic

notation `|`x`|` := abs x

def is_limit (a : ℕ → ℝ) (l : ℝ) : Prop :=
∀ ε > 0, ∃ N, ∀ n ≥ N, |a n - l| < ε
";

/// Theorem built from natural-language hypotheses, goal, and proof lines.
///
/// Every operation either succeeds completely or leaves the session unchanged.
#[derive(Clone, Debug, Default)]
pub struct Manager {
    pub theorem_name: String,
    context: Context,
    hypotheses: Vec<Statement>,
    goal: Option<Statement>,
    /// context after setting the goal
    initial_context: Context,
    proof: Vec<Tactic>,
    /// context after every proof line
    contexts: Vec<Context>,
    /// identifiers introduced by every proof line
    to_extract: Vec<Vec<String>>,
}

/// Lean text of a theorem, and the lines at which proof states are requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendering {
    pub text: String,
    /// 1-based line numbers of `begin` and of every proof line
    pub lines: Vec<usize>,
}

/// Step of a proof that an output line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// the state before the first proof line
    Initial,
    Proof(usize),
}

impl Rendering {
    pub fn step(&self, line: usize) -> Option<Step> {
        let i = self.lines.iter().position(|l| *l == line)?;
        Some(if i == 0 { Step::Initial } else { Step::Proof(i - 1) })
    }
}

/// Natural-language view of the proof states of a theorem.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feedback {
    pub hypotheses_ident: Vec<Option<String>>,
    pub initial_goal: String,
    /// goal after every proof line, empty if there is none
    pub goals: Vec<String>,
    /// identifiers introduced by every proof line, with their natural-language types
    pub sentences: Vec<Vec<(String, String)>>,
    pub error: Option<String>,
}

impl Manager {
    pub fn new(theorem_name: &str) -> Self {
        Self {
            theorem_name: theorem_name.to_string(),
            ..Self::default()
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn hypotheses(&self) -> &[Statement] {
        &self.hypotheses
    }

    pub fn goal(&self) -> Option<&Statement> {
        self.goal.as_ref()
    }

    pub fn proof(&self) -> &[Tactic] {
        &self.proof
    }

    pub fn add_hypothesis(&mut self, text: &str) -> Result<(), Error> {
        let text = preprocess(text);
        let mut ctx = self.context.clone();
        let hyp = sentences::natural(&text, &mut ctx, Kind::HYPOTHESES, false)
            .ok_or_else(|| Error::UnrecognizedHypothesis(text.clone()))?;
        log::info!("Hypothesis: {}", hyp.to_lean());
        self.hypotheses.push(hyp);
        self.context = ctx;
        Ok(())
    }

    pub fn set_initial_goal(&mut self, text: &str) -> Result<(), Error> {
        let text = preprocess(text);
        let mut ctx = self.context.clone();
        let goal = sentences::natural(&text, &mut ctx, Kind::GOALS, false)
            .ok_or_else(|| Error::UnrecognizedGoal(text.clone()))?;
        log::info!("Goal: {}", goal.to_lean());
        ctx.current_goal = Some(goal.clone());
        self.goal = Some(goal);
        self.initial_context = ctx.clone();
        self.context = ctx;
        Ok(())
    }

    pub fn add_proof_line(&mut self, text: &str) -> Result<(), Error> {
        if self.goal.is_none() {
            return Err(Error::NoGoal);
        }
        let text = preprocess(text);
        let mut ctx = self.context.clone();
        let tactic = Tactic::from_natural(&text, &mut ctx)
            .ok_or_else(|| Error::UnrecognizedTactic(text.clone()))?;
        log::info!("Proof line: {}", tactic.to_lean());
        let next = ctx.current_goal.as_ref().and_then(|g| tactic.next_goal(g));
        if let Some(goal) = next {
            log::debug!("Next goal: {}", goal.to_lean());
            ctx.current_goal = Some(goal);
        }
        self.to_extract.push(tactic.to_extract());
        self.contexts.push(ctx.clone());
        self.proof.push(tactic);
        self.context = ctx;
        Ok(())
    }

    /// Names of hypotheses in the theorem; declarations are unnamed.
    pub fn ident_hypotheses(&self) -> Vec<Option<String>> {
        let mut n = 0;
        let name = |h: &Statement| {
            (!h.is_declaration()).then(|| {
                n += 1;
                format!("H{}", n)
            })
        };
        self.hypotheses.iter().map(name).collect()
    }

    /// Render the theorem to Lean.
    pub fn render(&self) -> Result<Rendering, Error> {
        let goal = self.goal.as_ref().ok_or(Error::NoGoal)?;
        let mut out: Vec<String> = HEADER.lines().map(String::from).collect();
        out.push(String::new());
        out.push(format!("theorem {}", self.theorem_name));
        let idents = self.ident_hypotheses();
        for (hyp, ident) in self.hypotheses.iter().zip(idents) {
            match ident {
                Some(ident) => out.push(format!("  ({} : {})", ident, hyp.to_lean())),
                None => out.push(format!("  ({})", hyp.to_lean())),
            }
        }
        out.push(format!("  : {} :=", goal.to_lean()));

        out.push("begin".into());
        let mut lines = vec![out.len()];
        for tactic in &self.proof {
            out.push(format!("  {}{}", tactic.to_lean(), tactic.terminator()));
            lines.push(out.len());
        }
        out.push("end".into());

        let mut text = out.join("\n");
        text.push('\n');
        Ok(Rendering { text, lines })
    }

    /// Translate the proof states of the rendered theorem to natural language.
    ///
    /// The states are expected at the lines given by [`Manager::render`].
    pub fn feedback(&self, response: &Response) -> Feedback {
        let goals = extract_goals(&response.states);
        let to_natural = |goal: &Option<String>, ctx: &Context| match goal {
            Some(g) => goal_to_natural(g, ctx).unwrap_or_else(|| g.clone()),
            None => String::new(),
        };
        let initial_goal = goals.first().map_or_else(String::new, |g| to_natural(g, &self.initial_context));

        let after = || self.contexts.iter().zip(&self.to_extract);
        let goals: Vec<_> = goals.iter().skip(1).zip(after()).map(|(g, (ctx, _))| to_natural(g, ctx)).collect();

        let states = response.states.iter().skip(1);
        let sentences = states.zip(after()).map(|(state, (ctx, idents))| {
            let sentence = |ident: &String| {
                let ty = extract_variable(state, ident)?;
                Some((ident.clone(), variable_to_natural(ident, &ty, ctx)?))
            };
            idents.iter().filter_map(sentence).collect::<Vec<_>>()
        });
        let sentences = sentences.collect();

        let error = match &response.error {
            Some(err) => Some(extract_error(err)),
            None => {
                let accomplished = response.states.last().map_or(false, |s| is_accomplished(s));
                let done = goals.last().map_or(false, |g| g.is_empty()) && accomplished;
                done.then(|| "goals accomplished".to_string())
            }
        };

        Feedback {
            hypotheses_ident: self.ident_hypotheses(),
            initial_goal,
            goals,
            sentences,
            error,
        }
    }

    /// Check the theorem with Lean and translate the proof states.
    pub fn ask(&self, server: &mut impl LeanServer) -> Result<Feedback, crate::Error> {
        let rendering = self.render()?;
        let response = server.states(&rendering.text, &rendering.lines)?;
        Ok(self.feedback(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lean;

    fn sandwich(proof: &[&str]) -> Manager {
        let mut m = Manager::new("sandwich");
        m.add_hypothesis("$a_n, b_n, c_n$ are real-valued sequences").unwrap();
        m.add_hypothesis(r"$l \in \mathbb{R}$").unwrap();
        m.add_hypothesis(r"$a_n \rightarrow l$").unwrap();
        m.add_hypothesis(r"$c_n \rightarrow l$").unwrap();
        m.add_hypothesis(r"$\forall n : a_n \leq b_n$").unwrap();
        m.add_hypothesis(r"$\forall n : b_n \leq c_n$").unwrap();
        m.set_initial_goal(r"$b_n \rightarrow l$").unwrap();
        proof.iter().for_each(|line| m.add_proof_line(line).unwrap());
        m
    }

    const PROOF: [&str; 2] = [r"Let $\epsilon$", r"Let's choose $N_a$ such that H1 uses $\epsilon$"];

    /// Answers with fixed proof states.
    struct Replay(Response, Vec<usize>);

    impl LeanServer for Replay {
        fn states(&mut self, _text: &str, lines: &[usize]) -> Result<Response, lean::Error> {
            self.1 = lines.to_vec();
            Ok(self.0.clone())
        }
    }

    struct Stuck;

    impl LeanServer for Stuck {
        fn states(&mut self, _text: &str, _lines: &[usize]) -> Result<Response, lean::Error> {
            Err(lean::Error::Timeout(lean::TIMEOUT))
        }
    }

    #[test]
    fn hypotheses() {
        let m = sandwich(&[]);
        let expected = [None, None, Some("H1"), Some("H2"), Some("H3"), Some("H4")];
        let expected: Vec<_> = expected.iter().map(|h| h.map(String::from)).collect();
        assert_eq!(m.ident_hypotheses(), expected);
    }

    #[test]
    fn render() {
        let r = sandwich(&PROOF).render().unwrap();
        let expected = format!(
            "{}\ntheorem sandwich
  (a b c : ℕ → ℝ)
  (l : ℝ)
  (H1 : is_limit a l)
  (H2 : is_limit c l)
  (H3 : ∀ n, a n ≤ b n)
  (H4 : ∀ n, b n ≤ c n)
  : is_limit b l :=
begin
  intros ε A1,
  cases H1 ε A1 with N_a A2,
end
",
            HEADER
        );
        assert_eq!(r.text, expected);
        assert_eq!(r.lines, vec![17, 18, 19]);
        assert_eq!(r.text.lines().nth(16), Some("begin"));
        assert_eq!(r.step(17), Some(Step::Initial));
        assert_eq!(r.step(19), Some(Step::Proof(1)));
        assert_eq!(r.step(20), None);
    }

    #[test]
    fn subgoals() {
        let mut m = sandwich(&[]);
        m.add_proof_line("Let's split the goal and do on all subgoals").unwrap();
        m.add_proof_line("By linear arithmetic").unwrap();
        let text = m.render().unwrap().text;
        assert!(text.ends_with("begin\n  split;\n  linarith,\nend\n"));
    }

    #[test]
    fn rejected() {
        let mut m = Manager::new("t");
        assert_eq!(m.add_proof_line("By linear arithmetic"), Err(Error::NoGoal));
        m.add_hypothesis("$a_n$ are real-valued sequences").unwrap();
        let ctx = m.context().clone();
        let err = m.add_hypothesis("  some   text ");
        assert_eq!(err, Err(Error::UnrecognizedHypothesis("some text".into())));
        assert_eq!(m.set_initial_goal("$a_n$"), Err(Error::UnrecognizedGoal("$a_n$".into())));
        assert_eq!(m.context(), &ctx);
        assert_eq!(m.hypotheses().len(), 1);
        assert!(m.render().is_err());
    }

    #[test]
    fn ask() {
        let m = sandwich(&PROOF);
        let context = "a b c : ℕ → ℝ\nl : ℝ\nH1 : is_limit a l\nH2 : is_limit c l";
        let states = vec![
            format!("{}\n⊢ is_limit b l", context),
            format!("{}\nε : ℝ\nA1 : ε > 0\n⊢ ∃ (N : ℕ), ∀ (n : ℕ), n ≥ N → |b n - l| < ε", context),
            format!(
                "{}\nε : ℝ\nA1 : ε > 0\nN_a : ℕ\nA2 : ∀ (n : ℕ), n ≥ N_a →\n  |a n - l| < ε\n⊢ ∃ (N : ℕ), ∀ (n : ℕ), n ≥ N → |b n - l| < ε",
                context
            ),
        ];
        let mut server = Replay(Response { states, error: None }, Vec::new());
        let fb = m.ask(&mut server).unwrap();
        assert_eq!(server.1, vec![17, 18, 19]);

        assert_eq!(fb.initial_goal, r"$b_n \rightarrow l$");
        let goal = r"$\exists N : \forall n \geq N : \left\lvert b_n - l\right\rvert < \epsilon$";
        assert_eq!(fb.goals, vec![goal.to_string(), goal.to_string()]);
        let a1 = ("A1".to_string(), r"$\epsilon > 0$".to_string());
        let a2 = r"$\forall n \geq N_a : \left\lvert a_n - l\right\rvert < \epsilon$";
        assert_eq!(fb.sentences, vec![vec![a1], vec![("A2".to_string(), a2.to_string())]]);
        assert_eq!(fb.error, None);

        assert!(matches!(m.ask(&mut Stuck), Err(crate::Error::Lean(_))));
    }

    #[test]
    fn accomplished() {
        let m = sandwich(&["By linear arithmetic"]);
        let states = vec!["⊢ is_limit b l".to_string(), "no goals".to_string()];
        let fb = m.feedback(&Response { states, error: None });
        assert_eq!(fb.goals, vec![String::new()]);
        assert_eq!(fb.error.as_deref(), Some("goals accomplished"));

        let error = Some("linarith failed\nstate:\n⊢ is_limit b l".to_string());
        let fb = m.feedback(&Response { states: vec![String::new(); 2], error });
        assert_eq!(fb.error.as_deref(), Some("linarith failed"));
    }
}
