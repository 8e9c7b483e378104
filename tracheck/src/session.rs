//! Theorems given in natural language.

use serde::{Deserialize, Serialize};
use traduko::language::{Feedback, Manager};

#[derive(Deserialize)]
pub struct Theorem {
    pub name: String,
    pub hypotheses: Vec<String>,
    pub goal: String,
    #[serde(default)]
    pub proof: Vec<String>,
}

#[derive(Serialize)]
struct Sentence<'a> {
    ident: &'a str,
    sentence: &'a str,
}

/// JSON view of feedback.
#[derive(Serialize)]
pub struct State<'a> {
    hypotheses_ident: &'a [Option<String>],
    initial_goal: &'a str,
    goals: &'a [String],
    sentences: Vec<Vec<Sentence<'a>>>,
    error: Option<&'a str>,
}

impl Theorem {
    pub fn manager(&self) -> Result<Manager, traduko::language::Error> {
        let mut m = Manager::new(&self.name);
        self.hypotheses.iter().try_for_each(|h| m.add_hypothesis(h))?;
        m.set_initial_goal(&self.goal)?;
        self.proof.iter().try_for_each(|line| m.add_proof_line(line))?;
        Ok(m)
    }
}

impl<'a> From<&'a Feedback> for State<'a> {
    fn from(fb: &'a Feedback) -> Self {
        let sentence = |(ident, sentence): &'a (String, String)| Sentence { ident, sentence };
        let sentences = fb.sentences.iter().map(|s| s.iter().map(sentence).collect::<Vec<_>>());
        Self {
            hypotheses_ident: &fb.hypotheses_ident,
            initial_goal: &fb.initial_goal,
            goals: &fb.goals,
            sentences: sentences.collect(),
            error: fb.error.as_deref(),
        }
    }
}

#[test]
fn theorem() {
    let json = r#"{
        "name": "limit",
        "hypotheses": ["$a_n$ are real-valued sequences", "$a_n \\rightarrow l$"],
        "goal": "$a_n \\rightarrow l$"
    }"#;
    let thm: Theorem = serde_json::from_str(json).unwrap();
    let m = thm.manager().unwrap();
    assert_eq!(m.ident_hypotheses(), [None, Some("H1".to_string())]);
    assert!(m.proof().is_empty());

    let fb = Feedback {
        hypotheses_ident: m.ident_hypotheses(),
        sentences: vec![vec![("A1".into(), r"$\epsilon > 0$".into())]],
        ..Feedback::default()
    };
    let state = serde_json::to_value(State::from(&fb)).unwrap();
    assert_eq!(state["hypotheses_ident"][1], "H1");
    assert_eq!(state["sentences"][0][0]["ident"], "A1");
    assert!(state["error"].is_null());
}
