//! Proof trees stored as JSON.

use serde::Deserialize;
use traduko::grammar::{Sentence, Term};
use traduko::proof::{self, Antecedent, Justification, Proof};
use traduko::rules::Rule;

#[derive(Deserialize)]
#[serde(untagged)]
pub enum Ant {
    Path(Vec<usize>),
    Sentence(String),
}

#[derive(Deserialize)]
pub struct Node {
    sentence: String,
    rule: Option<String>,
    #[serde(default)]
    antecedents: Vec<Ant>,
    /// terms given to the rule
    #[serde(default)]
    args: Vec<String>,
    /// names that are variables in the terms given to the rule
    #[serde(default)]
    variables: Vec<String>,
    #[serde(default)]
    children: Vec<Node>,
}

impl Node {
    fn justification(&self) -> Result<Option<Justification>, traduko::Error> {
        let rule = match &self.rule {
            Some(rule) => rule.parse::<Rule>()?,
            None => return Ok(None),
        };
        let ant = |a: &Ant| match a {
            Ant::Path(p) => Ok(Antecedent::Path(p.clone())),
            Ant::Sentence(s) => Ok(Antecedent::Sentence(Sentence::parse(s)?)),
        };
        let antecedents = self.antecedents.iter().map(ant).collect::<Result<_, traduko::Error>>()?;
        let bound: Vec<&str> = self.variables.iter().map(|v| v.as_str()).collect();
        let args = self.args.iter().map(|a| Term::parse(a, &bound)).collect::<Result<_, _>>()?;
        Ok(Some(Justification { rule, antecedents, args }))
    }

    /// Add the children of the node to the proof, then justify the node.
    fn build(&self, proof: &mut Proof, path: &[usize]) -> Result<(), traduko::Error> {
        for child in &self.children {
            let cpath = proof.insert_child(Sentence::parse(&child.sentence)?, path)?;
            child.build(proof, &cpath)?;
        }
        if let Some(j) = self.justification()? {
            proof.justify(path, j)?;
        }
        Ok(())
    }

    pub fn proof(&self) -> Result<Proof, traduko::Error> {
        let mut proof = Proof::new(Sentence::parse(&self.sentence)?);
        self.build(&mut proof, &[])?;
        Ok(proof)
    }
}

/// Return the reasons why nodes of a proof are invalid.
pub fn errors(proof: &Proof) -> Vec<proof::Error> {
    let mut out = Vec::new();
    let mut todo = vec![Vec::new()];
    while let Some(path) = todo.pop() {
        if let Err(e) = proof.verify(&path) {
            out.push(e)
        }
        for i in (0..proof.children(&path).unwrap_or(0)).rev() {
            let mut child = path.clone();
            child.push(i);
            todo.push(child)
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> Proof {
        serde_json::from_str::<Node>(json).unwrap().proof().unwrap()
    }

    #[test]
    fn conjunction() {
        let json = r#"{
            "sentence": "A AND B",
            "rule": "adjunction",
            "antecedents": [[0], [1]],
            "children": [
                {"sentence": "A", "rule": "premise"},
                {"sentence": "B", "rule": "premise"}
            ]
        }"#;
        let proof = load(json);
        assert!(proof.check_proof(&[]));
        assert!(errors(&proof).is_empty());

        let proof = load(&json.replace("A AND B", "A OR B"));
        assert!(!proof.check_proof(&[]));
        assert!(matches!(errors(&proof)[..], [proof::Error::Mismatch { .. }]));
    }

    #[test]
    fn quantifiers() {
        let json = r#"{
            "sentence": "P(c)",
            "rule": "universal_instantiation",
            "antecedents": ["FORALL x P(x)"],
            "args": ["c"],
            "children": []
        }"#;
        assert!(load(json).check_proof(&[]));

        let json = r#"{
            "sentence": "FORALL y P(y)",
            "rule": "universal_generalization",
            "antecedents": [[0]],
            "args": ["c", "y"],
            "variables": ["y"],
            "children": [{"sentence": "P(c)", "rule": "premise"}]
        }"#;
        assert!(load(json).check_proof(&[]));
    }

    #[test]
    fn unjustified() {
        let proof = load(r#"{"sentence": "A", "children": [{"sentence": "B"}]}"#);
        assert_eq!(errors(&proof).len(), 2);

        let json = r#"{"sentence": "A", "rule": "hocus_pocus"}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert!(node.proof().is_err());
    }
}
