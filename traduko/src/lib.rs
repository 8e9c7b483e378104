#![forbid(unsafe_code)]

//! Translation of proofs between natural language and Lean, and
//! checking of natural-deduction proof trees.
//!
//! This is the library underlying the `tracheck` command-line tool.
//!
//! # Usage
//!
//! The library serves two independent purposes.
//!
//! First, it translates theorems about real sequences
//! from a restricted natural language (using LaTeX for mathematics)
//! to Lean and back.
//! A [`language::Manager`] accumulates hypotheses, a goal, and proof lines
//! given in natural language, renders them to a Lean theorem, and
//! translates the proof states reported by Lean back to natural language.
//!
//! ~~~
//! use traduko::language::Manager;
//!
//! let mut m = Manager::new("limit");
//! m.add_hypothesis("$a_n$ are real-valued sequences")?;
//! m.add_hypothesis(r"$l \in \mathbb{R}$")?;
//! m.set_initial_goal(r"$a_n \rightarrow l$")?;
//! m.add_proof_line(r"Let $\epsilon$")?;
//! let rendering = m.render()?;
//! assert!(rendering.text.contains("theorem limit\n  (a : ℕ → ℝ)\n  (l : ℝ)\n  : is_limit a l :="));
//! assert!(rendering.text.contains("\n  intros ε A1,\n"));
//! # Ok::<_, traduko::Error>(())
//! ~~~
//!
//! Second, it builds proof trees in a first-order logic,
//! where every node is justified by an inference rule
//! applied to nodes that are in scope.
//! Sentences are parsed from text, then scoped to
//! distinguish variables from constants.
//!
//! ~~~
//! use traduko::grammar::Sentence;
//! use traduko::proof::{Antecedent, Proof};
//! use traduko::rules::Rule;
//!
//! let a = Sentence::parse("A")?;
//! let b = Sentence::parse("B")?;
//! let mut proof = Proof::new(Sentence::parse("A AND B")?);
//! for s in [a, b] {
//!     let path = proof.insert_child(s, &[])?;
//!     proof.justify(&path, Rule::Premise.into())?;
//! }
//! let ants = vec![Antecedent::Path(vec![0]), Antecedent::Path(vec![1])];
//! proof.justify(&[], (Rule::Adjunction, ants).into())?;
//! assert!(proof.check_proof(&[]));
//! # Ok::<_, traduko::Error>(())
//! ~~~
//!
//! # Organisation
//!
//! * [`grammar`] defines terms and sentences of first-order logic,
//! * [`scope`] refines sentences parsed by `formula_parse` into [`grammar`] sentences,
//! * [`xml`] converts sentences to and from XML,
//! * [`rules`] contains the inference rules,
//! * [`proof`] contains proof trees,
//! * [`language`] translates between natural language and Lean, and
//! * [`lean`] is the interface to a Lean process.

pub mod error;
pub mod grammar;
pub mod language;
pub mod lean;
pub mod proof;
pub mod rules;
pub mod scope;
mod stack;
pub mod xml;

pub use error::Error;
pub use scope::Scope;
pub use stack::Stack;
