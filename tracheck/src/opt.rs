use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(version, about)]
/// Translate natural-language proofs to Lean and check proof trees
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Render a theorem to Lean and translate its proof states
    ///
    /// The theorem is read from a JSON file of the shape
    /// `{"name": ..., "hypotheses": [...], "goal": ..., "proof": [...]}`,
    /// where hypotheses, goal, and proof lines are given in natural language.
    State {
        /// Theorem file ("-" for standard input)
        #[arg(name = "FILE")]
        file: PathBuf,

        /// Only print the Lean theorem, do not call Lean
        #[arg(long)]
        render_only: bool,

        /// Command that runs Lean
        ///
        /// The command receives a JSON object `{"text": ..., "lines": [...]}` on
        /// standard input and must answer with `{"states": [...], "error": ...}`.
        #[arg(long, env = "TRADUKO_LEAN")]
        lean: Option<String>,

        /// Time in seconds to wait for Lean
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },

    /// Check proof trees
    ///
    /// Every node of a proof tree is a JSON object
    /// `{"sentence": ..., "rule": ..., "antecedents": [...], "args": [...], "children": [...]}`,
    /// where only the sentence is mandatory.
    Check {
        /// Check files in parallel (number of threads determined automatically if omitted)
        #[arg(long, short = 'j')]
        jobs: Option<Option<usize>>,

        /// Proof files to check
        #[arg(name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Convert a sentence to XML
    Xml {
        /// Sentence, such as "FORALL x (P(x) => Q(x))"
        sentence: String,

        /// Read the sentence from XML and print it as text
        #[arg(long)]
        from_xml: bool,
    },
}
