//! Symbol table of a translation session.

use super::Statement;
use std::collections::BTreeSet;

/// Immutable HashMap for fast snapshots of contexts.
type FnvHashMap<K, V> = im::hashmap::HashMap<K, V, fnv::FnvBuildHasher>;

/// Kind of object an identifier denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class {
    Sequence,
    Real,
    Natural,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub classes: BTreeSet<Class>,
    /// name of the hypothesis that was introduced together with the identifier
    pub associate: Option<String>,
}

/// Identifier classifications, the current goal, and the anonymous name counter.
///
/// Contexts are append-only: identifiers are never removed,
/// and anonymous names are never reused.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context {
    identifiers: FnvHashMap<String, Classification>,
    pub current_goal: Option<Statement>,
    anonymous: u32,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ident: &str) -> Option<&Classification> {
        self.identifiers.get(ident)
    }

    /// Add a class to an identifier.
    pub fn add(&mut self, ident: &str, class: Class) {
        let entry = self.identifiers.entry(ident.to_string()).or_default();
        entry.classes.insert(class);
    }

    /// Return true if the identifier has the given class.
    pub fn is(&self, ident: &str, class: Class) -> bool {
        self.get(ident).map_or(false, |c| c.classes.contains(&class))
    }

    /// Associate an identifier with a hypothesis name, replacing any previous association.
    pub fn associate(&mut self, ident: &str, hyp: &str) {
        let entry = self.identifiers.entry(ident.to_string()).or_default();
        entry.associate = Some(hyp.to_string());
    }

    pub fn associate_of(&self, ident: &str) -> Option<&str> {
        self.get(ident)?.associate.as_deref()
    }

    /// Mint a fresh hypothesis name.
    ///
    /// ~~~
    /// # use traduko::language::Context;
    /// let mut ctx = Context::new();
    /// assert_eq!(ctx.next_anonymous(), "A1");
    /// assert_eq!(ctx.next_anonymous(), "A2");
    /// ~~~
    pub fn next_anonymous(&mut self) -> String {
        self.anonymous += 1;
        format!("A{}", self.anonymous)
    }

    /// Account for a hypothesis name read from Lean text.
    ///
    /// If the name has the shape of an anonymous name `A{n}`,
    /// make sure that later minted names come after it.
    pub fn observe_anonymous(&mut self, name: &str) {
        let n = name.strip_prefix('A').and_then(|n| n.parse::<u32>().ok());
        if let Some(n) = n {
            self.anonymous = self.anonymous.max(n)
        }
    }
}

#[test]
fn classes() {
    let mut ctx = Context::new();
    ctx.add("a", Class::Sequence);
    ctx.add("a", Class::Sequence);
    ctx.add("a", Class::Real);
    assert_eq!(ctx.get("a").map(|c| c.classes.len()), Some(2));
    assert!(ctx.is("a", Class::Sequence));
    assert!(!ctx.is("b", Class::Sequence));

    ctx.associate("ε", "A1");
    ctx.associate("ε", "A3");
    assert_eq!(ctx.associate_of("ε"), Some("A3"));
    assert_eq!(ctx.associate_of("a"), None);
}

#[test]
fn anonymous() {
    let mut ctx = Context::new();
    let snapshot = ctx.clone();
    ctx.observe_anonymous("A2");
    ctx.observe_anonymous("H7");
    ctx.observe_anonymous("A1");
    assert_eq!(ctx.next_anonymous(), "A3");
    assert_eq!(snapshot, Context::new());
}
