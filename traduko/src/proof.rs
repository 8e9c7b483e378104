//! Proof trees addressed by paths.
//!
//! A path is a sequence of child indices starting from the root,
//! so the root has the empty path `[]` and its second child has path `[1]`.
//! Every node holds a sentence and optionally a justification,
//! which names a rule and the antecedents the rule is applied to.
//! Antecedents may refer to other nodes of the proof via their paths;
//! whenever siblings are inserted or removed,
//! such references are renumbered to keep pointing to the same nodes.

use crate::grammar::{Sentence, Term};
use crate::rules::{self, Rule};
use core::fmt::{self, Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Antecedent {
    Sentence(Sentence),
    Path(Vec<usize>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Justification {
    pub rule: Rule,
    pub antecedents: Vec<Antecedent>,
    pub args: Vec<Term>,
}

impl From<Rule> for Justification {
    fn from(rule: Rule) -> Self {
        Self::from((rule, Vec::new()))
    }
}

impl From<(Rule, Vec<Antecedent>)> for Justification {
    fn from((rule, antecedents): (Rule, Vec<Antecedent>)) -> Self {
        let args = Vec::new();
        Self { rule, antecedents, args }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub sentence: Sentence,
    pub justification: Option<Justification>,
    children: Vec<NodeId>,
}

type NodeId = usize;

/// Proof tree.
///
/// Nodes are stored in an arena, the root being the first node.
/// Removed nodes stay in the arena, but they are unreachable from the root.
#[derive(Clone, Debug)]
pub struct Proof {
    nodes: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// the path does not lead to a node, or the index is out of bounds
    InvalidPosition(Vec<usize>),
    /// the antecedent at the path is not visible from the position
    ScopeViolation { position: Vec<usize>, antecedent: Vec<usize> },
    /// the rule does not derive a sentence
    NoConclusion(Rule),
    Unjustified(Vec<usize>),
    /// a node outside of the subtree to remove refers into it
    Referenced { referrer: Vec<usize>, target: Vec<usize> },
    RuleApplicationFailed(rules::Error),
    /// the justification does not derive the sentence of the node
    Mismatch { position: Vec<usize>, derived: Sentence },
}

impl From<rules::Error> for Error {
    fn from(err: rules::Error) -> Self {
        Self::RuleApplicationFailed(err)
    }
}

struct PathFmt<'a>(&'a [usize]);

impl Display for PathFmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.0.iter().try_for_each(|i| write!(f, "{},", i))?;
        write!(f, ")")
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidPosition(p) => write!(f, "invalid position {}", PathFmt(p)),
            Self::ScopeViolation { position, antecedent } => write!(
                f,
                "antecedent {} is not in scope at {}",
                PathFmt(antecedent),
                PathFmt(position)
            ),
            Self::NoConclusion(rule) => write!(f, "{} does not derive a sentence", rule),
            Self::Unjustified(p) => write!(f, "{} is not justified", PathFmt(p)),
            Self::Referenced { referrer, target } => write!(
                f,
                "{} is referenced by {}",
                PathFmt(target),
                PathFmt(referrer)
            ),
            Self::RuleApplicationFailed(e) => e.fmt(f),
            Self::Mismatch { position, derived } => {
                write!(f, "at {}, the rule derives {}", PathFmt(position), derived)
            }
        }
    }
}

/// Return true if the node at `reference` may use the node at `position` as antecedent.
///
/// These are the earlier siblings of the reference,
/// the earlier siblings of all ancestors of the reference, and
/// the children of the reference.
///
/// ~~~
/// # use traduko::proof::check_scope;
/// assert!(check_scope(&[1], &[2, 1, 3]));
/// assert!(check_scope(&[2, 1, 1], &[2, 1]));
/// assert!(!check_scope(&[3], &[2]));
/// assert!(!check_scope(&[1, 1], &[2]));
/// ~~~
pub fn check_scope(position: &[usize], reference: &[usize]) -> bool {
    let common = position.iter().zip(reference).take_while(|(p, r)| p == r).count();
    if common == position.len() {
        // position is the reference itself or one of its ancestors
        false
    } else if common == reference.len() {
        position.len() == common + 1
    } else {
        position.len() == common + 1 && position[common] < reference[common]
    }
}

impl Node {
    fn new(sentence: Sentence) -> Self {
        let justification = None;
        let children = Vec::new();
        Self { sentence, justification, children }
    }

    fn paths_mut(&mut self) -> impl Iterator<Item = &mut Vec<usize>> {
        let ants = self.justification.iter_mut().flat_map(|j| j.antecedents.iter_mut());
        ants.filter_map(|a| match a {
            Antecedent::Path(p) => Some(p),
            Antecedent::Sentence(_) => None,
        })
    }

    fn paths(&self) -> impl Iterator<Item = &Vec<usize>> {
        let ants = self.justification.iter().flat_map(|j| j.antecedents.iter());
        ants.filter_map(|a| match a {
            Antecedent::Path(p) => Some(p),
            Antecedent::Sentence(_) => None,
        })
    }
}

impl Proof {
    /// Create a proof consisting only of a root node.
    pub fn new(sentence: Sentence) -> Self {
        Self {
            nodes: Vec::from([Node::new(sentence)]),
        }
    }

    fn id(&self, path: &[usize]) -> Result<NodeId, Error> {
        path.iter().try_fold(0, |id, i| {
            let child = self.nodes[id].children.get(*i);
            child.copied().ok_or_else(|| Error::InvalidPosition(path.to_vec()))
        })
    }

    pub fn get(&self, path: &[usize]) -> Result<&Node, Error> {
        Ok(&self.nodes[self.id(path)?])
    }

    /// Number of children of the node at the path.
    pub fn children(&self, path: &[usize]) -> Result<usize, Error> {
        Ok(self.get(path)?.children.len())
    }

    pub fn set_sentence(&mut self, path: &[usize], sentence: Sentence) -> Result<(), Error> {
        let id = self.id(path)?;
        self.nodes[id].sentence = sentence;
        Ok(())
    }

    /// Return the paths and IDs of all nodes reachable from the root in pre-order.
    fn walk(&self) -> Vec<(Vec<usize>, NodeId)> {
        let mut out = Vec::new();
        let mut todo = Vec::from([(Vec::new(), 0)]);
        while let Some((path, id)) = todo.pop() {
            for (i, child) in self.nodes[id].children.iter().enumerate().rev() {
                let mut cpath = path.clone();
                cpath.push(i);
                todo.push((cpath, *child));
            }
            out.push((path, id));
        }
        out
    }

    /// Append a child to the node at `parent`, returning the path of the child.
    pub fn insert_child(&mut self, sentence: Sentence, parent: &[usize]) -> Result<Vec<usize>, Error> {
        let index = self.children(parent)?;
        self.insert_child_at(sentence, parent, index)
    }

    /// Insert a child at the given index, shifting later siblings one to the right.
    pub fn insert_child_at(
        &mut self,
        sentence: Sentence,
        parent: &[usize],
        index: usize,
    ) -> Result<Vec<usize>, Error> {
        let pid = self.id(parent)?;
        let mut path = parent.to_vec();
        path.push(index);
        if index > self.nodes[pid].children.len() {
            return Err(Error::InvalidPosition(path));
        }

        let depth = parent.len();
        for node in self.nodes.iter_mut() {
            for p in node.paths_mut() {
                if p.len() > depth && p.starts_with(parent) && p[depth] >= index {
                    p[depth] += 1
                }
            }
        }

        let id = self.nodes.len();
        self.nodes.push(Node::new(sentence));
        self.nodes[pid].children.insert(index, id);
        Ok(path)
    }

    /// Resolve antecedents visible from the position to sentences.
    fn resolve(&self, position: &[usize], ants: &[Antecedent]) -> Result<Vec<Sentence>, Error> {
        let resolve = |a: &Antecedent| match a {
            Antecedent::Sentence(s) => Ok(s.clone()),
            Antecedent::Path(p) if check_scope(p, position) => Ok(self.get(p)?.sentence.clone()),
            Antecedent::Path(p) => Err(Error::ScopeViolation {
                position: position.to_vec(),
                antecedent: p.clone(),
            }),
        };
        ants.iter().map(resolve).collect()
    }

    /// Append to `parent` a child whose sentence is derived by a rule.
    ///
    /// Path antecedents are resolved relative to the position of the new child.
    /// On failure, the proof remains unchanged.
    pub fn insert_with_rule(
        &mut self,
        parent: &[usize],
        rule: Rule,
        antecedents: Vec<Antecedent>,
        args: Vec<Term>,
    ) -> Result<Vec<usize>, Error> {
        let mut path = parent.to_vec();
        path.push(self.children(parent)?);
        let sentences = self.resolve(&path, &antecedents)?;
        let sentence = rule.apply(&sentences, &args)?.ok_or(Error::NoConclusion(rule))?;
        log::debug!("Derived {} by {}", sentence, rule);
        let path = self.insert_child(sentence, parent)?;
        let id = self.id(&path)?;
        let justification = Justification { rule, antecedents, args };
        self.nodes[id].justification = Some(justification);
        Ok(path)
    }

    /// Attach a justification to an existing node.
    ///
    /// The justification is not checked to derive the sentence of the node,
    /// but its path antecedents must exist and be in scope.
    pub fn justify(&mut self, path: &[usize], justification: Justification) -> Result<(), Error> {
        let id = self.id(path)?;
        self.resolve(path, &justification.antecedents)?;
        self.nodes[id].justification = Some(justification);
        Ok(())
    }

    /// Remove the subtree at the path and shift later siblings one to the left.
    ///
    /// This fails if any node outside of the subtree uses a node inside as antecedent.
    pub fn remove(&mut self, path: &[usize]) -> Result<Node, Error> {
        let (index, parent) = match path.split_last() {
            Some((index, parent)) => (*index, parent),
            None => return Err(Error::InvalidPosition(Vec::new())),
        };
        let id = self.id(path)?;
        for (referrer, rid) in self.walk() {
            if referrer.starts_with(path) {
                continue;
            }
            if let Some(target) = self.nodes[rid].paths().find(|p| p.starts_with(path)) {
                let target = target.clone();
                return Err(Error::Referenced { referrer, target });
            }
        }

        let pid = self.id(parent)?;
        self.nodes[pid].children.remove(index);
        let depth = parent.len();
        for node in self.nodes.iter_mut() {
            for p in node.paths_mut() {
                if p.len() > depth && p.starts_with(parent) && p[depth] > index {
                    p[depth] -= 1
                }
            }
        }
        Ok(self.nodes[id].clone())
    }

    /// Check that the node at the path is justified and its justification derives its sentence.
    ///
    /// Assumptions (premises and hypotheses) are always valid.
    pub fn verify(&self, path: &[usize]) -> Result<(), Error> {
        let node = self.get(path)?;
        let just = match &node.justification {
            None => return Err(Error::Unjustified(path.to_vec())),
            Some(j) if j.rule.is_assumption() => return Ok(()),
            Some(j) => j,
        };
        let sentences = self.resolve(path, &just.antecedents)?;
        let derived = just.rule.apply(&sentences, &just.args)?;
        let derived = derived.ok_or(Error::NoConclusion(just.rule))?;
        if derived == node.sentence {
            Ok(())
        } else {
            let position = path.to_vec();
            Err(Error::Mismatch { position, derived })
        }
    }

    /// Return true if the node at the path and all its descendants are correctly justified.
    pub fn check_proof(&self, path: &[usize]) -> bool {
        let root = path.to_vec();
        let subtree = self.walk().into_iter().filter(|(p, _)| p.starts_with(&root));
        let mut found = false;
        for (p, _) in subtree {
            found = true;
            if let Err(e) = self.verify(&p) {
                log::info!("Proof is invalid: {}", e);
                return false;
            }
        }
        found
    }
}

impl Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.rule.fmt(f)?;
        for a in &self.antecedents {
            match a {
                Antecedent::Path(p) => write!(f, " {}", PathFmt(p))?,
                Antecedent::Sentence(s) => write!(f, " [{}]", s)?,
            }
        }
        self.args.iter().try_for_each(|t| write!(f, " {}", t))
    }
}

/// Print every node on one line, indented by its depth.
impl Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (path, id) in self.walk() {
            let node = &self.nodes[id];
            write!(f, "{:1$}{2}", "", 2 * path.len(), node.sentence)?;
            if let Some(j) = &node.justification {
                write!(f, "    by {}", j)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Sentence {
        Sentence::parse(s).unwrap()
    }

    fn assume(proof: &mut Proof, s: &str, parent: &[usize], rule: Rule) -> Vec<usize> {
        let path = proof.insert_child(p(s), parent).unwrap();
        let justification = Justification {
            rule,
            antecedents: Vec::new(),
            args: Vec::new(),
        };
        proof.justify(&path, justification).unwrap();
        path
    }

    fn refs(paths: &[&[usize]]) -> Vec<Antecedent> {
        paths.iter().map(|p| Antecedent::Path(p.to_vec())).collect()
    }

    #[test]
    fn scope() {
        assert!(check_scope(&[1], &[2]));
        assert!(check_scope(&[1], &[2, 1]));
        assert!(check_scope(&[1], &[2, 1, 3]));
        assert!(check_scope(&[2, 1], &[2, 3]));
        assert!(check_scope(&[2, 1], &[2, 3, 2]));
        assert!(check_scope(&[2, 1, 1], &[2, 1]));
        assert!(check_scope(&[0], &[]));
        assert!(!check_scope(&[3], &[2]));
        assert!(!check_scope(&[1, 1], &[2]));
        assert!(!check_scope(&[2, 1, 1], &[2, 2]));
        assert!(!check_scope(&[2], &[2]));
        assert!(!check_scope(&[2], &[2, 1]));
    }

    #[test]
    fn conjunction() {
        let mut proof = Proof::new(p("A AND B"));
        assume(&mut proof, "A", &[], Rule::Premise);
        assume(&mut proof, "B", &[], Rule::Premise);
        let justification = Justification {
            rule: Rule::Adjunction,
            antecedents: refs(&[&[0], &[1]]),
            args: Vec::new(),
        };
        proof.justify(&[], justification).unwrap();
        assert!(proof.check_proof(&[]));

        proof.set_sentence(&[], p("A OR B")).unwrap();
        assert!(!proof.check_proof(&[]));
        assert!(matches!(proof.verify(&[]), Err(Error::Mismatch { .. })));
        // the children are still fine
        assert!(proof.check_proof(&[1]));
    }

    #[test]
    fn deduction() {
        // (A => B) AND (B => C) => (A => C)
        let mut proof = Proof::new(p("((A => B) AND (B => C)) => (A => C)"));
        assume(&mut proof, "(A => B) AND (B => C)", &[], Rule::Hypothesis);
        let r = Rule::Simplification1;
        proof.insert_with_rule(&[], r, refs(&[&[0]]), Vec::new()).unwrap();
        let r = Rule::Simplification2;
        proof.insert_with_rule(&[], r, refs(&[&[0]]), Vec::new()).unwrap();
        let inner = proof.insert_child(p("A => C"), &[]).unwrap();
        assert_eq!(inner, [3]);
        assume(&mut proof, "A", &inner, Rule::Hypothesis);
        let r = Rule::ModusPonens;
        proof.insert_with_rule(&inner, r, refs(&[&[1], &[3, 0]]), Vec::new()).unwrap();
        let c = proof.insert_with_rule(&inner, r, refs(&[&[2], &[3, 1]]), Vec::new()).unwrap();
        assert_eq!(proof.get(&c).unwrap().sentence, p("C"));
        let ants = refs(&[&[3, 0], &[3, 2]]);
        proof.justify(&inner, Justification { rule: Rule::DeductionTheorem, antecedents: ants, args: Vec::new() }).unwrap();
        let ants = refs(&[&[0], &[3]]);
        proof.justify(&[], Justification { rule: Rule::DeductionTheorem, antecedents: ants, args: Vec::new() }).unwrap();
        assert!(proof.check_proof(&[]));
    }

    #[test]
    fn out_of_scope() {
        let mut proof = Proof::new(p("B"));
        let a = assume(&mut proof, "A => B", &[], Rule::Premise);
        let inner = proof.insert_child(p("A"), &[]).unwrap();
        assume(&mut proof, "A", &inner, Rule::Premise);
        // a later sibling is not visible
        let ants = refs(&[&a[..], &[1, 0]]);
        let err = proof.insert_with_rule(&[], Rule::ModusPonens, ants, Vec::new());
        assert!(matches!(err, Err(Error::ScopeViolation { .. })));
        assert_eq!(proof.children(&[]), Ok(2));
        let err = proof.insert_child_at(p("C"), &[], 3);
        assert_eq!(err, Err(Error::InvalidPosition(Vec::from([3]))));
        assert!(matches!(proof.get(&[5]), Err(Error::InvalidPosition(_))));
    }

    #[test]
    fn renumbering() {
        let mut proof = Proof::new(p("B"));
        assume(&mut proof, "A => B", &[], Rule::Premise);
        assume(&mut proof, "A", &[], Rule::Premise);
        let mp = proof.insert_with_rule(&[], Rule::ModusPonens, refs(&[&[0], &[1]]), Vec::new());
        assert_eq!(mp, Ok(Vec::from([2])));

        proof.insert_child_at(p("C"), &[], 1).unwrap();
        let node = proof.get(&[3]).unwrap();
        let ants = &node.justification.as_ref().unwrap().antecedents;
        assert_eq!(ants, &refs(&[&[0], &[2]]));
        assert_eq!(proof.verify(&[3]), Ok(()));

        proof.remove(&[1]).unwrap();
        let node = proof.get(&[2]).unwrap();
        let ants = &node.justification.as_ref().unwrap().antecedents;
        assert_eq!(ants, &refs(&[&[0], &[1]]));

        let err = proof.remove(&[0]);
        let target = Vec::from([0]);
        let referrer = Vec::from([2]);
        assert_eq!(err.map(|_| ()), Err(Error::Referenced { referrer, target }));
        assert!(matches!(proof.remove(&[]), Err(Error::InvalidPosition(_))));
    }

    #[test]
    fn display() {
        let mut proof = Proof::new(p("A AND B"));
        assume(&mut proof, "A", &[], Rule::Premise);
        let ants = Vec::from([Antecedent::Path(Vec::from([0])), Antecedent::Sentence(p("B"))]);
        proof.justify(&[], Justification { rule: Rule::Adjunction, antecedents: ants, args: Vec::new() }).unwrap();
        assert_eq!(
            proof.to_string(),
            "A AND B    by adjunction (0,) [B]\n  A    by premise\n"
        );
    }
}
