//! XML representation of sentences.
//!
//! A document has a single `sentence` root element containing one sentence element:
//!
//! ~~~
//! # use traduko::{grammar::Sentence, xml};
//! let s = Sentence::parse("A => B")?;
//! let doc = xml::to_xml(&s);
//! assert_eq!(
//!     doc,
//!     concat!(
//!         "<sentence>",
//!         r#"<binaryConnectorSentence connector="implication">"#,
//!         r#"<constantPredicate symbol="A" />"#,
//!         r#"<constantPredicate symbol="B" />"#,
//!         "</binaryConnectorSentence>",
//!         "</sentence>"
//!     )
//! );
//! assert_eq!(xml::from_xml(&doc)?, s);
//! # Ok::<_, traduko::Error>(())
//! ~~~
//!
//! Sentence elements are
//! `boolean` (attribute `value`),
//! `constantPredicate` (attribute `symbol`),
//! `predicate` (attribute `symbol`, term children),
//! `unaryConnectorSentence` (attribute `connector`, one child),
//! `binaryConnectorSentence` (attribute `connector`, two children), and
//! `quantifierSentence` (attribute `quantifier`,
//! a `variable` child followed by the body).
//! Term elements are `constant`, `variable`, and `function`,
//! all with a `symbol` attribute, functions having term children.

use crate::grammar::{self, Args, Connective, Quantifier, Sentence, Symbol, Term};
use core::fmt::{self, Display};
use std::borrow::Cow;
use core::iter::Peekable;
use logos::Logos;

#[derive(Logos, Clone, Debug, PartialEq)]
enum Token<'s> {
    #[token("<")]
    Open,

    #[token("</")]
    OpenEnd,

    #[token(">")]
    Close,

    #[token("/>")]
    CloseEmpty,

    #[token("=")]
    Eq,

    #[regex("[a-zA-Z_][a-zA-Z0-9_.:-]*")]
    Name(&'s str),

    #[regex(r#""[^"<]*""#, |lex| unescape(lex.slice()))]
    #[regex(r#"'[^'<]*'"#, |lex| unescape(lex.slice()))]
    Str(Cow<'s, str>),

    #[regex(r"<\?[^?]*\?>")]
    #[regex(r"<!DOCTYPE[^>]*>")]
    Decl,

    #[regex(r"<!--([^-]|-[^-])*-->")]
    Comment,

    #[regex(r"<!\[CDATA\[([^\]]|\][^\]]|\]\][^>])*\]\]>", |lex| cdata(lex.slice()))]
    CData(&'s str),

    #[regex(r"[ \t\r\n]+")]
    Space,

    #[error]
    Error,
}

fn cdata(s: &str) -> &str {
    &s["<![CDATA[".len()..s.len() - "]]>".len()]
}

/// Remove quotes and replace entity and character references.
fn unescape(s: &str) -> Option<Cow<str>> {
    let s = &s[1..s.len() - 1];
    if !s.contains('&') {
        return Some(Cow::Borrowed(s));
    }
    let mut out = String::new();
    let mut rest = s;
    while let Some((before, after)) = rest.split_once('&') {
        let (entity, after) = after.split_once(';')?;
        out.push_str(before);
        out.push(entity_char(entity)?);
        rest = after;
    }
    out.push_str(rest);
    Some(Cow::Owned(out))
}

fn entity_char(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = match entity.strip_prefix("#x") {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => entity.strip_prefix('#')?.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Tokens that do not contribute to the sentence.
fn ignored(token: &Token) -> bool {
    match token {
        Token::Space | Token::Decl | Token::Comment => true,
        Token::CData(data) => data.trim().is_empty(),
        _ => false,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// the document is not well-formed XML
    Syntax(&'static str),
    /// element is not closed by a matching end tag
    Unclosed(String),
    UnexpectedElement(String),
    MissingAttribute { element: String, attribute: &'static str },
    InvalidAttribute { attribute: &'static str, value: String },
    /// element has a wrong number of children
    Children { element: String, found: usize },
    Grammar(grammar::Error),
}

impl From<grammar::Error> for Error {
    fn from(err: grammar::Error) -> Self {
        Self::Grammar(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Syntax(s) => write!(f, "syntax error: {}", s),
            Self::Unclosed(e) => write!(f, "element {} is not closed", e),
            Self::UnexpectedElement(e) => write!(f, "unexpected element {}", e),
            Self::MissingAttribute { element, attribute } => {
                write!(f, "element {} lacks attribute {}", element, attribute)
            }
            Self::InvalidAttribute { attribute, value } => {
                write!(f, "invalid value \"{}\" for attribute {}", value, attribute)
            }
            Self::Children { element, found } => {
                write!(f, "element {} has wrong number of children ({})", element, found)
            }
            Self::Grammar(e) => e.fmt(f),
        }
    }
}

type Result<T> = core::result::Result<T, Error>;

/// Wrapper to display sentences and terms as XML elements.
pub struct Xml<T>(pub T);

impl Display for Xml<&Term> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Term::Constant(c) => write!(f, r#"<constant symbol="{}" />"#, c),
            Term::Variable(x) => write!(f, r#"<variable symbol="{}" />"#, x),
            Term::Function(s, args) => {
                write!(f, r#"<function symbol="{}">"#, s)?;
                args.iter().try_for_each(|a| Xml(a).fmt(f))?;
                write!(f, "</function>")
            }
        }
    }
}

impl Display for Xml<&Sentence> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Sentence::Bool(b) => write!(f, r#"<boolean value="{}" />"#, b),
            Sentence::ConstantPredicate(p) => write!(f, r#"<constantPredicate symbol="{}" />"#, p),
            Sentence::Predicate(p, args) => {
                write!(f, r#"<predicate symbol="{}">"#, p)?;
                args.iter().try_for_each(|a| Xml(a).fmt(f))?;
                write!(f, "</predicate>")
            }
            Sentence::Negation(s) => {
                write!(f, r#"<unaryConnectorSentence connector="negation">"#)?;
                Xml(&**s).fmt(f)?;
                write!(f, "</unaryConnectorSentence>")
            }
            Sentence::Binary(c, l, r) => {
                write!(f, r#"<binaryConnectorSentence connector="{}">"#, connector_name(*c))?;
                Xml(&**l).fmt(f)?;
                Xml(&**r).fmt(f)?;
                write!(f, "</binaryConnectorSentence>")
            }
            Sentence::Quantified(q, x, s) => {
                let q = match q {
                    Quantifier::Universal => "universal",
                    Quantifier::Existential => "existential",
                };
                write!(f, r#"<quantifierSentence quantifier="{}">"#, q)?;
                write!(f, r#"<variable symbol="{}" />"#, x)?;
                Xml(&**s).fmt(f)?;
                write!(f, "</quantifierSentence>")
            }
        }
    }
}

fn connector_name(c: Connective) -> &'static str {
    match c {
        Connective::Conjunction => "conjunction",
        Connective::Disjunction => "disjunction",
        Connective::Implication => "implication",
        Connective::Biconditional => "biconditional",
    }
}

/// Serialise a sentence to an XML document.
pub fn to_xml(s: &Sentence) -> String {
    format!("<sentence>{}</sentence>", Xml(s))
}

/// Read a sentence from an XML document.
pub fn from_xml(doc: &str) -> Result<Sentence> {
    let mut iter = Token::lexer(doc).filter(|t| !ignored(t)).peekable();
    let root = Element::parse(&mut iter)?;
    if iter.next().is_some() {
        return Err(Error::Syntax("content after root element"));
    }
    if root.name != "sentence" {
        return Err(Error::UnexpectedElement(root.name.to_string()));
    }
    match &root.children[..] {
        [s] => sentence(s),
        _ => Err(root.children_error()),
    }
}

struct Element<'s> {
    name: &'s str,
    attrs: Vec<(&'s str, Cow<'s, str>)>,
    children: Vec<Self>,
}

impl<'s> Element<'s> {
    fn parse<I>(iter: &mut Peekable<I>) -> Result<Self>
    where
        I: Iterator<Item = Token<'s>>,
    {
        if iter.next() != Some(Token::Open) {
            return Err(Error::Syntax("expected start tag"));
        }
        let name = match iter.next() {
            Some(Token::Name(name)) => name,
            _ => return Err(Error::Syntax("expected element name")),
        };
        let mut attrs = Vec::new();
        loop {
            match iter.next() {
                Some(Token::Name(key)) => match (iter.next(), iter.next()) {
                    (Some(Token::Eq), Some(Token::Str(value))) => attrs.push((key, value)),
                    _ => return Err(Error::Syntax("expected quoted attribute value")),
                },
                Some(Token::CloseEmpty) => {
                    let children = Vec::new();
                    return Ok(Self { name, attrs, children });
                }
                Some(Token::Close) => break,
                _ => return Err(Error::Syntax("expected attribute or end of tag")),
            }
        }
        let mut children = Vec::new();
        while iter.peek() == Some(&Token::Open) {
            children.push(Self::parse(iter)?)
        }
        if let Some(Token::CData(_)) = iter.peek() {
            return Err(Error::Syntax("unexpected character data"));
        }
        match (iter.next(), iter.next(), iter.next()) {
            (Some(Token::OpenEnd), Some(Token::Name(end)), Some(Token::Close)) if end == name => {
                Ok(Self { name, attrs, children })
            }
            _ => Err(Error::Unclosed(name.to_string())),
        }
    }

    fn attr(&self, attribute: &'static str) -> Result<&str> {
        let found = self.attrs.iter().find(|(key, _)| *key == attribute);
        found.map(|(_, value)| &**value).ok_or_else(|| Error::MissingAttribute {
            element: self.name.to_string(),
            attribute,
        })
    }

    fn symbol(&self) -> Result<Symbol> {
        Ok(Symbol::new(self.attr("symbol")?)?)
    }

    fn children_error(&self) -> Error {
        let element = self.name.to_string();
        let found = self.children.len();
        Error::Children { element, found }
    }

    fn leaf(&self) -> Result<()> {
        if self.children.is_empty() {
            Ok(())
        } else {
            Err(self.children_error())
        }
    }

    fn args(&self) -> Result<Args> {
        let args = self.children.iter().map(term).collect::<Result<_>>()?;
        Args::new(args).map_err(|_| self.children_error())
    }
}

fn invalid(attribute: &'static str, value: &str) -> Error {
    let value = value.to_string();
    Error::InvalidAttribute { attribute, value }
}

fn term(e: &Element) -> Result<Term> {
    match e.name {
        "constant" => e.leaf().and(Ok(Term::Constant(e.symbol()?))),
        "variable" => e.leaf().and(Ok(Term::Variable(e.symbol()?))),
        "function" => Ok(Term::Function(e.symbol()?, e.args()?)),
        other => Err(Error::UnexpectedElement(other.to_string())),
    }
}

fn sentence(e: &Element) -> Result<Sentence> {
    match e.name {
        "boolean" => {
            e.leaf()?;
            match e.attr("value")? {
                "true" => Ok(Sentence::Bool(true)),
                "false" => Ok(Sentence::Bool(false)),
                v => Err(invalid("value", v)),
            }
        }
        "constantPredicate" => e.leaf().and(Ok(Sentence::ConstantPredicate(e.symbol()?))),
        "predicate" => Ok(Sentence::Predicate(e.symbol()?, e.args()?)),
        "unaryConnectorSentence" => match (e.attr("connector")?, &e.children[..]) {
            ("negation", [s]) => Ok(Sentence::negation(sentence(s)?)),
            ("negation", _) => Err(e.children_error()),
            (c, _) => Err(invalid("connector", c)),
        },
        "binaryConnectorSentence" => {
            let c = match e.attr("connector")? {
                "conjunction" => Connective::Conjunction,
                "disjunction" => Connective::Disjunction,
                "implication" => Connective::Implication,
                "biconditional" => Connective::Biconditional,
                c => return Err(invalid("connector", c)),
            };
            match &e.children[..] {
                [l, r] => Ok(Sentence::binary(c, sentence(l)?, sentence(r)?)),
                _ => Err(e.children_error()),
            }
        }
        "quantifierSentence" => {
            let q = match e.attr("quantifier")? {
                "universal" => Quantifier::Universal,
                "existential" => Quantifier::Existential,
                q => return Err(invalid("quantifier", q)),
            };
            match &e.children[..] {
                [x, s] if x.name == "variable" => {
                    x.leaf()?;
                    Ok(Sentence::quantified(q, x.symbol()?, sentence(s)?))
                }
                [x, _] => Err(Error::UnexpectedElement(x.name.to_string())),
                _ => Err(e.children_error()),
            }
        }
        other => Err(Error::UnexpectedElement(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write() {
        let s = Sentence::parse("FORALL x -P(x, f(c))").unwrap();
        let expected = concat!(
            "<sentence>",
            r#"<quantifierSentence quantifier="universal">"#,
            r#"<variable symbol="x" />"#,
            r#"<unaryConnectorSentence connector="negation">"#,
            r#"<predicate symbol="P">"#,
            r#"<variable symbol="x" />"#,
            r#"<function symbol="f"><constant symbol="c" /></function>"#,
            "</predicate>",
            "</unaryConnectorSentence>",
            "</quantifierSentence>",
            "</sentence>"
        );
        assert_eq!(to_xml(&s), expected);
        assert_eq!(to_xml(&Sentence::Bool(false)), r#"<sentence><boolean value="false" /></sentence>"#);
    }

    #[test]
    fn read_formatted() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<sentence>
  <binaryConnectorSentence connector='disjunction'>
    <boolean value="true"/>
    <predicate symbol="Q"><variable symbol="y"></variable></predicate>
  </binaryConnectorSentence>
</sentence>
"#;
        let y = Term::variable("y").unwrap();
        let q = Sentence::predicate("Q", Vec::from([y])).unwrap();
        assert_eq!(from_xml(doc), Ok(Sentence::disjunction(Sentence::Bool(true), q)));
    }

    #[test]
    fn structure_errors() {
        let wrap = |s: &str| format!("<sentence>{}</sentence>", s);
        let unary = r#"<unaryConnectorSentence connector="negation"></unaryConnectorSentence>"#;
        assert!(matches!(from_xml(&wrap(unary)), Err(Error::Children { .. })));
        let pred = r#"<predicate symbol="P"></predicate>"#;
        assert!(matches!(from_xml(&wrap(pred)), Err(Error::Children { .. })));
        let conn = r#"<binaryConnectorSentence connector="xor"><boolean value="true" /><boolean value="true" /></binaryConnectorSentence>"#;
        assert_eq!(from_xml(&wrap(conn)), Err(invalid("connector", "xor")));
        let symb = r#"<constantPredicate />"#;
        assert!(matches!(from_xml(&wrap(symb)), Err(Error::MissingAttribute { .. })));
        let bad = r#"<constantPredicate symbol="a b" />"#;
        assert!(matches!(from_xml(&wrap(bad)), Err(Error::Grammar(_))));
        assert!(matches!(from_xml("<formula />"), Err(Error::UnexpectedElement(_))));
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(
            from_xml("<sentence><boolean value=\"true\" /></sentenc>"),
            Err(Error::Unclosed("sentence".to_string()))
        );
        assert!(matches!(from_xml("<sentence"), Err(Error::Syntax(_))));
        assert!(matches!(from_xml("<sentence>A</sentence>"), Err(Error::Unclosed(_))));
        let cdata = r#"<sentence><![CDATA[A]]><boolean value="true" /></sentence>"#;
        assert!(matches!(from_xml(cdata), Err(Error::Syntax(_))));
        let entity = r#"<sentence><constantPredicate symbol="&nbsp;" /></sentence>"#;
        assert!(matches!(from_xml(entity), Err(Error::Syntax(_))));
    }

    #[test]
    fn read_markup() {
        let doc = r#"<?xml version="1.0"?>
<!DOCTYPE sentence>
<!-- generated -->
<sentence><!-- a - b --><![CDATA[ ]]><boolean value="true" /></sentence>
<!-- end -->"#;
        assert_eq!(from_xml(doc), Ok(Sentence::Bool(true)));
    }

    #[test]
    fn read_references() {
        let doc = r#"<sentence><boolean value="&#116;ru&#x65;" /></sentence>"#;
        assert_eq!(from_xml(doc), Ok(Sentence::Bool(true)));
        let doc = r#"<sentence><binaryConnectorSentence connector='&#x69;mplication'><constantPredicate symbol="A" /><constantPredicate symbol="B" /></binaryConnectorSentence></sentence>"#;
        assert_eq!(from_xml(doc), Ok(Sentence::parse("A => B").unwrap()));
        assert_eq!(unescape(r#""&lt;&amp;&gt;&quot;&apos;""#).as_deref(), Some(r#"<&>"'"#));
        assert_eq!(unescape(r#""a & b""#), None);
    }
}
