use core::fmt::{self, Display};
use logos::Logos;

#[derive(Logos, Clone, Debug, PartialEq)]
pub enum Token<'s> {
    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("AND")]
    And,

    #[token("OR")]
    Or,

    #[token("=>")]
    Imp,

    #[token("<=>")]
    Iff,

    #[token("-")]
    Neg,

    #[token("FORALL")]
    Forall,

    #[token("EXISTS")]
    Exists,

    #[token("(")]
    LPar,

    #[token(")")]
    RPar,

    #[token(",")]
    Comma,

    #[regex("[a-zA-Z0-9_][a-zA-Z0-9_']*")]
    Ident(&'s str),

    #[regex(r"[ \t\r\n\f]+")]
    Space,

    // Logos requires one token variant to handle errors,
    // it can be named anything you wish.
    #[error]
    Error,
}

impl<'s> Display for Token<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let s = match self {
            Self::True => "true",
            Self::False => "false",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Imp => "=>",
            Self::Iff => "<=>",
            Self::Neg => "-",
            Self::Forall => "FORALL",
            Self::Exists => "EXISTS",
            Self::LPar => "(",
            Self::RPar => ")",
            Self::Comma => ",",
            Self::Ident(s) => s,
            Self::Space => " ",
            Self::Error => return Err(Default::default()),
        };
        s.fmt(f)
    }
}

#[test]
fn keywords() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = crate::lex("FORALL x (P(x) AND trueish)").collect();
    assert_eq!(
        tokens,
        [
            Token::Forall,
            Token::Ident("x"),
            Token::LPar,
            Token::Ident("P"),
            Token::LPar,
            Token::Ident("x"),
            Token::RPar,
            Token::And,
            Token::Ident("trueish"),
            Token::RPar,
        ]
    );
    let tokens: Vec<_> = crate::lex("-A <=> B => C").collect();
    assert_eq!(tokens[0], Token::Neg);
    assert_eq!(tokens[2], Token::Iff);
    assert_eq!(tokens[4], Token::Imp);
}
