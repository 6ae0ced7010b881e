//! Lexer for the pin script language using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Keywords. Operation, edge and alignment names are plain identifiers.
    #[token("view")]
    View,
    #[token("direction")]
    Direction,

    #[token("-")]
    Minus,

    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    BlockComment,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::View => write!(f, "view"),
            Token::Direction => write!(f, "direction"),
            Token::Minus => write!(f, "-"),
            Token::BraceOpen => write!(f, "{{"),
            Token::BraceClose => write!(f, "}}"),
            Token::BracketOpen => write!(f, "["),
            Token::BracketClose => write!(f, "]"),
            Token::ParenOpen => write!(f, "("),
            Token::ParenClose => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Dot => write!(f, "."),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Number(n) => write!(f, "{}", n),
            Token::LineComment | Token::BlockComment => write!(f, "comment"),
        }
    }
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(tokens("view direction"), vec![Token::View, Token::Direction]);
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            tokens("views direction_x"),
            vec![
                Token::Ident("views".to_string()),
                Token::Ident("direction_x".to_string())
            ]
        );
    }

    #[test]
    fn test_chain() {
        assert_eq!(
            tokens("b.below(of: [a, c])"),
            vec![
                Token::Ident("b".to_string()),
                Token::Dot,
                Token::Ident("below".to_string()),
                Token::ParenOpen,
                Token::Ident("of".to_string()),
                Token::Colon,
                Token::BracketOpen,
                Token::Ident("a".to_string()),
                Token::Comma,
                Token::Ident("c".to_string()),
                Token::BracketClose,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            tokens("view // comment\n/* block */ a"),
            vec![Token::View, Token::Ident("a".to_string())]
        );
    }

    #[test]
    fn test_block_comments_with_extra_stars() {
        assert_eq!(
            tokens("/* note **/ a /** doc */ b /**/ c /* x * y */ d"),
            vec![
                Token::Ident("a".to_string()),
                Token::Ident("b".to_string()),
                Token::Ident("c".to_string()),
                Token::Ident("d".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("42 3.5 -10"),
            vec![
                Token::Number(42.0),
                Token::Number(3.5),
                Token::Minus,
                Token::Number(10.0)
            ]
        );
    }

    #[test]
    fn test_spans() {
        let spans: Vec<_> = lex("view a").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..4, 5..6]);
    }
}
