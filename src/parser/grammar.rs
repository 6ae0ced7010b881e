//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse script source code into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    // Numbers may carry a leading minus: `margin_top(-4)`
    let number = just(Token::Minus)
        .or_not()
        .then(select! { Token::Number(n) => n })
        .map(|(minus, n)| if minus.is_some() { -n } else { n });

    // Values: 10, -4, center, .center, a.bottom, [a, b]
    let value = recursive(|value| {
        let list = value
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(Value::List);

        let member = identifier
            .clone()
            .then_ignore(just(Token::Dot))
            .then(identifier.clone())
            .map(|(view, member)| Value::Member { view, member });

        let word = just(Token::Dot)
            .or_not()
            .ignore_then(identifier.clone())
            .map(|id| Value::Word(id.node));

        // member before word: both start with an identifier
        choice((number.map(Value::Number), list, member, word))
            .map_with(|v, e| Spanned::new(v, span_range(&e.span())))
            .boxed()
    });

    // label: value, or a bare value
    let argument = identifier
        .clone()
        .then_ignore(just(Token::Colon))
        .or_not()
        .then(value)
        .map_with(|(label, value), e| Spanned::new(Argument { label, value }, span_range(&e.span())));

    let modifier_block = argument
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let arg_list = argument
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose));

    // view name [modifiers] { children }
    let view_decl = recursive(|view_decl| {
        just(Token::View)
            .ignore_then(identifier.clone())
            .then(modifier_block.clone().or_not())
            .then(
                view_decl
                    .repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
                    .or_not(),
            )
            .map_with(|((name, modifiers), children), e| {
                Spanned::new(
                    ViewDecl {
                        name,
                        modifiers: modifiers.unwrap_or_default(),
                        children: children.unwrap_or_default(),
                    },
                    span_range(&e.span()),
                )
            })
            .boxed()
    });

    let direction_decl = just(Token::Direction).ignore_then(identifier.clone());

    // subject.call(args).call(args)
    let call = just(Token::Dot)
        .ignore_then(identifier.clone())
        .then(arg_list)
        .map_with(|(name, args), e| Spanned::new(Call { name, args }, span_range(&e.span())));

    let chain = identifier
        .then(call.repeated().at_least(1).collect::<Vec<_>>())
        .map(|(subject, calls)| PinChain { subject, calls });

    let statement = choice((
        view_decl.map(|v: Spanned<ViewDecl>| Statement::View(v.node)),
        direction_decl.map(Statement::Direction),
        chain.map(Statement::Chain),
    ))
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    statement
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Document { statements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single_chain(input: &str) -> PinChain {
        let doc = parse(input).expect("Should parse");
        assert_eq!(doc.statements.len(), 1);
        match doc.statements.into_iter().next().map(|s| s.node) {
            Some(Statement::Chain(c)) => c,
            other => panic!("Expected chain, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_view() {
        let doc = parse("view root [width: 400, height: 300]").expect("Should parse");
        match &doc.statements[0].node {
            Statement::View(v) => {
                assert_eq!(v.name.node.as_str(), "root");
                assert_eq!(v.modifiers.len(), 2);
                assert_eq!(
                    v.modifiers[0].node.label.as_ref().map(|l| l.node.as_str()),
                    Some("width")
                );
                assert_eq!(v.modifiers[1].node.value.node, Value::Number(300.0));
                assert!(v.children.is_empty());
            }
            other => panic!("Expected view, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_views() {
        let doc = parse("view root { view a [x: 1] view b { view c } }").expect("Should parse");
        match &doc.statements[0].node {
            Statement::View(v) => {
                let names: Vec<_> = v.children.iter().map(|c| c.node.name.node.as_str()).collect();
                assert_eq!(names, vec!["a", "b"]);
                assert_eq!(v.children[1].node.children[0].node.name.node.as_str(), "c");
            }
            other => panic!("Expected view, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_direction() {
        let doc = parse("direction rtl").expect("Should parse");
        match &doc.statements[0].node {
            Statement::Direction(d) => assert_eq!(d.node.as_str(), "rtl"),
            other => panic!("Expected direction, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_chain_with_list_and_alignment() {
        let chain = single_chain("label.after(of: [a, b], aligned: .top).margin_left(-4)");
        assert_eq!(chain.subject.node.as_str(), "label");
        assert_eq!(chain.calls.len(), 2);

        let after = &chain.calls[0].node;
        assert_eq!(after.name.node.as_str(), "after");
        match after.labeled("of").map(|a| &a.node.value.node) {
            Some(Value::List(items)) => assert_eq!(items.len(), 2),
            other => panic!("Expected list, got {:?}", other),
        }
        assert_eq!(
            after.labeled("aligned").map(|a| &a.node.value.node),
            Some(&Value::Word(Identifier::new("top")))
        );

        let margin = &chain.calls[1].node;
        assert_eq!(
            margin.positional().next().map(|a| &a.node.value.node),
            Some(&Value::Number(-4.0))
        );
    }

    #[test]
    fn test_parse_member_reference() {
        let chain = single_chain("b.top(to: a.bottom)");
        match &chain.calls[0].node.args[0].node.value.node {
            Value::Member { view, member } => {
                assert_eq!(view.node.as_str(), "a");
                assert_eq!(member.node.as_str(), "bottom");
            }
            other => panic!("Expected member, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_call() {
        let chain = single_chain("a.center_in_parent()");
        assert!(chain.calls[0].node.args.is_empty());
    }

    #[test]
    fn test_parse_multiple_statements() {
        let doc = parse(
            "view root { view a view b }\nb.below(of: a)\na.left(10).top(4)\ndirection ltr",
        )
        .expect("Should parse");
        assert_eq!(doc.statements.len(), 4);
        assert!(matches!(doc.statements[2].node, Statement::Chain(_)));
    }

    #[test]
    fn test_chain_spans() {
        let input = "a.left(10)";
        let doc = parse(input).expect("Should parse");
        assert_eq!(doc.statements[0].span, 0..input.len());
    }

    #[test]
    fn test_bare_subject_is_error() {
        assert!(parse("a").is_err());
    }

    #[test]
    fn test_unclosed_call_is_error() {
        let errs = parse("a.left(10").unwrap_err();
        assert!(!errs.is_empty());
    }

    #[test]
    fn test_keyword_as_name_is_error() {
        assert!(parse("view view").is_err());
    }
}
