use crate::ast::lexer::{Extras, Token};
use logos::Logos;
use std::{borrow::Cow, ops::Range};

/// Strips every empty block, a `{` followed by nothing but whitespace and a `}`, from query text.
///
/// Blocks are found using the query language's lexer, so braces inside of strings and comments
/// are left alone. When the text contains no empty blocks it's returned as is.
///
/// ```
/// use graphql_query_builder::editor::heal;
///
/// assert_eq!(heal("query Draft {}"), "query Draft ");
/// assert_eq!(heal("{ user(name: \"{}\") }"), "{ user(name: \"{}\") }");
/// ```
pub fn heal(query: &str) -> Cow<'_, str> {
    let arena = bumpalo::Bump::new();
    let mut lexer = Token::lexer_with_extras(query, Extras { arena: &arena });
    let mut open: Option<Range<usize>> = None;
    let mut blocks: Vec<Range<usize>> = Vec::new();
    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Token::BraceOpen => open = Some(span),
            Token::BraceClose => {
                if let Some(open) = open.take() {
                    let inner = &query[open.end..span.start];
                    if inner.chars().all(char::is_whitespace) {
                        blocks.push(open.start..span.end);
                    }
                }
            }
            _ => open = None,
        }
    }

    if blocks.is_empty() {
        return Cow::Borrowed(query);
    }

    let mut healed = String::with_capacity(query.len());
    let mut offset = 0;
    for block in blocks {
        healed.push_str(&query[offset..block.start]);
        offset = block.end;
    }
    healed.push_str(&query[offset..]);
    Cow::Owned(healed)
}
