//! SQL script statement splitting
//!
//! Scripts are tokenized with `sqlparser` and cut on top-level `;` tokens, so
//! separators inside quoted identifiers, string literals (including
//! dollar-quoted and `E'...'` strings) and comments never end a statement.
//! Statement text is taken verbatim from the script; comments are replaced by
//! a single space and blank statements are skipped.

use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer, Whitespace};

/// Split a script into trimmed, non-empty statements.
///
/// A script the tokenizer rejects (e.g. an unterminated string) is returned
/// whole, so the database reports the real error.
pub fn split_statements(script: &str) -> Vec<String> {
    let dialect = GenericDialect {};
    let tokens = match Tokenizer::new(&dialect, script).tokenize_with_location() {
        Ok(tokens) => tokens,
        Err(e) => {
            log::warn!("SQL tokenizing failed, executing script as one statement: {}", e);
            let whole = script.trim();
            return if whole.is_empty() {
                Vec::new()
            } else {
                vec![whole.to_string()]
            };
        }
    };

    let source = SourceText::new(script);
    let mut statements = Vec::new();
    let mut current = String::new();
    for TokenWithSpan { token, span } in tokens {
        match token {
            Token::SemiColon => push_statement(&mut statements, &mut current),
            Token::Whitespace(
                Whitespace::SingleLineComment { .. } | Whitespace::MultiLineComment(_),
            ) => current.push(' '),
            Token::EOF => {}
            _ => current.push_str(source.slice(span.start, span.end)),
        }
    }
    push_statement(&mut statements, &mut current);
    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

/// Maps tokenizer locations (1-based line, 1-based char column) to byte offsets
struct SourceText<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
    fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    fn offset(&self, location: Location) -> usize {
        let Some(&line_start) = usize::try_from(location.line)
            .ok()
            .and_then(|line| line.checked_sub(1))
            .and_then(|index| self.line_starts.get(index))
        else {
            return self.text.len();
        };
        let column = usize::try_from(location.column.saturating_sub(1)).unwrap_or(usize::MAX);
        self.text[line_start..]
            .char_indices()
            .nth(column)
            .map_or(self.text.len(), |(i, _)| line_start + i)
    }

    /// Source text between two locations, end exclusive
    fn slice(&self, start: Location, end: Location) -> &'a str {
        let (start, end) = (self.offset(start), self.offset(end));
        self.text.get(start..end.max(start)).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
