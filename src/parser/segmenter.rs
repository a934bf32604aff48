use sqlparser::ast::Statement;
use sqlparser::dialect::Dialect;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::error::Error;
use crate::output::reporter::Reporter;

/// The result of parsing one terminator-delimited chunk of the input.
///
/// The segmenter never drops a chunk silently: every chunk surfaces either
/// as parsed statements or as a failure carrying its source text.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The chunk parsed to a statement.
    Parsed(Statement),
    /// The chunk could not be parsed under the declared dialect.
    Failed {
        /// Parser diagnostic for the chunk.
        reason: String,
        /// Source text of the chunk, reconstructed from its tokens.
        text: String,
    },
}

/// Splits a raw SQL script into independently parsed statements.
///
/// The input is tokenized once under the source dialect. Every top-level
/// statement terminator closes a chunk, and each chunk is handed to the
/// parser on its own, so a malformed statement (commonly the result of a
/// wrong dialect guess) is isolated as [`ParseOutcome::Failed`] instead of
/// taking the whole run down with it. Output order mirrors source order.
pub struct Segmenter<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter for the given source dialect.
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Segment `sql` into parse outcomes, in source order.
    ///
    /// Only a lexical failure of the whole input is fatal; parse failures are
    /// confined to their chunk.
    pub fn segment(&self, sql: &str) -> Result<Vec<ParseOutcome>, Error> {
        let tokens = Tokenizer::new(self.dialect, sql).tokenize()?;

        let mut outcomes = Vec::new();
        for chunk in chunk_tokens(&tokens) {
            match Parser::new(self.dialect)
                .with_tokens(chunk.to_vec())
                .parse_statements()
            {
                // A chunk of only whitespace and terminators parses to an
                // empty list and emits nothing.
                Ok(statements) => {
                    outcomes.extend(statements.into_iter().map(ParseOutcome::Parsed));
                }
                Err(reason) => outcomes.push(ParseOutcome::Failed {
                    reason: reason.to_string(),
                    text: chunk_text(chunk),
                }),
            }
        }
        Ok(outcomes)
    }
}

/// Split a token stream into chunks on statement terminators.
///
/// The terminator stays with the chunk it closes. A terminator that is the
/// last token overall does not open a trailing empty chunk.
fn chunk_tokens(tokens: &[Token]) -> Vec<&[Token]> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for (index, token) in tokens.iter().enumerate() {
        if *token == Token::SemiColon && index + 1 < tokens.len() {
            chunks.push(&tokens[start..=index]);
            start = index + 1;
        }
    }
    if start < tokens.len() {
        chunks.push(&tokens[start..]);
    }
    chunks
}

fn chunk_text(chunk: &[Token]) -> String {
    chunk.iter().map(ToString::to_string).collect()
}

/// Keep the parsed statements from `outcomes`, in order, reporting each
/// failed chunk through `reporter` before dropping it.
pub fn collect_parsed(outcomes: Vec<ParseOutcome>, reporter: &Reporter) -> Vec<Statement> {
    let mut statements = Vec::new();
    for outcome in outcomes {
        match outcome {
            ParseOutcome::Parsed(statement) => statements.push(statement),
            ParseOutcome::Failed { reason, text } => {
                reporter.warn(&format!(
                    "skipping unparseable chunk ({reason}): {}",
                    text.trim()
                ));
            }
        }
    }
    statements
}

#[cfg(test)]
mod tests {
    use sqlparser::dialect::GenericDialect;

    use super::*;

    fn tokens(sql: &str) -> Vec<Token> {
        Tokenizer::new(&GenericDialect {}, sql)
            .tokenize()
            .expect("test input should tokenize")
    }

    #[test]
    fn chunking_splits_on_interior_terminators_only() {
        let tokens = tokens("SELECT 1; SELECT 2;");
        let chunks = chunk_tokens(&tokens);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunk_text(chunks[0]), "SELECT 1;");
        assert_eq!(chunk_text(chunks[1]), " SELECT 2;");
    }

    #[test]
    fn chunking_without_terminator_yields_one_chunk() {
        let tokens = tokens("SELECT 1");
        assert_eq!(chunk_tokens(&tokens).len(), 1);
    }

    #[test]
    fn chunking_empty_input_yields_no_chunks() {
        assert!(chunk_tokens(&[]).is_empty());
    }
}
