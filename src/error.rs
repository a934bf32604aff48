use sqlparser::tokenizer::TokenizerError;
use thiserror::Error;

/// Failures that abort an invocation.
///
/// A statement chunk that fails to parse is deliberately not represented
/// here: it is data
/// ([`ParseOutcome::Failed`](crate::parser::segmenter::ParseOutcome)),
/// reported and skipped so the rest of the input still goes through.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested dialect name is not known to the SQL front end.
    #[error("unknown dialect `{0}`")]
    UnknownDialect(String),

    /// The table name pattern given to the rename transform is not a valid
    /// regular expression.
    #[error("invalid table name pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The input could not be tokenized under the declared dialect, so there
    /// are no statement boundaries to recover at.
    #[error("tokenization failed: {0}")]
    Tokenize(#[from] TokenizerError),

    /// Reading the input or writing an output file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
