use sqlparser::dialect::{Dialect, dialect_from_str};

use crate::error::Error;

/// Source dialect assumed when the caller does not name one.
pub const DEFAULT_DIALECT: &str = "mysql";

/// Resolve a dialect name (e.g. `mysql`, `postgres`, `generic`) to a parser
/// dialect.
///
/// An unknown name is a configuration error: the request itself is
/// ill-formed, so the whole invocation fails before any input is read.
pub fn resolve(name: &str) -> Result<Box<dyn Dialect>, Error> {
    dialect_from_str(name).ok_or_else(|| Error::UnknownDialect(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_known_dialects() {
        assert!(resolve("mysql").is_ok());
        assert!(resolve("postgres").is_ok());
        assert!(resolve("generic").is_ok());
    }

    #[test]
    fn resolve_rejects_unknown_dialects() {
        let err = resolve("clipper").expect_err("unknown dialect should fail");
        assert_eq!(err.to_string(), "unknown dialect `clipper`");
    }
}
