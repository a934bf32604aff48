use std::cell::RefCell;

use colored::Colorize;

/// Destination for progress notes and warnings.
///
/// Components receive a `Reporter` instead of writing to stderr themselves,
/// so library callers can silence diagnostics or capture them in tests.
/// Warnings never interleave with stdout output: transforms print their
/// result to stdout while the reporter stays on stderr.
pub struct Reporter {
    sink: Sink,
}

enum Sink {
    Stderr,
    Silent,
    Memory(RefCell<Vec<String>>),
}

impl Reporter {
    /// Report to stderr, colorized.
    pub fn stderr() -> Self {
        Self { sink: Sink::Stderr }
    }

    /// Discard everything.
    pub fn silent() -> Self {
        Self { sink: Sink::Silent }
    }

    /// Capture lines in memory; read them back with [`Reporter::lines`].
    pub fn memory() -> Self {
        Self {
            sink: Sink::Memory(RefCell::new(Vec::new())),
        }
    }

    /// Record a progress note.
    pub fn note(&self, message: &str) {
        match &self.sink {
            Sink::Stderr => eprintln!("{}", format!(">> {message}").blue()),
            Sink::Silent => {}
            Sink::Memory(lines) => lines.borrow_mut().push(format!(">> {message}")),
        }
    }

    /// Record a recoverable problem that was skipped over.
    pub fn warn(&self, message: &str) {
        match &self.sink {
            Sink::Stderr => eprintln!("{}", format!("!! {message}").yellow()),
            Sink::Silent => {}
            Sink::Memory(lines) => lines.borrow_mut().push(format!("!! {message}")),
        }
    }

    /// Lines captured by a memory reporter; empty for the other sinks.
    pub fn lines(&self) -> Vec<String> {
        match &self.sink {
            Sink::Memory(lines) => lines.borrow().clone(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reporter_captures_notes_and_warnings() {
        let reporter = Reporter::memory();
        reporter.note("tokenizing");
        reporter.warn("skipping chunk");
        assert_eq!(reporter.lines(), vec![">> tokenizing", "!! skipping chunk"]);
    }

    #[test]
    fn silent_reporter_captures_nothing() {
        let reporter = Reporter::silent();
        reporter.note("tokenizing");
        assert!(reporter.lines().is_empty());
    }
}
