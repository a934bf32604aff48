/// Statement-to-text rendering with typed options.
pub mod renderer;
/// Injectable progress and warning sink.
pub mod reporter;
/// Table-scoped section splitting of a statement sequence.
pub mod splitter;
