/// Dialect name resolution.
pub mod dialect;
/// Terminator-based statement segmentation with per-chunk fault isolation.
pub mod segmenter;
