use std::fmt;

/// Errors surfaced by this crate's narrow, mostly-unreachable-by-design
/// taxonomy.
///
/// Update application itself cannot fail: `ADD`/`REMOVE`/`SET` are total
/// functions over the per-source map (a missing name in `REMOVE` is a no-op,
/// not an error). This enum exists for the one class of failure a caller can
/// actually hit — malformed configuration — kept intentionally narrow rather
/// than grown to cover cases the type system already rules out.
#[derive(Debug, Clone, PartialEq)]
pub enum MuxError {
    /// `MuxConfig` could not be read or parsed from the given path.
    Config(String),
}

impl fmt::Display for MuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuxError::Config(msg) => write!(f, "invalid mux configuration: {}", msg),
        }
    }
}

impl std::error::Error for MuxError {}
