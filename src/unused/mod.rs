//! Unused text label detection.
mod matcher;
mod scanner;

pub use matcher::{
    MatcherError,
    SOURCE_PATTERNS,
    SourceMatcher,
};
pub use scanner::{
    KNOWN_USED,
    ScanError,
    UnusedScanner,
};
