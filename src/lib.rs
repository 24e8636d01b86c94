pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod segment;
pub mod session;
pub mod theme;

pub use document::Document;
pub use error::{EditError, SegmentationError, SessionError};
pub use segment::{Segmenter, SentenceSpan, UnicodeSegmenter};
pub use session::{EditSession, MatchSet, ReplaceOutcome, SearchTerms, apply_filter};
