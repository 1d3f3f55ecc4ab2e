//! HTML extraction
//!
//! Pure functions over serialized documents. Nothing here touches the network;
//! the crawler and the coordinator load pages through a session and hand the
//! source to these extractors.

mod content;
mod links;
mod matcher;
mod text;

pub use content::ContentExtractor;
pub use links::{parse_datetime, LinkCandidate, LinkExtractor, Timestamp};
pub use matcher::{FieldSource, Matcher, MatcherChain};
pub use text::{block_text, normalize_lines, raw_text, visible_text};
