//! JSON rendering of listing results

use crate::models::ListEntry;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Shape of the list document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListEnvelope {
    /// A standard JSON array
    #[default]
    Array,

    /// The array printed one token per line with no indentation, then its
    /// brackets swapped for braces. Not valid JSON for more than one entry;
    /// kept for consumers that parse the old output.
    Legacy,
}

impl ListEnvelope {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            Self::Legacy
        } else {
            Self::Array
        }
    }
}

/// Renders `entries` in the requested envelope
///
/// # Example
///
/// ```
/// use newsline_crawler::output::{render_list, ListEnvelope};
///
/// assert_eq!(render_list(&[], ListEnvelope::Array).unwrap(), "[]");
/// assert_eq!(render_list(&[], ListEnvelope::Legacy).unwrap(), "{}");
/// ```
pub fn render_list(entries: &[ListEntry], envelope: ListEnvelope) -> serde_json::Result<String> {
    match envelope {
        ListEnvelope::Array => serde_json::to_string(entries),
        ListEnvelope::Legacy => {
            let flat = to_unindented(&entries)?;
            Ok(swap_outer_brackets(&flat))
        }
    }
}

/// Pretty-prints with newlines between tokens but no indentation
fn to_unindented<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b""));
    value.serialize(&mut serializer)?;

    // serde_json only writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn swap_outer_brackets(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    format!("{{{}}}", chars.as_str())
}
