//! URL handling module for Newsline
//!
//! This module resolves anchor hrefs against the listing page and decides which
//! of them point at articles.

mod pattern;
mod resolve;

// Re-export main functions
pub use pattern::ArticleUrlPattern;
pub use resolve::{last_path_segment, resolve_link};
