//! Configuration module for Newsline
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional and fall back to the defaults used by the listing crawler
//! and the extraction pool.
//!
//! # Example
//!
//! ```no_run
//! use newsline_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("newsline.toml")).unwrap();
//! println!("Extraction will use {} workers", config.extraction.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ExtractionConfig, ListingConfig, ProviderConfig, ProviderKind};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
