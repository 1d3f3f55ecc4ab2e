//! Integration tests for Newsline
//!
//! These tests serve listing and article pages from wiremock servers and run
//! the crawler, the extraction pool and the tool surface over the HTTP provider.

mod common;
mod extraction_tests;
mod listing_tests;
mod tools_tests;
