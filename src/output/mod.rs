//! Output module for rendering results
//!
//! This module handles:
//! - Rendering listing results as JSON, in the array or the legacy envelope
//! - Printing the timing report of the `bench` command

mod json;
mod report;

pub use json::{render_list, ListEnvelope};
pub use report::{print_bench_report, rate, BatchTiming, BenchReport, ListTiming};
