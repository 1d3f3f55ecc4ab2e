//! Timing report for the `bench` command

use std::time::Duration;

/// One listing crawl measured for a given window
#[derive(Debug, Clone)]
pub struct ListTiming {
    pub hours: u32,
    pub result: Result<usize, String>,
    pub elapsed: Duration,
}

/// One extraction batch
#[derive(Debug, Clone)]
pub struct BatchTiming {
    pub total: usize,
    pub result: Result<usize, String>,
    pub elapsed: Duration,
}

/// Everything the bench command measured
#[derive(Debug, Clone, Default)]
pub struct BenchReport {
    pub listing: Vec<ListTiming>,
    pub urls: Vec<String>,
    pub concurrent: Option<BatchTiming>,
    pub sequential: Option<BatchTiming>,
}

impl BenchReport {
    /// Sequential time divided by concurrent time, when both batches succeeded
    pub fn speedup(&self) -> Option<f64> {
        match (&self.concurrent, &self.sequential) {
            (Some(concurrent), Some(sequential))
                if concurrent.result.is_ok()
                    && sequential.result.is_ok()
                    && !concurrent.elapsed.is_zero() =>
            {
                Some(sequential.elapsed.as_secs_f64() / concurrent.elapsed.as_secs_f64())
            }
            _ => None,
        }
    }
}

/// Items per second, zero when nothing was timed
pub fn rate(count: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

/// Prints the report to stdout
///
/// # Arguments
///
/// * `report` - The measurements to display
pub fn print_bench_report(report: &BenchReport) {
    println!("=== Listing Crawl ===\n");
    for run in &report.listing {
        match &run.result {
            Ok(count) => println!(
                "  {:>3}h window: {} articles in {:.2}s ({:.1} articles/s)",
                run.hours,
                count,
                run.elapsed.as_secs_f64(),
                rate(*count, run.elapsed)
            ),
            Err(e) => println!("  {:>3}h window: failed: {}", run.hours, e),
        }
    }
    println!();

    if report.urls.is_empty() {
        return;
    }

    println!("=== Content Extraction ({} URLs) ===\n", report.urls.len());
    for (index, url) in report.urls.iter().enumerate() {
        println!("  {}. {}", index + 1, url);
    }
    println!();

    for (label, timing) in [("Concurrent", &report.concurrent), ("Sequential", &report.sequential)] {
        let Some(timing) = timing else {
            continue;
        };
        match &timing.result {
            Ok(succeeded) => println!(
                "  {}: {}/{} articles in {:.2}s ({:.1} articles/s)",
                label,
                succeeded,
                timing.total,
                timing.elapsed.as_secs_f64(),
                rate(*succeeded, timing.elapsed)
            ),
            Err(e) => println!("  {}: failed: {}", label, e),
        }
    }

    if let Some(speedup) = report.speedup() {
        let saved = (1.0 - 1.0 / speedup) * 100.0;
        println!();
        println!("Speedup: {:.1}x ({:.1}% less wall time)", speedup, saved);
    }
}
