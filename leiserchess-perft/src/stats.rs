//! Perft run statistics.

use std::time::{Duration, Instant};

/// Format a duration as HH:MM:SS.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Leaf count and timing for one depth.
#[derive(Debug, Clone, Copy)]
pub struct DepthResult {
    pub depth: u32,
    pub leaves: u64,
    pub elapsed: Duration,
}

impl DepthResult {
    /// Leaves per second
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.leaves as f64 / secs
        } else {
            0.0
        }
    }
}

/// Statistics collected across a run.
#[derive(Debug)]
pub struct PerftStats {
    /// Completed depths, shallowest first
    pub results: Vec<DepthResult>,
    start_time: Instant,
}

impl PerftStats {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Record a finished depth and print its line.
    pub fn record(&mut self, result: DepthResult) {
        println!(
            "perft {:2} {:>14}   [{}] {:.0} leaves/s",
            result.depth,
            result.leaves,
            format_elapsed(self.start_time.elapsed()),
            result.rate(),
        );
        self.results.push(result);
    }

    /// Growth factor between the last two completed depths.
    pub fn branching_factor(&self) -> Option<f64> {
        match self.results.as_slice() {
            [.., prev, last] if prev.leaves > 0 => Some(last.leaves as f64 / prev.leaves as f64),
            _ => None,
        }
    }

    /// Print final summary
    pub fn print_summary(&self) {
        let total: u64 = self.results.iter().map(|r| r.leaves).sum();
        let elapsed = self.start_time.elapsed();
        println!("Depths completed: {}", self.results.len());
        println!("Leaves counted: {}", total);
        if let Some(factor) = self.branching_factor() {
            println!("Branching factor: {:.1}", factor);
        }
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        if elapsed.as_secs_f64() > 0.0 {
            println!(
                "Average rate: {:.0} leaves/sec",
                total as f64 / elapsed.as_secs_f64()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "01:02:05");
    }

    #[test]
    fn test_branching_factor() {
        let mut stats = PerftStats::new();
        assert_eq!(stats.branching_factor(), None);
        for (depth, leaves) in [(1, 72), (2, 5156)] {
            stats.results.push(DepthResult {
                depth,
                leaves,
                elapsed: Duration::from_millis(1),
            });
        }
        let factor = stats.branching_factor().unwrap();
        assert!((factor - 5156.0 / 72.0).abs() < 1e-9);
    }
}
