//! Summary statistics over a run's latency samples.
//!
//! All samples are whole milliseconds. Every function returns `None` for an
//! empty log.

use serde::Serialize;

/// Integer-truncated arithmetic mean.
pub fn mean(samples: &[u64]) -> Option<u64> {
    if samples.is_empty() {
        return None;
    }
    let total: u128 = samples.iter().map(|&v| u128::from(v)).sum();
    Some((total / samples.len() as u128) as u64)
}

/// Population standard deviation measured around the truncated [`mean`].
pub fn std_deviation(samples: &[u64]) -> Option<f64> {
    let avg = mean(samples)? as f64;
    let squares: f64 = samples
        .iter()
        .map(|&v| (v as f64 - avg).powi(2))
        .sum();
    Some((squares / samples.len() as f64).sqrt())
}

pub fn maximum(samples: &[u64]) -> Option<u64> {
    samples.iter().copied().max()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyStats {
    pub mean_ms: u64,
    pub std_deviation_ms: f64,
    pub max_ms: u64,
}

impl LatencyStats {
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        Some(Self {
            mean_ms: mean(samples)?,
            std_deviation_ms: std_deviation(samples)?,
            max_ms: maximum(samples)?,
        })
    }

    /// Deviation rendered with two decimals.
    pub fn deviation_display(&self) -> String {
        format!("{:.2}", self.std_deviation_ms)
    }

    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!("average ping time {} millisecond", self.mean_ms),
            format!("deviation of ping time {} millisecond", self.deviation_display()),
            format!("longest ping time {} millisecond", self.max_ms),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_truncates() {
        assert_eq!(mean(&[10, 11]), Some(10));
        assert_eq!(mean(&[1, 2, 2]), Some(1));
        assert_eq!(mean(&[42]), Some(42));
    }

    #[test]
    fn maximum_picks_largest() {
        assert_eq!(maximum(&[5, 12, 3]), Some(12));
        assert_eq!(maximum(&[0]), Some(0));
    }

    #[test]
    fn deviation_uses_population_formula() {
        let stats = LatencyStats::from_samples(&[10, 20, 30]).unwrap();
        assert_eq!(stats.mean_ms, 20);
        assert_eq!(stats.deviation_display(), "8.16");
        assert_eq!(stats.max_ms, 30);
    }

    #[test]
    fn deviation_is_measured_from_truncated_mean() {
        // exact mean is 10.5, truncated is 10: sqrt((0 + 1) / 2)
        let dev = std_deviation(&[10, 11]).unwrap();
        assert_eq!(format!("{:.2}", dev), "0.71");
    }

    #[test]
    fn single_sample_has_no_spread() {
        let stats = LatencyStats::from_samples(&[7]).unwrap();
        assert_eq!(stats.deviation_display(), "0.00");
    }

    #[test]
    fn empty_log_yields_nothing() {
        assert_eq!(mean(&[]), None);
        assert_eq!(std_deviation(&[]), None);
        assert_eq!(maximum(&[]), None);
        assert!(LatencyStats::from_samples(&[]).is_none());
    }

    #[test]
    fn summary_lines_carry_units() {
        let lines = LatencyStats::from_samples(&[10, 20, 30]).unwrap().summary_lines();
        assert_eq!(lines[0], "average ping time 20 millisecond");
        assert_eq!(lines[1], "deviation of ping time 8.16 millisecond");
        assert_eq!(lines[2], "longest ping time 30 millisecond");
    }
}
