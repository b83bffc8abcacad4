//! Aggregates over performance snapshots for the monitoring header.

use crate::events::PerformanceSnapshot;

/// Mean of the last `window` values yielded by `values`, or `None` if
/// there are none. A window of zero means "all".
pub fn rolling_average<I>(values: I, window: usize) -> Option<f64>
where
    I: DoubleEndedIterator<Item = f64>,
{
    let take = if window == 0 { usize::MAX } else { window };
    let (sum, count) = values
        .rev()
        .take(take)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Rolling averages shown on the performance screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceSummary {
    pub tps: Option<f64>,
    pub mspt: Option<f64>,
    pub memory_used_mb: Option<f64>,
    pub memory_max_mb: Option<f64>,
    pub cpu_percent: Option<f64>,
    pub samples: usize,
}

impl PerformanceSummary {
    /// Summarize the newest `window` snapshots. Missing TPS/MSPT samples
    /// are skipped rather than counted as zero.
    pub fn from_snapshots<'a, I>(snapshots: I, window: usize) -> Self
    where
        I: DoubleEndedIterator<Item = &'a PerformanceSnapshot>,
    {
        let take = if window == 0 { usize::MAX } else { window };
        let recent: Vec<&PerformanceSnapshot> = snapshots.rev().take(take).collect();
        let avg = |f: &dyn Fn(&PerformanceSnapshot) -> Option<f64>| {
            rolling_average(recent.iter().rev().filter_map(|s| f(s)), 0)
        };

        Self {
            tps: avg(&|s| s.tps),
            mspt: avg(&|s| s.mspt),
            memory_used_mb: avg(&|s| Some(s.memory_used_mb)),
            memory_max_mb: recent.first().map(|s| s.memory_max_mb),
            cpu_percent: avg(&|s| Some(s.cpu_percent)),
            samples: recent.len(),
        }
    }

    /// Memory usage as a percentage of the maximum.
    pub fn memory_percent(&self) -> Option<f64> {
        match (self.memory_used_mb, self.memory_max_mb) {
            (Some(used), Some(max)) if max > 0.0 => Some(used / max * 100.0),
            _ => None,
        }
    }

    /// e.g. "2.1/4.0 GB"
    pub fn memory_display(&self) -> String {
        match (self.memory_used_mb, self.memory_max_mb) {
            (Some(used), Some(max)) => format!("{:.1}/{:.1} GB", used / 1024.0, max / 1024.0),
            _ => "-".to_string(),
        }
    }

    /// Server is struggling: TPS below 15 or MSPT above one tick.
    pub fn is_lagging(&self) -> bool {
        self.tps.is_some_and(|t| t < 15.0) || self.mspt.is_some_and(|m| m > 50.0)
    }
}

/// Format an optional metric with one decimal place, or "-".
pub fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tps: Option<f64>, mem: f64, cpu: f64) -> PerformanceSnapshot {
        PerformanceSnapshot {
            tps,
            memory_used_mb: mem,
            memory_max_mb: 4096.0,
            cpu_percent: cpu,
            ..Default::default()
        }
    }

    #[test]
    fn test_rolling_average_window() {
        let values = vec![1.0, 2.0, 3.0, 10.0];
        assert_eq!(rolling_average(values.iter().copied(), 2), Some(6.5));
        assert_eq!(rolling_average(values.iter().copied(), 0), Some(4.0));
        assert_eq!(rolling_average(std::iter::empty::<f64>(), 3), None);
    }

    #[test]
    fn test_summary_skips_missing_tps() {
        let snaps = vec![
            snap(Some(20.0), 1024.0, 10.0),
            snap(None, 2048.0, 20.0),
            snap(Some(10.0), 3072.0, 30.0),
        ];
        let summary = PerformanceSummary::from_snapshots(snaps.iter(), 0);
        assert_eq!(summary.tps, Some(15.0));
        assert_eq!(summary.mspt, None);
        assert_eq!(summary.memory_used_mb, Some(2048.0));
        assert_eq!(summary.cpu_percent, Some(20.0));
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.memory_percent(), Some(50.0));
        assert_eq!(summary.memory_display(), "2.0/4.0 GB");
    }

    #[test]
    fn test_summary_window_uses_newest() {
        let snaps = vec![snap(Some(5.0), 0.0, 0.0), snap(Some(20.0), 0.0, 0.0)];
        let summary = PerformanceSummary::from_snapshots(snaps.iter(), 1);
        assert_eq!(summary.tps, Some(20.0));
        assert!(!summary.is_lagging());
    }

    #[test]
    fn test_empty_summary() {
        let snaps: Vec<PerformanceSnapshot> = Vec::new();
        let summary = PerformanceSummary::from_snapshots(snaps.iter(), 10);
        assert_eq!(summary, PerformanceSummary::default());
        assert_eq!(metric(summary.tps), "-");
    }
}
