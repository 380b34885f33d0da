//! Cosmetic complexity and timing-estimate heuristics.
//!
//! Buckets are derived from the recovered dependency count alone; they feed
//! the metrics block the CLI attaches after parsing and carry no semantic
//! weight.

use std::time::Duration;

use pkg_insight_core::{ComplexityBucket, PackageAnalysis, PackageMetrics};

/// Buckets an analysis by its dependency count.
///
/// No dependency summary at all maps to `Unknown`; 0-5 dependencies are
/// `Low`, 6-20 `Medium`, more is `High`.
pub fn complexity_of(analysis: &PackageAnalysis) -> ComplexityBucket {
    let Some(deps) = &analysis.dependencies else {
        return ComplexityBucket::Unknown;
    };
    match deps.count {
        0..=5 => ComplexityBucket::Low,
        6..=20 => ComplexityBucket::Medium,
        _ => ComplexityBucket::High,
    }
}

/// Human-readable indexing-time estimate for a bucket.
pub fn estimated_indexing_time(bucket: ComplexityBucket) -> Option<&'static str> {
    match bucket {
        ComplexityBucket::Low => Some("under 10 seconds"),
        ComplexityBucket::Medium => Some("10-60 seconds"),
        ComplexityBucket::High => Some("1-5 minutes"),
        ComplexityBucket::Unknown => None,
    }
}

/// Builds the metrics block for a parsed analysis.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pkg_insight_analyzer::metrics::build_metrics;
/// use pkg_insight_core::{CommandKind, PackageAnalysis};
///
/// let analysis = PackageAnalysis::new(CommandKind::Unknown);
/// let metrics = build_metrics(&analysis, Duration::from_millis(12));
/// assert_eq!(metrics.parse_duration_ms, 12);
/// ```
pub fn build_metrics(analysis: &PackageAnalysis, parse_duration: Duration) -> PackageMetrics {
    let complexity = complexity_of(analysis);
    PackageMetrics {
        parse_duration_ms: parse_duration.as_millis() as u64,
        complexity,
        estimated_indexing_time: estimated_indexing_time(complexity).map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_insight_core::{
        CommandKind, DependencyAnalysis, DependencyKind, ExternalDependency,
    };

    fn analysis_with_deps(count: usize) -> PackageAnalysis {
        let external = (0..count)
            .map(|i| {
                ExternalDependency::new(
                    format!("dep{i}"),
                    "1.0.0",
                    DependencyKind::SourceControl,
                )
            })
            .collect();
        let mut analysis = PackageAnalysis::new(CommandKind::ShowDependencies);
        analysis.dependencies = Some(DependencyAnalysis::from_parts(external, Vec::new(), false));
        analysis
    }

    #[test]
    fn test_complexity_buckets() {
        assert_eq!(
            complexity_of(&PackageAnalysis::new(CommandKind::Unknown)),
            ComplexityBucket::Unknown
        );
        assert_eq!(complexity_of(&analysis_with_deps(0)), ComplexityBucket::Low);
        assert_eq!(complexity_of(&analysis_with_deps(5)), ComplexityBucket::Low);
        assert_eq!(
            complexity_of(&analysis_with_deps(6)),
            ComplexityBucket::Medium
        );
        assert_eq!(
            complexity_of(&analysis_with_deps(21)),
            ComplexityBucket::High
        );
    }

    #[test]
    fn test_unknown_bucket_has_no_estimate() {
        assert!(estimated_indexing_time(ComplexityBucket::Unknown).is_none());
        assert!(estimated_indexing_time(ComplexityBucket::High).is_some());
    }
}
