//! Output rendering for analysis results.

use chrono::Utc;
use pkg_insight_core::PackageAnalysis;

/// Supported output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// The full analysis as pretty-printed JSON.
    Full,
    /// A reduced summary: command, success, and entity counts.
    Summary,
    /// The full analysis wrapped with a generation timestamp.
    Detailed,
}

/// Renders an analysis in the requested output format.
pub fn format_analysis(
    analysis: &PackageAnalysis,
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Full => serde_json::to_string_pretty(analysis)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Summary => {
            let summary = serde_json::json!({
                "command": analysis.command,
                "success": analysis.success,
                "target_count": analysis.target_count(),
                "dependency_count": analysis.dependency_count(),
                "issue_count": analysis.issues.len(),
            });
            serde_json::to_string_pretty(&summary)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        OutputFormat::Detailed => {
            let detailed = serde_json::json!({
                "generated_at": Utc::now().to_rfc3339(),
                "analysis": analysis,
            });
            serde_json::to_string_pretty(&detailed)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
    }
}
