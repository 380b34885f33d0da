//! Command-kind classification and the error-presence pre-check.
//!
//! Classification is coarse keyword sniffing over the raw input; the
//! structural parsers never detect their own dialect and can be invoked
//! directly with a known kind.

use tracing::debug;

use pkg_insight_core::{CommandKind, IssueKind, PackageIssue, Severity};

/// Keywords whose presence anywhere marks resolution-log output.
const RESOLVE_MARKERS: [&str; 4] = ["resolving", "fetching", "resolved", "updating"];

/// Keywords whose presence anywhere marks update-log output.
const UPDATE_MARKERS: [&str; 3] = ["updating", "updated", "checking out"];

/// Substrings that mark a line as an error report from the package manager.
const ERROR_MARKERS: [&str; 5] = ["error:", "failed", "cannot", "unable to", "invalid"];

/// Guesses which sub-command produced the given output.
///
/// Checks run in a fixed order and the first match wins: a JSON manifest
/// (both `"name"` and `"targets"` present), tree-drawing glyphs, resolve
/// keywords, describe key prefixes, update keywords, else unknown.
///
/// # Examples
///
/// ```
/// use pkg_insight_analyzer::classify::classify_output;
/// use pkg_insight_core::CommandKind;
///
/// assert_eq!(
///     classify_output("├── swift-log (1.5.4)"),
///     CommandKind::ShowDependencies
/// );
/// assert_eq!(classify_output("gibberish"), CommandKind::Unknown);
/// ```
pub fn classify_output(input: &str) -> CommandKind {
    let lower = input.to_lowercase();

    let kind = if input.contains("\"name\"") && input.contains("\"targets\"") {
        CommandKind::DumpPackage
    } else if input
        .chars()
        .any(|ch| matches!(ch, '│' | '├' | '└' | '─'))
    {
        CommandKind::ShowDependencies
    } else if RESOLVE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        CommandKind::Resolve
    } else if lower.contains("package name:") || lower.contains("package version:") {
        CommandKind::Describe
    } else if UPDATE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        CommandKind::Update
    } else {
        CommandKind::Unknown
    };

    debug!(?kind, "Classified package-manager output");
    kind
}

/// Scans for error reports that should short-circuit structural parsing.
///
/// Returns one issue per matching line. A non-empty result takes priority
/// over the structural parsers: the caller builds an issue-only analysis
/// from it instead of parsing.
///
/// # Examples
///
/// ```
/// use pkg_insight_analyzer::classify::scan_errors;
///
/// let issues = scan_errors("error: no such package\n├── ok (1.0.0)");
/// assert_eq!(issues.len(), 1);
/// assert!(scan_errors("├── ok (1.0.0)").is_empty());
/// ```
pub fn scan_errors(input: &str) -> Vec<PackageIssue> {
    let mut issues = Vec::new();
    for line in input.lines() {
        let lower = line.to_lowercase();
        if !ERROR_MARKERS.iter().any(|marker| lower.contains(marker)) {
            continue;
        }
        let kind = if lower.contains("network") || lower.contains("connection") {
            IssueKind::NetworkError
        } else {
            IssueKind::DependencyError
        };
        issues.push(PackageIssue::new(kind, Severity::Error, line.trim()));
    }
    issues
}
