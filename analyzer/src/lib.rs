//! Parsers that turn package-manager output into structured diagnostics.
//!
//! This crate is the extraction engine behind the `pkg-insight` CLI. It
//! recovers a consistent entity model — targets, dependencies, issues — from
//! the structurally incompatible dialects a package manager prints:
//!
//! - [`manifest::ManifestParser`] — the `dump-package` JSON manifest, across
//!   a legacy flat schema and a newer array-encoded schema.
//! - [`tree::TreeParser`] — the box-drawing `show-dependencies` tree text.
//! - [`scan`] — simple line scanners for `resolve`, `describe`, and `update`
//!   logs.
//!
//! Malformed input degrades to issues on the result instead of failing;
//! every parse call is a pure function of its input string and always
//! returns a populated [`PackageAnalysis`].
//!
//! # Main entry points
//!
//! - [`analyze_auto`] — classify the input and run the matching parser,
//!   with the error pre-check applied first.
//! - [`analyze_output`] — run the parser for a known command kind.
//!
//! # Example
//!
//! ```
//! use pkg_insight_analyzer::analyze_auto;
//! use pkg_insight_core::CommandKind;
//!
//! let output = "\
//! Dependencies:
//! ├── swift-log (1.5.4)
//! └── swift-nio (2.65.0)
//! ";
//!
//! let analysis = analyze_auto(output, None);
//! assert_eq!(analysis.command, CommandKind::ShowDependencies);
//! assert!(analysis.success);
//! assert_eq!(analysis.dependency_count(), 2);
//! ```

pub mod classify;
pub mod error;
pub mod grammar;
pub mod manifest;
pub mod metrics;
pub mod scan;
pub mod tree;

pub use error::AnalyzeError;

use pkg_insight_core::{CommandKind, IssueKind, PackageAnalysis, PackageIssue, Severity};

/// Runs the parser for a known command kind.
///
/// `target` applies only to the manifest extractor; other parsers ignore it.
///
/// # Examples
///
/// ```
/// use pkg_insight_analyzer::analyze_output;
/// use pkg_insight_core::CommandKind;
///
/// let analysis = analyze_output(
///     CommandKind::DumpPackage,
///     r#"{"name": "EmptyPackage"}"#,
///     None,
/// );
/// assert!(analysis.success);
/// ```
pub fn analyze_output(
    kind: CommandKind,
    input: &str,
    target: Option<&str>,
) -> PackageAnalysis {
    match kind {
        CommandKind::DumpPackage => manifest::ManifestParser::new(input, target).parse(),
        CommandKind::ShowDependencies => tree::TreeParser::new(input).parse(),
        CommandKind::Resolve => scan::parse_resolve(input),
        CommandKind::Describe => scan::parse_describe(input),
        CommandKind::Update => scan::parse_update(input),
        CommandKind::Unknown => {
            let mut analysis = PackageAnalysis::new(CommandKind::Unknown);
            analysis.issues.push(PackageIssue::new(
                IssueKind::Unknown,
                Severity::Warning,
                "Output did not match any known package-manager command",
            ));
            analysis
        }
    }
}

/// Classifies the input and runs the matching parser.
///
/// The error pre-check takes priority: when the input carries explicit error
/// reports, the result is issue-only and no structural parser runs.
pub fn analyze_auto(input: &str, target: Option<&str>) -> PackageAnalysis {
    let kind = classify::classify_output(input);

    let errors = classify::scan_errors(input);
    if !errors.is_empty() {
        let mut analysis = PackageAnalysis::new(kind);
        analysis.success = false;
        analysis.issues = errors;
        return analysis;
    }

    analyze_output(kind, input, target)
}
