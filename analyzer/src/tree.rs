//! Parser for tree-formatted `show-dependencies` output.
//!
//! Walks the input once, line by line, applying the dependency-line grammar
//! and classifying everything else as error/warning lines or local-dependency
//! candidates. Two whole-input heuristics run after the scan: version
//! conflict grouping and circular-dependency detection.
//!
//! Success for this parser blocks on `error` *and* `critical` issues, unlike
//! the manifest extractor which blocks on `critical` only. The two rules are
//! observably different contracts and must not be unified.

use tracing::debug;

use pkg_insight_core::{
    CommandKind, DependencyAnalysis, ExternalDependency, IssueKind, LocalDependency,
    PackageAnalysis, PackageIssue, Severity,
};

use crate::grammar::{UNSPECIFIED_VERSION, is_tree_glyph, parse_dependency_line};

/// Header markers that never carry dependency information.
const HEADER_MARKERS: [&str; 2] = ["Dependencies:", "Package:"];

/// Parser for `show-dependencies` tree output.
///
/// # Examples
///
/// ```
/// use pkg_insight_analyzer::tree::TreeParser;
///
/// let output = "\
/// Dependencies:
/// ├── swift-log (1.5.4)
/// └── swift-nio (2.65.0)
/// ";
/// let analysis = TreeParser::new(output).parse();
/// assert!(analysis.success);
/// assert_eq!(analysis.dependency_count(), 2);
/// ```
pub struct TreeParser<'a> {
    raw_output: &'a str,
}

impl<'a> TreeParser<'a> {
    /// Creates a parser over the raw tree output.
    pub fn new(raw_output: &'a str) -> Self {
        Self { raw_output }
    }

    /// Parses the tree output into an analysis result.
    pub fn parse(&self) -> PackageAnalysis {
        let mut external: Vec<ExternalDependency> = Vec::new();
        let mut local: Vec<LocalDependency> = Vec::new();
        let mut issues: Vec<PackageIssue> = Vec::new();

        for line in self.raw_output.lines() {
            let trimmed = line.trim();
            if Self::should_skip(trimmed) {
                continue;
            }

            let lower = trimmed.to_lowercase();
            if lower.contains("error") || lower.contains("failed") || lower.contains("warning") {
                let severity = if lower.contains("error") {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                issues.push(PackageIssue::new(
                    IssueKind::DependencyError,
                    severity,
                    trimmed,
                ));
                continue;
            }

            if let Some(dep) = parse_dependency_line(trimmed) {
                external.push(dep);
            } else if Self::looks_like_local_path(line) {
                local.push(LocalDependency::new(trimmed, trimmed));
            }
        }

        issues.extend(detect_version_conflicts(&external));

        let has_circular = self.detect_circular();
        if has_circular {
            issues.push(PackageIssue::new(
                IssueKind::CircularImport,
                Severity::Error,
                "Possible circular dependency detected in the dependency tree",
            ));
        }

        // Dependencies that parsed but never got a real version or URL are
        // local-dependency candidates, not external ones.
        let mut kept: Vec<ExternalDependency> = Vec::new();
        for dep in external {
            let has_real_version = !dep.version.is_empty() && dep.version != UNSPECIFIED_VERSION;
            if dep.url.is_some() || has_real_version {
                kept.push(dep);
            } else if dep.version == UNSPECIFIED_VERSION {
                local.push(LocalDependency::new(dep.name.clone(), dep.name));
            }
        }

        debug!(
            external = kept.len(),
            local = local.len(),
            issues = issues.len(),
            "Parsed dependency tree"
        );

        let success = success_of(&issues);
        let mut analysis = PackageAnalysis::new(CommandKind::ShowDependencies);
        analysis.success = success;
        analysis.dependencies = Some(DependencyAnalysis::from_parts(kept, local, has_circular));
        analysis.issues = issues;
        analysis
    }

    fn should_skip(trimmed: &str) -> bool {
        trimmed.is_empty()
            || HEADER_MARKERS.iter().any(|marker| trimmed.contains(marker))
            || trimmed.to_lowercase().contains("no dependencies")
    }

    /// A non-grammar line counts as a local dependency candidate when it does
    /// not start with a tree glyph but does contain a path separator.
    fn looks_like_local_path(line: &str) -> bool {
        let first = line.trim_start().chars().next();
        let starts_with_glyph = first.is_some_and(|ch| is_tree_glyph(ch) && ch != ' ');
        !starts_with_glyph && line.contains('/')
    }

    /// Heuristic cycle check: a cycle keyword anywhere in the input, or the
    /// same dependency name recovered more than once by a second grammar
    /// scan. Deliberately not a graph algorithm.
    fn detect_circular(&self) -> bool {
        let lower = self.raw_output.to_lowercase();
        if lower.contains("circular") || lower.contains("cycle") || lower.contains("loop") {
            return true;
        }

        let mut seen: Vec<String> = Vec::new();
        for line in self.raw_output.lines() {
            if let Some(dep) = parse_dependency_line(line.trim()) {
                if seen.contains(&dep.name) {
                    return true;
                }
                seen.push(dep.name);
            }
        }
        false
    }
}

/// Tree-parser success rule: no issue at `error` or above.
pub fn success_of(issues: &[PackageIssue]) -> bool {
    !issues
        .iter()
        .any(|issue| issue.severity >= Severity::Error)
}

/// Groups dependencies by name and emits conflict issues.
///
/// Names with more than one distinct version produce a warning listing all
/// versions in first-seen order. Independently, branch-tracking versions
/// (`main`, `master`, `develop`) produce an informational issue naming the
/// dependency.
fn detect_version_conflicts(deps: &[ExternalDependency]) -> Vec<PackageIssue> {
    let mut issues = Vec::new();

    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for dep in deps {
        match groups.iter_mut().find(|(name, _)| *name == dep.name) {
            Some((_, versions)) => {
                if !versions.contains(&dep.version.as_str()) {
                    versions.push(&dep.version);
                }
            }
            None => groups.push((&dep.name, vec![&dep.version])),
        }
    }

    for (name, versions) in groups {
        if versions.len() > 1 {
            issues.push(PackageIssue::new(
                IssueKind::VersionConflict,
                Severity::Warning,
                format!("Multiple versions of {name}: {}", versions.join(", ")),
            ));
        }
    }

    for dep in deps {
        let lower = dep.version.to_lowercase();
        if lower.contains("main") || lower.contains("master") || lower.contains("develop") {
            issues.push(
                PackageIssue::new(
                    IssueKind::VersionConflict,
                    Severity::Info,
                    format!(
                        "Dependency {} tracks branch {}, which may cause instability",
                        dep.name, dep.version
                    ),
                )
                .with_target(&dep.name),
            );
        }
    }

    issues
}
