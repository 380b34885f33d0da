//! Line-scanning parsers for `resolve`, `describe`, and `update` output.
//!
//! These formats have no structural grammar; each parser is a single pass of
//! per-line heuristics producing the same diagnostic model as the structural
//! parsers. All three share the tree parser's success rule.

use regex::Regex;
use std::sync::LazyLock;

use pkg_insight_core::{
    CommandKind, DependencyAnalysis, DependencyKind, ExternalDependency, IssueKind,
    PackageAnalysis, PackageIssue, Severity, TargetAnalysis, TargetDetail,
};

use crate::grammar::UNSPECIFIED_VERSION;
use crate::tree::success_of;

static DESCRIBE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:package\s+)?(name|version|type|platforms?)\s*:\s*(.+)$")
        .expect("static regex must compile")
});

/// Parses dependency-resolution log output.
///
/// Lines mentioning a fetch or a resolution contribute a dependency entry;
/// `Resolved <url> at <version>` lines supply the version. Error lines
/// degrade to `dependency_error` issues.
///
/// # Examples
///
/// ```
/// use pkg_insight_analyzer::scan::parse_resolve;
///
/// let analysis = parse_resolve("Resolved https://github.com/apple/swift-log at 1.5.4");
/// assert!(analysis.success);
/// assert_eq!(analysis.dependency_count(), 1);
/// ```
pub fn parse_resolve(input: &str) -> PackageAnalysis {
    let mut external: Vec<ExternalDependency> = Vec::new();
    let mut issues = Vec::new();

    for line in input.lines() {
        let lower = line.to_lowercase();
        if lower.contains("error") || lower.contains("failed") {
            issues.push(PackageIssue::new(
                IssueKind::DependencyError,
                Severity::Error,
                line.trim(),
            ));
            continue;
        }

        let interesting = lower.contains("resolving")
            || lower.contains("fetching")
            || lower.contains("resolved")
            || lower.contains("computed version");
        if !interesting {
            continue;
        }
        let Some(url) = http_token(line) else {
            continue;
        };
        let name = repository_name(url);
        let version = version_after_at(line).unwrap_or(UNSPECIFIED_VERSION);

        match external.iter_mut().find(|dep| dep.name == name) {
            Some(existing) => {
                if existing.version == UNSPECIFIED_VERSION && version != UNSPECIFIED_VERSION {
                    existing.version = version.to_string();
                }
            }
            None => external.push(
                ExternalDependency::new(name, version, DependencyKind::SourceControl)
                    .with_url(url),
            ),
        }
    }

    let success = success_of(&issues);
    let mut analysis = PackageAnalysis::new(CommandKind::Resolve);
    analysis.success = success;
    analysis.dependencies = Some(DependencyAnalysis::from_parts(external, Vec::new(), false));
    analysis.issues = issues;
    analysis
}

/// Parses `describe` key-value output into a minimal target summary.
pub fn parse_describe(input: &str) -> PackageAnalysis {
    let mut name: Option<String> = None;
    let mut kind = String::new();
    let mut platforms: Vec<String> = Vec::new();
    let mut issues = Vec::new();

    for line in input.lines() {
        let lower = line.to_lowercase();
        if lower.contains("error") || lower.contains("failed") {
            issues.push(PackageIssue::new(
                IssueKind::DependencyError,
                Severity::Error,
                line.trim(),
            ));
            continue;
        }
        let Some(captures) = DESCRIBE_KEY_RE.captures(line) else {
            continue;
        };
        let value = captures[2].trim().to_string();
        match captures[1].to_lowercase().as_str() {
            "name" => name = Some(value),
            "type" => kind = value,
            "platform" | "platforms" => {
                platforms.extend(value.split(',').map(|part| part.trim().to_string()));
            }
            _ => {}
        }
    }

    let mut summary = TargetAnalysis::default();
    if let Some(name) = name {
        summary.count = 1;
        summary.platforms = platforms.clone();
        summary.details = Some(vec![TargetDetail {
            name,
            kind,
            platforms,
            dependencies: Vec::new(),
        }]);
    }

    let success = success_of(&issues);
    let mut analysis = PackageAnalysis::new(CommandKind::Describe);
    analysis.success = success;
    analysis.targets = Some(summary);
    analysis.issues = issues;
    analysis
}

/// Parses `update` log output.
pub fn parse_update(input: &str) -> PackageAnalysis {
    let mut external: Vec<ExternalDependency> = Vec::new();
    let mut issues = Vec::new();

    for line in input.lines() {
        let lower = line.to_lowercase();
        if lower.contains("error") || lower.contains("failed") {
            issues.push(PackageIssue::new(
                IssueKind::DependencyError,
                Severity::Error,
                line.trim(),
            ));
            continue;
        }
        if lower.contains("up-to-date") || lower.contains("up to date") {
            issues.push(PackageIssue::new(
                IssueKind::Unknown,
                Severity::Info,
                "Dependencies already up to date",
            ));
            continue;
        }

        let interesting = lower.contains("updating")
            || lower.contains("updated")
            || lower.contains("checking out");
        if !interesting {
            continue;
        }
        let Some(url) = http_token(line) else {
            continue;
        };
        let name = repository_name(url);
        let version = version_after_at(line).unwrap_or(UNSPECIFIED_VERSION);
        if !external.iter().any(|dep| dep.name == name) {
            external.push(
                ExternalDependency::new(name, version, DependencyKind::SourceControl)
                    .with_url(url),
            );
        }
    }

    let success = success_of(&issues);
    let mut analysis = PackageAnalysis::new(CommandKind::Update);
    analysis.success = success;
    analysis.dependencies = Some(DependencyAnalysis::from_parts(external, Vec::new(), false));
    analysis.issues = issues;
    analysis
}

/// First whitespace-separated token that looks like a repository URL.
fn http_token(line: &str) -> Option<&str> {
    line.split_whitespace()
        .find(|token| token.starts_with("http://") || token.starts_with("https://"))
        .map(|token| token.trim_end_matches([',', '.']))
}

/// Last path segment of a repository URL, without a `.git` suffix.
fn repository_name(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    name.strip_suffix(".git").unwrap_or(name)
}

/// Version token following an `at` separator (`Resolved <url> at 1.2.3`).
fn version_after_at(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace().peekable();
    while let Some(token) = tokens.next() {
        if token == "at" {
            return tokens.peek().copied();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_collects_versioned_dependency() {
        let output = "\
Fetching https://github.com/apple/swift-log.git
Resolved https://github.com/apple/swift-log.git at 1.5.4
";
        let analysis = parse_resolve(output);
        assert!(analysis.success);
        let deps = analysis.dependencies.unwrap();
        assert_eq!(deps.external.len(), 1);
        assert_eq!(deps.external[0].name, "swift-log");
        assert_eq!(deps.external[0].version, "1.5.4");
    }

    #[test]
    fn test_resolve_error_line_fails() {
        let analysis = parse_resolve("error: dependency graph could not be resolved");
        assert!(!analysis.success);
        assert_eq!(analysis.issues[0].kind, IssueKind::DependencyError);
    }

    #[test]
    fn test_describe_builds_single_target_summary() {
        let output = "\
Package Name: MyApp
Package Version: 1.0.0
Type: executable
Platforms: macos, ios
";
        let analysis = parse_describe(output);
        assert!(analysis.success);
        let targets = analysis.targets.unwrap();
        assert_eq!(targets.count, 1);
        assert_eq!(targets.platforms, vec!["macos", "ios"]);
        let details = targets.details.unwrap();
        assert_eq!(details[0].name, "MyApp");
        assert_eq!(details[0].kind, "executable");
    }

    #[test]
    fn test_describe_without_name_is_empty() {
        let analysis = parse_describe("nothing useful here");
        assert_eq!(analysis.target_count(), 0);
        assert!(analysis.targets.unwrap().details.is_none());
    }

    #[test]
    fn test_update_counts_updated_repositories() {
        let output = "\
Updating https://github.com/apple/swift-nio
Updated https://github.com/apple/swift-nio at 2.65.0
";
        let analysis = parse_update(output);
        let deps = analysis.dependencies.unwrap();
        assert_eq!(deps.external.len(), 1);
        assert_eq!(deps.external[0].name, "swift-nio");
    }

    #[test]
    fn test_update_up_to_date_is_informational() {
        let analysis = parse_update("Everything is already up-to-date");
        assert!(analysis.success);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].severity, Severity::Info);
    }
}
