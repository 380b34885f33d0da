//! Extractor for `dump-package` JSON manifests.
//!
//! Handles two manifest dialects that drift between tool versions:
//!
//! - the **legacy flat schema**: dependencies carry plain `name` / `url` /
//!   `path` / `requirement` fields;
//! - the **new schema**: dependencies carry a `sourceControl` array whose
//!   single descriptor encodes optional values as zero-or-one-element arrays
//!   (`location.remote[0].urlString`, `requirement.range[0]`).
//!
//! The array-unwrapping convention of the new schema is confined to the
//! `first_elem` helpers; past that boundary everything is a proper
//! `Option`.
//!
//! Structural problems degrade to issues while extraction continues with
//! whatever was recovered. Only unparseable input or a non-object root
//! short-circuits, and even that returns a populated result with a single
//! `syntax_error` issue. Success for this parser blocks on `critical`
//! issues only; the tree parser blocks on `error` too. The two rules are
//! distinct contracts.

use serde_json::Value;
use tracing::debug;

use pkg_insight_core::{
    CommandKind, DependencyAnalysis, DependencyKind, ExternalDependency, IssueKind,
    LocalDependency, PackageAnalysis, PackageIssue, Severity, TargetAnalysis, TargetDetail,
};

use crate::grammar::UNSPECIFIED_VERSION;

/// Combined dependency count above which the package is assumed cyclic.
///
/// A size proxy, not a graph check; deliberately approximate.
const CIRCULAR_SIZE_THRESHOLD: usize = 20;

/// Parser for `dump-package` JSON output, optionally filtered to one target.
///
/// # Examples
///
/// ```
/// use pkg_insight_analyzer::manifest::ManifestParser;
///
/// let analysis = ManifestParser::new(r#"{"name": "EmptyPackage"}"#, None).parse();
/// assert!(analysis.success);
/// assert_eq!(analysis.target_count(), 0);
/// ```
pub struct ManifestParser<'a> {
    raw_json: &'a str,
    target_filter: Option<&'a str>,
}

/// Product/package name pair recovered from a target's dependency entry.
///
/// The manifest's package-level dependency list is keyed by package name
/// while the target's own list uses product names, so both are tracked for
/// cross-referencing.
#[derive(Debug, Clone)]
struct TargetDependencyRef {
    product: String,
    package: Option<String>,
}

#[derive(Debug, Default)]
struct TargetCollection {
    summary: TargetAnalysis,
    details: Vec<TargetDetail>,
    dependency_refs: Vec<TargetDependencyRef>,
}

impl<'a> ManifestParser<'a> {
    /// Creates a parser over the raw manifest JSON.
    pub fn new(raw_json: &'a str, target_filter: Option<&'a str>) -> Self {
        Self {
            raw_json,
            target_filter,
        }
    }

    /// Parses the manifest into an analysis result.
    pub fn parse(&self) -> PackageAnalysis {
        let root: Value = match serde_json::from_str(self.raw_json) {
            Ok(value) => value,
            Err(err) => return syntax_failure(format!("Invalid JSON: {err}")),
        };
        let Some(manifest) = root.as_object() else {
            return syntax_failure("Top-level JSON value is not an object");
        };

        let mut issues: Vec<PackageIssue> = Vec::new();

        if manifest.get("name").and_then(Value::as_str).is_none() {
            issues.push(PackageIssue::new(
                IssueKind::SyntaxError,
                Severity::Critical,
                "Manifest is missing the top-level name field",
            ));
        }
        if !manifest.contains_key("products") {
            issues.push(PackageIssue::new(
                IssueKind::MissingTarget,
                Severity::Warning,
                "Manifest declares no products",
            ));
        }

        let targets = self.extract_targets(&root, &mut issues);
        let (mut external, local) = self.extract_dependencies(&root, &mut issues);

        if let Some(filter) = self.target_filter {
            external.retain(|dep| {
                targets.dependency_refs.iter().any(|dep_ref| {
                    dep_ref.product == dep.name || dep_ref.package.as_deref() == Some(&dep.name)
                })
            });
            issues.retain(|issue| {
                issue
                    .target
                    .as_deref()
                    .is_none_or(|target| target == filter)
            });
        }

        let has_circular = external.len() + local.len() > CIRCULAR_SIZE_THRESHOLD;
        let success = !issues
            .iter()
            .any(|issue| issue.severity == Severity::Critical);

        debug!(
            targets = targets.summary.count,
            external = external.len(),
            local = local.len(),
            issues = issues.len(),
            "Extracted manifest"
        );

        let mut summary = targets.summary;
        summary.details = (!targets.details.is_empty()).then_some(targets.details);

        let mut analysis = PackageAnalysis::new(CommandKind::DumpPackage);
        analysis.success = success;
        analysis.targets = Some(summary);
        analysis.dependencies = Some(DependencyAnalysis::from_parts(
            external,
            local,
            has_circular,
        ));
        analysis.issues = issues;
        analysis
    }

    fn extract_targets(&self, root: &Value, issues: &mut Vec<PackageIssue>) -> TargetCollection {
        let mut collection = TargetCollection::default();
        collection.summary.filter = self.target_filter.map(String::from);

        let Some(targets) = root.get("targets").and_then(Value::as_array) else {
            issues.push(PackageIssue::new(
                IssueKind::MissingTarget,
                Severity::Warning,
                "Manifest declares no targets",
            ));
            return collection;
        };

        let declared_platforms = declared_platform_names(root);

        for target in targets {
            // Targets without a name are skipped silently.
            let Some(name) = target.get("name").and_then(Value::as_str) else {
                continue;
            };
            if self.target_filter.is_some_and(|filter| filter != name) {
                continue;
            }

            collection.summary.count += 1;
            let kind = target.get("type").and_then(Value::as_str).unwrap_or("");
            match kind {
                "executable" => collection.summary.executable_targets.push(name.to_string()),
                "library" | "static-library" | "dynamic-library" => {
                    collection.summary.library_targets.push(name.to_string());
                }
                "test" => collection.summary.has_test_targets = true,
                _ => {}
            }

            let platforms = condition_platforms(target);
            for platform in &platforms {
                if !collection.summary.platforms.contains(platform) {
                    collection.summary.platforms.push(platform.clone());
                }
                if !declared_platforms.is_empty() && !declared_platforms.contains(platform) {
                    issues.push(
                        PackageIssue::new(
                            IssueKind::PlatformMismatch,
                            Severity::Warning,
                            format!(
                                "Target {name} is conditioned on {platform}, which the package does not declare"
                            ),
                        )
                        .with_target(name),
                    );
                }
            }

            let dep_refs = target_dependency_refs(target);
            let dep_names: Vec<String> = dep_refs.iter().map(|r| r.product.clone()).collect();
            collection.dependency_refs.extend(dep_refs);

            collection.details.push(TargetDetail {
                name: name.to_string(),
                kind: kind.to_string(),
                platforms,
                dependencies: dep_names,
            });
        }

        // A requested target that matches nothing yields an empty summary
        // with no issue attached; the empty-filter case is intentionally
        // silent.
        collection
    }

    fn extract_dependencies(
        &self,
        root: &Value,
        issues: &mut Vec<PackageIssue>,
    ) -> (Vec<ExternalDependency>, Vec<LocalDependency>) {
        let mut external = Vec::new();
        let mut local = Vec::new();

        let Some(entries) = root.get("dependencies").and_then(Value::as_array) else {
            return (external, local);
        };

        for entry in entries {
            let mut name = String::new();
            let mut url: Option<String> = None;
            let mut version = UNSPECIFIED_VERSION.to_string();

            if let Some(descriptor) = first_elem(entry, "sourceControl") {
                match descriptor.get("identity").and_then(Value::as_str) {
                    Some(identity) => name = identity.to_string(),
                    None => issues.push(PackageIssue::new(
                        IssueKind::DependencyError,
                        Severity::Error,
                        "Source-control dependency entry is missing its identity",
                    )),
                }

                url = descriptor
                    .get("location")
                    .and_then(|location| first_elem(location, "remote"))
                    .and_then(|remote| remote.get("urlString"))
                    .and_then(Value::as_str)
                    .map(String::from);

                if let Some(requirement) = descriptor.get("requirement") {
                    check_range_width(requirement, &name, issues);
                    if let Some(range) = first_elem(requirement, "range") {
                        let lower = range.get("lowerBound").and_then(Value::as_str);
                        let upper = range.get("upperBound").and_then(Value::as_str);
                        if let (Some(lower), Some(upper)) = (lower, upper) {
                            version = format!("{lower} - {upper}");
                        }
                    }
                }
            }

            // Legacy flat schema fallback.
            if name.is_empty() {
                let Some(legacy_name) = entry.get("name").and_then(Value::as_str) else {
                    continue;
                };
                name = legacy_name.to_string();
                url = entry.get("url").and_then(Value::as_str).map(String::from);

                if url.is_none() {
                    if let Some(path) = entry.get("path").and_then(Value::as_str) {
                        local.push(LocalDependency::new(name, path));
                        continue;
                    }
                }

                if let Some(requirement) = entry.get("requirement") {
                    check_range_width(requirement, &name, issues);
                    version = legacy_requirement_version(requirement);
                }
            }

            let kind = url.as_deref().map_or(DependencyKind::SourceControl, classify_url);
            let mut dep = ExternalDependency::new(name, version, kind);
            dep.url = url;
            external.push(dep);
        }

        (external, local)
    }
}

/// Result for input that never reached structural extraction.
fn syntax_failure(message: impl Into<String>) -> PackageAnalysis {
    let mut analysis = PackageAnalysis::new(CommandKind::DumpPackage);
    analysis.success = false;
    analysis.issues.push(PackageIssue::new(
        IssueKind::SyntaxError,
        Severity::Error,
        message,
    ));
    analysis
}

/// Unwraps the new schema's zero-or-one-element array convention.
fn first_elem<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    value.get(key)?.as_array()?.first()
}

/// Flags a `requirement.range` wider than two elements as a resolution risk.
fn check_range_width(requirement: &Value, name: &str, issues: &mut Vec<PackageIssue>) {
    let width = requirement
        .get("range")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if width > 2 {
        issues.push(PackageIssue::new(
            IssueKind::VersionConflict,
            Severity::Warning,
            format!("Dependency {name} declares {width} version ranges, which may not resolve"),
        ));
    }
}

/// Derives a version string from a legacy `requirement` object.
///
/// Priority: `range` (joined), then `branch`, then `revision` (truncated to
/// 7 characters), then `exact`.
fn legacy_requirement_version(requirement: &Value) -> String {
    if let Some(range) = requirement.get("range").and_then(Value::as_array) {
        let parts: Vec<&str> = range.iter().filter_map(Value::as_str).collect();
        if !parts.is_empty() {
            return parts.join(", ");
        }
    }
    if let Some(branch) = requirement.get("branch").and_then(Value::as_str) {
        return format!("branch: {branch}");
    }
    if let Some(revision) = requirement.get("revision").and_then(Value::as_str) {
        let short: String = revision.chars().take(7).collect();
        return format!("revision: {short}");
    }
    if let Some(exact) = requirement.get("exact").and_then(Value::as_str) {
        return exact.to_string();
    }
    UNSPECIFIED_VERSION.to_string()
}

/// Classifies a dependency by its URL.
fn classify_url(url: &str) -> DependencyKind {
    if url.ends_with(".binary") {
        DependencyKind::Binary
    } else if url.contains("@swift-package-registry") {
        DependencyKind::Registry
    } else {
        DependencyKind::SourceControl
    }
}

/// Platform identifiers declared at the package level.
fn declared_platform_names(root: &Value) -> Vec<String> {
    root.get("platforms")
        .and_then(Value::as_array)
        .map(|platforms| {
            platforms
                .iter()
                .filter_map(|platform| platform.get("platformName").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Platform identifiers from a target's settings conditions.
fn condition_platforms(target: &Value) -> Vec<String> {
    let mut platforms = Vec::new();
    let Some(settings) = target.get("settings").and_then(Value::as_array) else {
        return platforms;
    };
    for setting in settings {
        let names = setting
            .get("condition")
            .and_then(|condition| condition.get("platformNames"))
            .and_then(Value::as_array);
        if let Some(names) = names {
            for name in names.iter().filter_map(Value::as_str) {
                if !platforms.contains(&name.to_string()) {
                    platforms.push(name.to_string());
                }
            }
        }
    }
    platforms
}

/// Product/package name pairs from a target's dependency entries.
///
/// Entries are either plain name strings, or objects carrying a `product`
/// array (first element product name, optional second element owning
/// package) or a `byName` array (one name serving as both).
fn target_dependency_refs(target: &Value) -> Vec<TargetDependencyRef> {
    let mut refs = Vec::new();
    let Some(entries) = target.get("dependencies").and_then(Value::as_array) else {
        return refs;
    };

    for entry in entries {
        if let Some(name) = entry.as_str() {
            refs.push(TargetDependencyRef {
                product: name.to_string(),
                package: None,
            });
            continue;
        }
        if let Some(product) = entry.get("product").and_then(Value::as_array) {
            if let Some(name) = product.first().and_then(Value::as_str) {
                refs.push(TargetDependencyRef {
                    product: name.to_string(),
                    package: product.get(1).and_then(Value::as_str).map(String::from),
                });
            }
            continue;
        }
        if let Some(by_name) = entry.get("byName").and_then(Value::as_array) {
            if let Some(name) = by_name.first().and_then(Value::as_str) {
                refs.push(TargetDependencyRef {
                    product: name.to_string(),
                    package: Some(name.to_string()),
                });
            }
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PackageAnalysis {
        ManifestParser::new(json, None).parse()
    }

    #[test]
    fn test_empty_package_succeeds_with_missing_target_issue() {
        let analysis = parse(r#"{"name": "EmptyPackage"}"#);
        assert!(analysis.success);
        assert_eq!(analysis.target_count(), 0);
        assert_eq!(analysis.dependency_count(), 0);
        assert!(
            analysis
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::MissingTarget)
        );
    }

    #[test]
    fn test_missing_name_is_critical_failure() {
        let analysis = parse(r#"{"targets": []}"#);
        assert!(!analysis.success);
        let critical = analysis
            .issues
            .iter()
            .find(|issue| issue.kind == IssueKind::SyntaxError)
            .expect("syntax issue");
        assert_eq!(critical.severity, Severity::Critical);
    }

    #[test]
    fn test_malformed_json_short_circuits() {
        let analysis = parse(r#"{"invalid": json"#);
        assert!(!analysis.success);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].kind, IssueKind::SyntaxError);
        assert_eq!(analysis.issues[0].severity, Severity::Error);
        assert!(analysis.targets.is_none());
        assert!(analysis.dependencies.is_none());
    }

    #[test]
    fn test_non_object_root_short_circuits() {
        let analysis = parse("[1, 2, 3]");
        assert!(!analysis.success);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].kind, IssueKind::SyntaxError);
    }

    #[test]
    fn test_target_kinds_are_normalized() {
        let analysis = parse(
            r#"{
                "name": "Pkg",
                "products": [],
                "targets": [
                    {"name": "tool", "type": "executable"},
                    {"name": "Lib", "type": "library"},
                    {"name": "StaticLib", "type": "static-library"},
                    {"name": "DynLib", "type": "dynamic-library"},
                    {"name": "LibTests", "type": "test"},
                    {"name": "Plugin", "type": "plugin"},
                    {"type": "library"}
                ]
            }"#,
        );
        let targets = analysis.targets.unwrap();
        assert_eq!(targets.count, 6);
        assert!(targets.has_test_targets);
        assert_eq!(targets.executable_targets, vec!["tool"]);
        assert_eq!(targets.library_targets, vec!["Lib", "StaticLib", "DynLib"]);
    }

    #[test]
    fn test_new_schema_dependency_with_range() {
        let analysis = parse(
            r#"{
                "name": "Pkg",
                "products": [],
                "targets": [],
                "dependencies": [{
                    "sourceControl": [{
                        "identity": "swift-nio",
                        "location": {"remote": [{"urlString": "https://github.com/apple/swift-nio"}]},
                        "requirement": {"range": [{"lowerBound": "2.0.0", "upperBound": "3.0.0"}]}
                    }]
                }]
            }"#,
        );
        let deps = analysis.dependencies.unwrap();
        assert_eq!(deps.external.len(), 1);
        let dep = &deps.external[0];
        assert_eq!(dep.name, "swift-nio");
        assert_eq!(dep.version, "2.0.0 - 3.0.0");
        assert_eq!(dep.url.as_deref(), Some("https://github.com/apple/swift-nio"));
    }

    #[test]
    fn test_new_schema_without_remote_or_range() {
        let analysis = parse(
            r#"{
                "name": "Pkg",
                "products": [],
                "targets": [],
                "dependencies": [{
                    "sourceControl": [{"identity": "mystery", "requirement": {}}]
                }]
            }"#,
        );
        let deps = analysis.dependencies.unwrap();
        let dep = &deps.external[0];
        assert_eq!(dep.version, UNSPECIFIED_VERSION);
        assert!(dep.url.is_none());
        assert!(analysis.success);
    }

    #[test]
    fn test_new_schema_missing_identity_is_dependency_error() {
        let analysis = parse(
            r#"{
                "name": "Pkg",
                "products": [],
                "targets": [],
                "dependencies": [{"sourceControl": [{"requirement": {}}]}]
            }"#,
        );
        assert!(
            analysis
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::DependencyError
                    && issue.severity == Severity::Error)
        );
        // Not a hard failure: critical never fired.
        assert!(analysis.success);
    }

    #[test]
    fn test_legacy_schema_version_priorities() {
        let json = |requirement: &str| {
            format!(
                r#"{{
                    "name": "Pkg", "products": [], "targets": [],
                    "dependencies": [{{"name": "dep", "url": "https://example.com/dep", "requirement": {requirement}}}]
                }}"#
            )
        };

        let by_range = parse(&json(r#"{"range": ["1.0.0", "2.0.0"], "branch": "main"}"#));
        assert_eq!(
            by_range.dependencies.unwrap().external[0].version,
            "1.0.0, 2.0.0"
        );

        let by_branch = parse(&json(r#"{"branch": "develop"}"#));
        assert_eq!(
            by_branch.dependencies.unwrap().external[0].version,
            "branch: develop"
        );

        let by_revision = parse(&json(r#"{"revision": "abcdef0123456789"}"#));
        assert_eq!(
            by_revision.dependencies.unwrap().external[0].version,
            "revision: abcdef0"
        );

        let by_exact = parse(&json(r#"{"exact": "1.2.3"}"#));
        assert_eq!(by_exact.dependencies.unwrap().external[0].version, "1.2.3");

        let unspecified = parse(&json("{}"));
        assert_eq!(
            unspecified.dependencies.unwrap().external[0].version,
            UNSPECIFIED_VERSION
        );
    }

    #[test]
    fn test_legacy_path_entry_becomes_local() {
        let analysis = parse(
            r#"{
                "name": "Pkg", "products": [], "targets": [],
                "dependencies": [{"name": "Shared", "path": "../Shared"}]
            }"#,
        );
        let deps = analysis.dependencies.unwrap();
        assert!(deps.external.is_empty());
        assert_eq!(deps.local.len(), 1);
        assert_eq!(deps.local[0].name, "Shared");
        assert_eq!(deps.local[0].path, "../Shared");
    }

    #[test]
    fn test_url_classification() {
        let json = |url: &str| {
            format!(
                r#"{{
                    "name": "Pkg", "products": [], "targets": [],
                    "dependencies": [{{"name": "dep", "url": "{url}", "requirement": {{"exact": "1.0.0"}}}}]
                }}"#
            )
        };

        let binary = parse(&json("https://example.com/artifact.binary"));
        assert_eq!(
            binary.dependencies.unwrap().external[0].kind,
            DependencyKind::Binary
        );

        let registry = parse(&json("pkg@swift-package-registry/org/pkg"));
        assert_eq!(
            registry.dependencies.unwrap().external[0].kind,
            DependencyKind::Registry
        );

        let source = parse(&json("https://github.com/org/pkg"));
        assert_eq!(
            source.dependencies.unwrap().external[0].kind,
            DependencyKind::SourceControl
        );
    }

    #[test]
    fn test_wide_range_flags_resolution_risk() {
        let analysis = parse(
            r#"{
                "name": "Pkg", "products": [], "targets": [],
                "dependencies": [{"name": "dep", "url": "https://example.com/dep",
                    "requirement": {"range": ["1.0.0", "2.0.0", "3.0.0"]}}]
            }"#,
        );
        assert!(
            analysis
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::VersionConflict
                    && issue.severity == Severity::Warning)
        );
    }

    #[test]
    fn test_target_platforms_and_dependency_refs() {
        let analysis = parse(
            r#"{
                "name": "Pkg",
                "products": [],
                "platforms": [{"platformName": "macos"}],
                "targets": [{
                    "name": "App",
                    "type": "executable",
                    "settings": [{"condition": {"platformNames": ["macos", "ios"]}, "name": "define"}],
                    "dependencies": [
                        "PlainDep",
                        {"product": ["NIO", "swift-nio"]},
                        {"byName": ["Logging"]}
                    ]
                }]
            }"#,
        );
        let targets = analysis.targets.unwrap();
        assert_eq!(targets.platforms, vec!["macos", "ios"]);
        let details = targets.details.unwrap();
        assert_eq!(details[0].dependencies, vec!["PlainDep", "NIO", "Logging"]);
        // ios is conditioned on but not declared by the package.
        assert!(
            analysis
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::PlatformMismatch
                    && issue.target.as_deref() == Some("App"))
        );
    }

    #[test]
    fn test_undeclared_platform_warns_once() {
        let analysis = parse(
            r#"{
                "name": "Pkg",
                "products": [],
                "platforms": [{"platformName": "macos"}],
                "targets": [{
                    "name": "App",
                    "type": "executable",
                    "settings": [{"condition": {"platformNames": ["linux"]}}]
                }]
            }"#,
        );
        let mismatches: Vec<_> = analysis
            .issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::PlatformMismatch)
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].severity, Severity::Warning);
        assert!(analysis.success);
    }

    #[test]
    fn test_no_declared_platforms_skips_cross_check() {
        let analysis = parse(
            r#"{
                "name": "Pkg",
                "products": [],
                "targets": [{
                    "name": "App",
                    "type": "executable",
                    "settings": [{"condition": {"platformNames": ["linux"]}}]
                }]
            }"#,
        );
        assert!(
            !analysis
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::PlatformMismatch)
        );
    }

    #[test]
    fn test_target_filter_narrows_everything() {
        let json = r#"{
            "name": "Pkg",
            "products": [],
            "targets": [
                {"name": "App", "type": "executable",
                 "dependencies": [{"product": ["NIO", "swift-nio"]}]},
                {"name": "Lib", "type": "library",
                 "dependencies": [{"byName": ["Logging"]}]}
            ],
            "dependencies": [
                {"name": "swift-nio", "url": "https://github.com/apple/swift-nio",
                 "requirement": {"exact": "2.0.0"}},
                {"name": "Logging", "url": "https://github.com/apple/swift-log",
                 "requirement": {"exact": "1.0.0"}}
            ]
        }"#;

        let analysis = ManifestParser::new(json, Some("App")).parse();
        let targets = analysis.targets.as_ref().unwrap();
        assert_eq!(targets.count, 1);
        assert_eq!(targets.filter.as_deref(), Some("App"));
        let deps = analysis.dependencies.as_ref().unwrap();
        assert_eq!(deps.external.len(), 1);
        assert_eq!(deps.external[0].name, "swift-nio");
    }

    #[test]
    fn test_target_filter_without_match_is_silent() {
        let json = r#"{
            "name": "Pkg",
            "products": [],
            "targets": [{"name": "App", "type": "executable"}]
        }"#;

        let analysis = ManifestParser::new(json, Some("Nope")).parse();
        assert!(analysis.success);
        let targets = analysis.targets.as_ref().unwrap();
        assert_eq!(targets.count, 0);
        assert!(targets.details.is_none());
        assert!(
            !analysis
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::MissingTarget)
        );
    }

    #[test]
    fn test_filter_drops_issues_for_other_targets() {
        let json = r#"{
            "name": "Pkg",
            "products": [],
            "platforms": [{"platformName": "macos"}],
            "targets": [
                {"name": "App", "type": "executable"},
                {"name": "Lib", "type": "library",
                 "settings": [{"condition": {"platformNames": ["linux"]}}]}
            ]
        }"#;

        // Unfiltered: Lib's platform mismatch is visible.
        let unfiltered = ManifestParser::new(json, None).parse();
        assert!(
            unfiltered
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::PlatformMismatch)
        );

        // Filtered to App: Lib's targeted issue is dropped, the untargeted
        // products warning passes through.
        let filtered = ManifestParser::new(json, Some("App")).parse();
        assert!(
            !filtered
                .issues
                .iter()
                .any(|issue| issue.kind == IssueKind::PlatformMismatch)
        );
    }

    #[test]
    fn test_size_threshold_marks_circular() {
        let mut entries = Vec::new();
        for i in 0..21 {
            entries.push(format!(
                r#"{{"name": "dep{i}", "url": "https://example.com/dep{i}", "requirement": {{"exact": "1.0.0"}}}}"#
            ));
        }
        let json = format!(
            r#"{{"name": "Pkg", "products": [], "targets": [], "dependencies": [{}]}}"#,
            entries.join(",")
        );

        let analysis = parse(&json);
        assert!(analysis.dependencies.unwrap().has_circular);
    }

    #[test]
    fn test_nameless_entry_without_source_control_is_skipped() {
        let analysis = parse(
            r#"{
                "name": "Pkg", "products": [], "targets": [],
                "dependencies": [{"requirement": {"exact": "1.0.0"}}]
            }"#,
        );
        let deps = analysis.dependencies.unwrap();
        assert!(deps.external.is_empty());
        assert!(deps.local.is_empty());
    }
}
