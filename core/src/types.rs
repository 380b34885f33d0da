//! Entity model for package-manager output analysis.
//!
//! This module defines the structured diagnostic model that every parser
//! produces and every consumer (formatter, severity filter) reads. The types
//! are designed for serialization with [`serde`] and round-trip losslessly
//! through JSON.
//!
//! Entities are immutable once constructed by a parser; the CLI layer only
//! touches the top-level [`PackageAnalysis`] twice afterwards (attaching
//! metrics and filtering issues).

use serde::{Deserialize, Serialize};

use crate::issue::PackageIssue;

/// Version of the analysis contract (semver).
///
/// Embedded in every [`PackageAnalysis`] to track compatibility across
/// model revisions.
pub const ANALYSIS_CONTRACT_VERSION: &str = "1.0.0";

/// Package-manager sub-command that produced the analyzed output.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::CommandKind;
///
/// let kind = CommandKind::DumpPackage;
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"dump-package\"");
/// assert_eq!(CommandKind::default(), CommandKind::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    /// JSON manifest dump (`dump-package`).
    DumpPackage,
    /// Tree-formatted dependency listing (`show-dependencies`).
    ShowDependencies,
    /// Dependency resolution log (`resolve`).
    Resolve,
    /// Package description output (`describe`).
    Describe,
    /// Dependency update log (`update`).
    Update,
    /// Could not be classified.
    #[default]
    Unknown,
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DumpPackage => write!(f, "dump-package"),
            Self::ShowDependencies => write!(f, "show-dependencies"),
            Self::Resolve => write!(f, "resolve"),
            Self::Describe => write!(f, "describe"),
            Self::Update => write!(f, "update"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// How an external dependency is sourced.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::DependencyKind;
///
/// let kind = DependencyKind::SourceControl;
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"source-control\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// Resolved from a version-control remote (the default).
    #[default]
    SourceControl,
    /// Pre-built binary artifact.
    Binary,
    /// Resolved through a package registry.
    Registry,
}

/// A dependency resolved from a remote source.
///
/// The version string is free-form: an exact version, a `"lower - upper"`
/// range, `"branch: X"`, `"revision: Y"` (revision truncated to 7
/// characters), or the literal `"unspecified"`.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::{DependencyKind, ExternalDependency};
///
/// let dep = ExternalDependency::new("swift-nio", "2.0.0", DependencyKind::SourceControl)
///     .with_url("https://github.com/apple/swift-nio");
/// assert_eq!(dep.name, "swift-nio");
/// assert!(dep.url.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDependency {
    /// Dependency name.
    pub name: String,
    /// Free-form version string.
    pub version: String,
    /// How the dependency is sourced.
    pub kind: DependencyKind,
    /// Source URL, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ExternalDependency {
    /// Creates a new external dependency without a URL.
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
            url: None,
        }
    }

    /// Attaches the source URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A dependency resolved from a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDependency {
    /// Dependency name.
    pub name: String,
    /// Filesystem path it resolves from.
    pub path: String,
}

impl LocalDependency {
    /// Creates a new local dependency.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Per-target detail collected from a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TargetDetail {
    /// Target name.
    pub name: String,
    /// Raw target kind string as declared in the manifest.
    pub kind: String,
    /// Platform identifiers from the target's settings conditions.
    pub platforms: Vec<String>,
    /// Resolved dependency names (product names).
    pub dependencies: Vec<String>,
}

/// Summary of the targets declared by a package.
///
/// Library-like kinds (`library`, `static-library`, `dynamic-library`) all
/// normalize into `library_targets`; test targets only set
/// `has_test_targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TargetAnalysis {
    /// Total number of targets (all kinds).
    pub count: usize,
    /// Whether any target is of kind "test".
    pub has_test_targets: bool,
    /// Platform identifiers mentioned by any target.
    pub platforms: Vec<String>,
    /// Names of executable targets.
    pub executable_targets: Vec<String>,
    /// Names of library targets (after kind normalization).
    pub library_targets: Vec<String>,
    /// Name of the single-target filter that was applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Per-target details, when collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<TargetDetail>>,
}

/// Summary of the dependencies recovered from the analyzed output.
///
/// `count` covers external and local dependencies together. Both lists keep
/// detection order. `version_conflicts` is part of the wire contract but
/// conflicts are reported as issues instead; it stays empty (see crate
/// docs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DependencyAnalysis {
    /// Total dependency count (external + local).
    pub count: usize,
    /// External dependencies in detection order.
    pub external: Vec<ExternalDependency>,
    /// Local (path-based) dependencies in detection order.
    pub local: Vec<LocalDependency>,
    /// Whether a dependency cycle was detected (heuristically).
    pub has_circular: bool,
    /// Detected version conflicts. Kept for wire compatibility; conflicts
    /// are emitted as `version_conflict` issues.
    pub version_conflicts: Vec<String>,
}

impl DependencyAnalysis {
    /// Builds a summary from the recovered dependency lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use pkg_insight_core::{DependencyAnalysis, DependencyKind, ExternalDependency};
    ///
    /// let external = vec![ExternalDependency::new("a", "1.0.0", DependencyKind::SourceControl)];
    /// let summary = DependencyAnalysis::from_parts(external, Vec::new(), false);
    /// assert_eq!(summary.count, 1);
    /// ```
    pub fn from_parts(
        external: Vec<ExternalDependency>,
        local: Vec<LocalDependency>,
        has_circular: bool,
    ) -> Self {
        Self {
            count: external.len() + local.len(),
            external,
            local,
            has_circular,
            version_conflicts: Vec::new(),
        }
    }
}

/// Coarse complexity bucket for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityBucket {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl std::fmt::Display for ComplexityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Cosmetic metrics attached by the CLI layer after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PackageMetrics {
    /// Wall-clock parse duration in milliseconds.
    pub parse_duration_ms: u64,
    /// Coarse complexity bucket.
    pub complexity: ComplexityBucket,
    /// Human-readable estimated indexing-time range, when computable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_indexing_time: Option<String>,
}

/// Top-level analysis result.
///
/// This is the primary type of the crate and the sole output contract
/// towards consumers. `issues` keeps detection order; it is never sorted.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::{CommandKind, PackageAnalysis};
///
/// let analysis = PackageAnalysis::new(CommandKind::ShowDependencies);
/// assert!(analysis.success);
/// assert!(analysis.issues.is_empty());
/// assert!(analysis.targets.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PackageAnalysis {
    /// Analysis contract version (populated from
    /// [`ANALYSIS_CONTRACT_VERSION`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_version: Option<String>,
    /// Sub-command that produced the analyzed output.
    pub command: CommandKind,
    /// Overall success flag. Each parser computes this from its own
    /// severity rule; see the analyzer crate docs.
    pub success: bool,
    /// Target summary, when the input describes targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetAnalysis>,
    /// Dependency summary, when the input describes dependencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyAnalysis>,
    /// Detected issues, in detection order.
    pub issues: Vec<PackageIssue>,
    /// Cosmetic metrics, attached downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PackageMetrics>,
    /// Echo of the raw input, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,
}

impl PackageAnalysis {
    /// Creates an empty, successful analysis for the given command kind.
    pub fn new(command: CommandKind) -> Self {
        Self {
            analysis_version: Some(ANALYSIS_CONTRACT_VERSION.to_string()),
            command,
            success: true,
            ..Default::default()
        }
    }

    /// Total number of recovered dependencies, external and local.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.as_ref().map_or(0, |deps| deps.count)
    }

    /// Number of declared targets.
    pub fn target_count(&self) -> usize {
        self.targets.as_ref().map_or(0, |targets| targets.count)
    }
}
