//! Issue taxonomy and severity model.
//!
//! Every parser reports problems as [`PackageIssue`] values appended to the
//! analysis result rather than as control-flow errors. The [`Severity`] order
//! (`Info < Warning < Error < Critical`) is the contract consumers rely on
//! for filtering, so it is derived from the variant order and must not be
//! reordered.

use serde::{Deserialize, Serialize};

/// Category of a detected diagnostic issue.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::IssueKind;
///
/// let kind = IssueKind::VersionConflict;
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"version_conflict\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A dependency cycle was detected (heuristically).
    CircularImport,
    /// A manifest lacks targets, or a requested target was not found.
    MissingTarget,
    /// Multiple incompatible versions of the same dependency.
    VersionConflict,
    /// Target platform conditions disagree with the package platforms.
    PlatformMismatch,
    /// Input could not be parsed structurally.
    SyntaxError,
    /// A dependency entry is malformed or failed to resolve.
    DependencyError,
    /// The package manager reported a network problem.
    NetworkError,
    /// Anything that fits no other category.
    #[default]
    Unknown,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CircularImport => write!(f, "circular_import"),
            Self::MissingTarget => write!(f, "missing_target"),
            Self::VersionConflict => write!(f, "version_conflict"),
            Self::PlatformMismatch => write!(f, "platform_mismatch"),
            Self::SyntaxError => write!(f, "syntax_error"),
            Self::DependencyError => write!(f, "dependency_error"),
            Self::NetworkError => write!(f, "network_error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Diagnostic rank of an issue.
///
/// The derived `Ord` follows declaration order, giving the total order
/// `Info < Warning < Error < Critical` used by severity filtering.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::Severity;
///
/// assert!(Severity::Info < Severity::Warning);
/// assert!(Severity::Error < Severity::Critical);
/// assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational only.
    #[default]
    Info,
    /// Worth attention, does not block.
    Warning,
    /// A real problem with the analyzed package.
    Error,
    /// The input is unusable as a package description.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A single detected diagnostic.
///
/// Issues are immutable values. Parsers construct them with
/// [`PackageIssue::new`] and optionally attach a target name or source line
/// through the builder methods.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::{IssueKind, PackageIssue, Severity};
///
/// let issue = PackageIssue::new(
///     IssueKind::VersionConflict,
///     Severity::Warning,
///     "Multiple versions of swift-nio: 2.0.0, 2.1.0",
/// )
/// .with_target("swift-nio");
///
/// assert_eq!(issue.target.as_deref(), Some("swift-nio"));
/// assert!(issue.line.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIssue {
    /// Category of the issue.
    pub kind: IssueKind,
    /// Diagnostic rank.
    pub severity: Severity,
    /// Target this issue is associated with, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// Source line number in the analyzed input, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl PackageIssue {
    /// Creates a new issue with no target or line attached.
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            target: None,
            message: message.into(),
            line: None,
        }
    }

    /// Attaches the name of the target this issue belongs to.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Attaches the source line number the issue was detected at.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Drops issues below `minimum`, preserving detection order.
///
/// # Examples
///
/// ```
/// use pkg_insight_core::{IssueKind, PackageIssue, Severity, filter_issues};
///
/// let issues = vec![
///     PackageIssue::new(IssueKind::Unknown, Severity::Info, "note"),
///     PackageIssue::new(IssueKind::SyntaxError, Severity::Error, "bad"),
/// ];
/// let kept = filter_issues(issues, Severity::Warning);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].severity, Severity::Error);
/// ```
pub fn filter_issues(issues: Vec<PackageIssue>, minimum: Severity) -> Vec<PackageIssue> {
    issues
        .into_iter()
        .filter(|issue| issue.severity >= minimum)
        .collect()
}
