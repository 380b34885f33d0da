//! Core diagnostic model for package-manager output analysis.
//!
//! This crate defines the shared entity model that the analyzer's parsers
//! produce and consumers (formatters, severity filters) read:
//!
//! - [`PackageAnalysis`] — top-level result for one analyzed input.
//! - [`TargetAnalysis`] / [`TargetDetail`] — summary of declared build
//!   targets.
//! - [`DependencyAnalysis`] — recovered external and local dependencies.
//! - [`PackageIssue`] — a single diagnostic with [`IssueKind`] and
//!   [`Severity`].
//! - [`PackageMetrics`] — cosmetic metrics attached by the CLI layer.
//!
//! The [`Severity`] total order (`Info < Warning < Error < Critical`) and
//! [`filter_issues`] form the filtering contract consumers apply to results.
//! All types serialize losslessly through JSON.
//!
//! # Example
//!
//! ```
//! use pkg_insight_core::*;
//!
//! let mut analysis = PackageAnalysis::new(CommandKind::ShowDependencies);
//! analysis.dependencies = Some(DependencyAnalysis::from_parts(
//!     vec![ExternalDependency::new("swift-log", "1.5.0", DependencyKind::SourceControl)],
//!     Vec::new(),
//!     false,
//! ));
//! analysis.issues.push(PackageIssue::new(
//!     IssueKind::VersionConflict,
//!     Severity::Info,
//!     "branch dependency may cause instability",
//! ));
//!
//! assert_eq!(analysis.dependency_count(), 1);
//! assert_eq!(filter_issues(analysis.issues, Severity::Warning).len(), 0);
//! ```

mod issue;
mod types;

pub use issue::{IssueKind, PackageIssue, Severity, filter_issues};
pub use types::*;
