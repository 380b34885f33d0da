//! Dependency-line grammar for tree-formatted output.
//!
//! Parses one already-trimmed line of `show-dependencies` text into an
//! [`ExternalDependency`], or rejects it as "not a dependency line". The
//! rules are tried in strict precedence order; the first matching pattern
//! wins:
//!
//! 1. strip leading tree-drawing glyphs
//! 2. `name (VERSION)`
//! 3. `name@VERSION`
//! 4. `name [URL]`
//! 5. `name<URL@VERSION>` / `name<URL>`
//! 6. bare name
//!
//! Rules 4 and 5 force the source-control kind; rules 2 and 3 classify the
//! version through [`classify_version`].

use pkg_insight_core::{DependencyKind, ExternalDependency};

/// Version string used when a dependency line carries no version at all.
pub const UNSPECIFIED_VERSION: &str = "unspecified";

/// Characters a dependency tree uses to draw its structure.
const TREE_GLYPHS: [char; 5] = ['│', '├', '└', '─', ' '];

/// Returns `true` if `ch` is a tree-drawing glyph or plain space.
pub fn is_tree_glyph(ch: char) -> bool {
    TREE_GLYPHS.contains(&ch)
}

/// Strips the leading run of tree-drawing glyphs and spaces.
fn strip_tree_prefix(line: &str) -> &str {
    line.trim_start_matches(|ch| is_tree_glyph(ch))
}

/// Classifies a version string into a dependency kind.
///
/// Registry versions either contain the substring `registry` or start with a
/// leading major digit 1-3 followed by a dot. Binary versions contain
/// `.binary` or (case-insensitively) `xcframework`. Everything else is
/// source control.
pub fn classify_version(version: &str) -> DependencyKind {
    let mut chars = version.chars();
    let registry_major = matches!(
        (chars.next(), chars.next()),
        (Some('1'..='3'), Some('.'))
    );
    if version.contains("registry") || registry_major {
        return DependencyKind::Registry;
    }
    if version.contains(".binary") || version.to_lowercase().contains("xcframework") {
        return DependencyKind::Binary;
    }
    DependencyKind::SourceControl
}

/// Parses one trimmed line into an external dependency.
///
/// Returns `None` for lines that consist solely of tree glyphs and
/// whitespace, or whose remainder is empty after stripping.
///
/// # Examples
///
/// ```
/// use pkg_insight_analyzer::grammar::parse_dependency_line;
///
/// let dep = parse_dependency_line("├── swift-nio (2.65.0)").unwrap();
/// assert_eq!(dep.name, "swift-nio");
/// assert_eq!(dep.version, "2.65.0");
///
/// assert!(parse_dependency_line("│   │").is_none());
/// ```
pub fn parse_dependency_line(line: &str) -> Option<ExternalDependency> {
    let rest = strip_tree_prefix(line).trim();
    if rest.is_empty() {
        return None;
    }

    // Rule 2: "name (VERSION)"
    if rest.ends_with(')') {
        if let Some(open) = rest.rfind(" (") {
            let name = rest[..open].trim();
            let version = rest[open + 2..rest.len() - 1].trim();
            if !name.is_empty() {
                return Some(ExternalDependency::new(
                    name,
                    version,
                    classify_version(version),
                ));
            }
        }
    }

    // Rule 3: "name@VERSION". An angle-bracket span may carry an `@` inside
    // its payload; those lines belong to rule 5.
    if let Some((name, version)) = rest.split_once('@').filter(|_| !rest.contains('<')) {
        let name = name.trim();
        let version = version.trim();
        if !name.is_empty() {
            return Some(ExternalDependency::new(
                name,
                version,
                classify_version(version),
            ));
        }
    }

    // Rule 4: "name [URL]"
    if rest.ends_with(']') {
        if let Some(open) = rest.rfind(" [") {
            let name = rest[..open].trim();
            let url = rest[open + 2..rest.len() - 1].trim();
            if !name.is_empty() {
                return Some(
                    ExternalDependency::new(name, "source-control", DependencyKind::SourceControl)
                        .with_url(url),
                );
            }
        }
    }

    // Rule 5: "name<URL@VERSION>" or "name<URL>"
    if let Some(open) = rest.find('<') {
        if let Some(span) = rest[open..].find('>') {
            let name = rest[..open].trim();
            let payload = &rest[open + 1..open + span];
            if !name.is_empty() {
                let (url, version) = match payload.split_once('@') {
                    Some((url, version)) => (url.trim(), version.trim()),
                    None => (payload.trim(), UNSPECIFIED_VERSION),
                };
                return Some(
                    ExternalDependency::new(name, version, DependencyKind::SourceControl)
                        .with_url(url),
                );
            }
        }
    }

    // Rule 6: bare name.
    Some(ExternalDependency::new(
        rest,
        UNSPECIFIED_VERSION,
        DependencyKind::SourceControl,
    ))
}
