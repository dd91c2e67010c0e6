//! Diagnostics collection for resource table construction and optimization.
//!
//! Resource compilation reports user-facing problems (invalid entry names, conflicting ids,
//! duplicate values) through a collector instead of unwinding, so that a single pass can
//! surface every problem in a project at once. Optimization passes also use the collector
//! for their verbose notes ("removing dominated duplicate ...").
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Append-only container for diagnostic entries
//! - [`Diagnostic`] - Individual diagnostic entry with severity, category and source
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning, Error)
//! - [`DiagnosticCategory`] - Category of the diagnostic source
//! - [`Source`] - Location in a resource file a diagnostic or value originates from
//!
//! # Usage Examples
//!
//! ```rust
//! use resforge::diagnostics::{Diagnostics, DiagnosticCategory, Source};
//!
//! let diagnostics = Diagnostics::new();
//!
//! diagnostics.error_at(
//!     DiagnosticCategory::Collision,
//!     Source::with_line("res/values/strings.xml", 12),
//!     "duplicate value for resource 'string/app_name' with config ''",
//! );
//!
//! assert!(diagnostics.has_errors());
//! for entry in diagnostics.iter() {
//!     println!("{entry}");
//! }
//! ```
//!
//! # Thread Safety
//!
//! [`Diagnostics`] uses `boxcar::Vec` internally, which provides lock-free append operations
//! through a shared reference. The resource table itself is single-writer, but a host that
//! parses qualifier strings on several threads can report into one shared collector.

use std::fmt::{self, Write};

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    ///
    /// Used for the verbose notes of optimization passes.
    Info,

    /// Warning about a suspicious but accepted resource definition.
    Warning,

    /// Error indicating a rejected resource definition.
    ///
    /// The operation that reported it returned without mutating the table.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Category indicating the source or type of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Issues with configuration qualifier strings.
    Config,

    /// Issues with the package/type/entry identity model.
    ///
    /// Examples: invalid entry names, explicit ids that disagree with assigned ids.
    Table,

    /// Two values defined for the same name, configuration and product.
    Collision,

    /// Issues with public/private symbol declarations.
    Symbol,

    /// Issues with string interning or flattening.
    StringPool,

    /// Notes emitted by optimization passes.
    Optimize,

    /// General issues not fitting other categories.
    General,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Config => write!(f, "Config"),
            DiagnosticCategory::Table => write!(f, "Table"),
            DiagnosticCategory::Collision => write!(f, "Collision"),
            DiagnosticCategory::Symbol => write!(f, "Symbol"),
            DiagnosticCategory::StringPool => write!(f, "StringPool"),
            DiagnosticCategory::Optimize => write!(f, "Optimize"),
            DiagnosticCategory::General => write!(f, "General"),
        }
    }
}

/// The location a resource value or diagnostic originates from.
///
/// An empty path means the origin is unknown, which is the case for values built
/// programmatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Source {
    /// Path of the file the value was defined in.
    pub path: String,
    /// Optional 1-based line number inside `path`.
    pub line: Option<usize>,
}

impl Source {
    /// Creates a source pointing at a whole file.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
        }
    }

    /// Creates a source pointing at a line of a file.
    pub fn with_line(path: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
        }
    }

    /// Returns true if neither a path nor a line is known.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.path.is_empty() && self.line.is_none()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<unknown>")?;
        } else {
            write!(f, "{}", self.path)?;
        }
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        Ok(())
    }
}

/// A single diagnostic entry with context information.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// Human-readable description of the issue.
    pub message: String,

    /// Optional location of the resource definition the issue refers to.
    pub source: Option<Source>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity level of the diagnostic
    /// * `category` - Category of the diagnostic source
    /// * `message` - Human-readable description
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            source: None,
        }
    }

    /// Adds source location information to the diagnostic.
    ///
    /// Unknown sources are dropped so that the rendered message stays clean.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        if !source.is_unknown() {
            self.source = Some(source);
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.severity, self.category)?;

        if let Some(source) = &self.source {
            write!(f, "{source}: ")?;
        }

        write!(f, "{}", self.message)
    }
}

/// Append-only container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally, so entries can be pushed through a shared reference and
/// the collector can be handed to every pass as `&Diagnostics`.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds an informational diagnostic.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message));
    }

    /// Adds an informational diagnostic tied to a source location.
    pub fn info_at(&self, category: DiagnosticCategory, source: Source, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message).with_source(source));
    }

    /// Adds a warning diagnostic.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            message,
        ));
    }

    /// Adds an error diagnostic.
    pub fn error(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Error,
            category,
            message,
        ));
    }

    /// Adds an error diagnostic tied to a source location.
    pub fn error_at(
        &self,
        category: DiagnosticCategory,
        source: Source,
        message: impl Into<String>,
    ) {
        self.push(
            Diagnostic::new(DiagnosticSeverity::Error, category, message).with_source(source),
        );
    }

    /// Adds a diagnostic entry directly.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns true if any warning-level diagnostics have been collected.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Warning)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Error)
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Warning)
    }

    /// Returns the number of info-level diagnostics.
    pub fn info_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Info)
    }

    fn count_severity(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == severity)
            .count()
    }

    /// Returns an iterator over all diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns all errors as a vector.
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .collect()
    }

    /// Returns all warnings as a vector.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .collect()
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let error_count = self.error_count();
        let warning_count = self.warning_count();
        let info_count = self.info_count();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s), {} info(s)",
            error_count, warning_count, info_count
        );

        if error_count > 0 {
            output.push_str("\nErrors:\n");
            for diag in self.errors() {
                let _ = writeln!(output, "  {diag}");
            }
        }

        if warning_count > 0 {
            output.push_str("\nWarnings:\n");
            for diag in self.warnings() {
                let _ = writeln!(output, "  {diag}");
            }
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
