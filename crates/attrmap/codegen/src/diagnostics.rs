// AttrMap
// Copyright (C) 2025 AttrMap contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Diagnostic result infrastructure
//!
//! Every fallible analysis step returns a [`DiagnosticResult`]. Failures are
//! values, not unwound errors: per-member diagnostics are batched per mapper so
//! a single pass surfaces every fixable issue, and the whole batch is handed to
//! the host's reporting sink.

use serde::{Deserialize, Serialize};

/// Stable diagnostic codes. The numeric code is part of the public contract;
/// new codes append, existing codes never renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// No mapping strategy is derivable for the member's declared type.
    UnsupportedType,
    /// Bad map key, nested model in a set, or collection-of-collection.
    InvalidCollectionShape,
    /// A nested type revisits a model already on the ancestor chain.
    CycleDetected,
    /// Explicit kind override incompatible with the resolved category.
    IncompatibleKindOverride,
    /// An override path addresses a member that does not exist.
    InvalidDotPath,
    /// Ignore+configure conflict, converter+method-pair conflict, or a
    /// half-supplied method pair.
    ConflictingConfiguration,
    /// The mapper declaration supports neither direction. Mapper-fatal.
    NoMappingMethodsFound,
}

impl DiagnosticCode {
    /// Stable wire identifier for this code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedType => "ATTR0001",
            Self::InvalidCollectionShape => "ATTR0002",
            Self::CycleDetected => "ATTR0003",
            Self::IncompatibleKindOverride => "ATTR0004",
            Self::InvalidDotPath => "ATTR0005",
            Self::ConflictingConfiguration => "ATTR0006",
            Self::NoMappingMethodsFound => "ATTR0007",
        }
    }

    /// Severity associated with this code.
    pub fn severity(&self) -> Severity {
        // Every current code blocks emission; warnings would slot in here.
        Severity::Error
    }

    /// Whether this code aborts the member loop for the whole mapper.
    pub fn is_mapper_fatal(&self) -> bool {
        matches!(self, Self::NoMappingMethodsFound)
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// Dot-separated path from the root model to the member a diagnostic is about.
///
/// Empty for mapper-level diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberPath(Vec<String>);

impl MemberPath {
    /// Path rooted at the model itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-separated override path.
    pub fn parse(path: &str) -> Self {
        Self(path.split('.').map(str::to_string).collect())
    }

    /// Extend this path with one more member segment.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for MemberPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A single build-time diagnostic: stable code, severity, optional member
/// location, and positional message arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub location: Option<MemberPath>,
    pub args: Vec<String>,
}

impl Diagnostic {
    /// Build a diagnostic at the given member location.
    pub fn at(code: DiagnosticCode, location: MemberPath, args: Vec<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            location: Some(location),
            args,
        }
    }

    /// Build a mapper-level diagnostic with no member location.
    pub fn mapper_level(code: DiagnosticCode, args: Vec<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            location: None,
            args,
        }
    }

    fn message(&self) -> String {
        let arg = |i: usize| self.args.get(i).map(String::as_str).unwrap_or("?");
        match self.code {
            DiagnosticCode::UnsupportedType => {
                format!("no mapping strategy derivable for type `{}`", arg(0))
            }
            DiagnosticCode::InvalidCollectionShape => format!("invalid collection shape: {}", arg(0)),
            DiagnosticCode::CycleDetected => {
                format!("cyclic model reference: `{}` is already being expanded (chain: {})", arg(0), arg(1))
            }
            DiagnosticCode::IncompatibleKindOverride => {
                format!("kind override `{}` is incompatible with resolved category `{}`", arg(0), arg(1))
            }
            DiagnosticCode::InvalidDotPath => {
                format!("override path `{}` does not resolve: no member `{}`", arg(0), arg(1))
            }
            DiagnosticCode::ConflictingConfiguration => format!("conflicting configuration: {}", arg(0)),
            DiagnosticCode::NoMappingMethodsFound => {
                format!("mapper `{}` implements neither mapping direction", arg(0))
            }
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code.code())?;
        if let Some(location) = &self.location {
            if !location.is_root() {
                write!(f, " [{location}]")?;
            }
        }
        write!(f, ": {}", self.message())
    }
}

impl std::error::Error for Diagnostic {}

/// Result alias threaded through every fallible analysis operation.
pub type DiagnosticResult<T> = Result<T, Diagnostic>;

/// Ordered batch of diagnostics collected for one mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    /// Record the failure half of a result, passing successes through.
    pub fn record<T>(&mut self, result: DiagnosticResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(diagnostic) => {
                self.push(diagnostic);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether any collected diagnostic is Error severity.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
