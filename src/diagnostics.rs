//! Structured diagnostics reported to the build host.
//!
//! The core never formats user-facing text for failures: it emits stable
//! codes plus the offending itemSpec and message arguments, and an external
//! localization/logging layer renders them. The sink trait is the seam the
//! host implements; [`CollectingSink`] serves the CLI and tests.

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// Stable identifier for a structured diagnostic. These codes are part of the
/// external contract and must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    MissingGroupId,
    MissingArtifactId,
    MissingVersion,
    MalformedItemSpec,
    UnresolvableCoordinate,
}

impl DiagnosticCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::MissingGroupId => "MissingGroupId",
            DiagnosticCode::MissingArtifactId => "MissingArtifactId",
            DiagnosticCode::MissingVersion => "MissingVersion",
            DiagnosticCode::MalformedItemSpec => "MalformedItemSpec",
            DiagnosticCode::UnresolvableCoordinate => "UnresolvableCoordinate",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failure event: code, the itemSpec it concerns, and any message
/// arguments the host needs to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub item_spec: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, item_spec: impl Into<String>) -> Self {
        Self {
            code,
            item_spec: item_spec.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Receives every validation or resolution failure of a pipeline invocation.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that retains diagnostics in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(code = %diagnostic.code, item_spec = %diagnostic.item_spec, "diagnostic reported");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_as_stable_identifiers() {
        let json = serde_json::to_string(&DiagnosticCode::MissingGroupId).expect("serialize");
        assert_eq!(json, "\"MissingGroupId\"");
        assert_eq!(DiagnosticCode::UnresolvableCoordinate.as_str(), "UnresolvableCoordinate");
    }

    #[test]
    fn collecting_sink_keeps_arrival_order() {
        let mut sink = CollectingSink::new();
        sink.report(Diagnostic::new(DiagnosticCode::MissingVersion, "g:a"));
        sink.report(
            Diagnostic::new(DiagnosticCode::UnresolvableCoordinate, "g:b:1.0").with_arg("offline"),
        );

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].code, DiagnosticCode::MissingVersion);
        assert_eq!(diagnostics[1].args, vec!["offline".to_string()]);
    }
}
