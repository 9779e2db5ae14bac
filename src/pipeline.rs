//! Batch orchestration for the coordinate pipeline.
//!
//! Data flows strictly left to right: raw declarations are parsed, merged
//! with metadata, validated, deduplicated, and finally resolved. Both entry
//! points are all-or-nothing at batch granularity: a batch with any
//! validation failure produces no output (diagnostics are still collected
//! per item), and the first resolution failure aborts the invocation. Each
//! invocation is synchronous and owns no state across calls.

use thiserror::Error;
use tracing::{debug, warn};

use crate::coordinate::{parse_item_spec, validate, Coordinate};
use crate::dedup::dedup_by_canonical_key;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use crate::metadata::{FieldMap, MetadataKey};
use crate::model::ProjectModelResolver;
use crate::resolver::{ReferenceResolver, ResolveError, ResolvedReferenceItem};

/// Input item as supplied by the caller: a coordinate string plus metadata
/// fields that may fill in whatever the string leaves unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDeclaration {
    pub item_spec: String,
    pub metadata: FieldMap,
}

impl RawDeclaration {
    pub fn new(item_spec: impl Into<String>) -> Self {
        Self {
            item_spec: item_spec.into(),
            metadata: FieldMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: MetadataKey, value: impl Into<String>) -> Self {
        self.metadata.set(key, value);
        self
    }
}

/// A declaration that survived parse, merge, validation, and deduplication.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PreparedItem {
    pub item_spec: String,
    pub coordinate: Coordinate,
}

/// Batch failure raised by a pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{failed} of {total} declarations failed to prepare")]
    Prepare { failed: usize, total: usize },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Parses, merges, validates, and deduplicates an ordered batch.
///
/// Every declaration is checked even after earlier ones fail, so the sink
/// receives one diagnostic per offending item; the batch then fails as a
/// whole and partial results are discarded.
pub fn prepare(
    declarations: &[RawDeclaration],
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<PreparedItem>, PipelineError> {
    debug!(total = declarations.len(), "preparing reference declarations");

    let mut prepared = Vec::with_capacity(declarations.len());
    let mut failed = 0usize;

    for declaration in declarations {
        let partial = match parse_item_spec(&declaration.item_spec) {
            Ok(partial) => partial.merge_metadata(&declaration.metadata),
            Err(_) => {
                sink.report(Diagnostic::new(
                    DiagnosticCode::MalformedItemSpec,
                    &declaration.item_spec,
                ));
                failed += 1;
                continue;
            }
        };

        match validate(&partial) {
            Ok(coordinate) => prepared.push(PreparedItem {
                item_spec: declaration.item_spec.clone(),
                coordinate,
            }),
            Err(error) => {
                sink.report(Diagnostic::new(error.code(), &declaration.item_spec));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        warn!(failed, total = declarations.len(), "declaration batch rejected");
        return Err(PipelineError::Prepare {
            failed,
            total: declarations.len(),
        });
    }

    Ok(dedup_by_canonical_key(prepared, |item| {
        item.coordinate.canonical_key()
    }))
}

/// Runs the full pipeline: prepare, then expand every prepared item through
/// the project-model collaborator.
pub fn resolve(
    declarations: &[RawDeclaration],
    model: &dyn ProjectModelResolver,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<ResolvedReferenceItem>, PipelineError> {
    let prepared = prepare(declarations, sink)?;
    let resolver = ReferenceResolver::new(model);
    Ok(resolver.resolve(&prepared, sink)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    #[test]
    fn prepare_deduplicates_equal_declarations() {
        let declarations = vec![
            RawDeclaration::new("g:a:1.0"),
            RawDeclaration::new("g:a:1.0"),
        ];
        let mut sink = CollectingSink::new();

        let prepared = prepare(&declarations, &mut sink).expect("prepare");
        assert_eq!(prepared.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn prepare_keeps_classifier_variants_side_by_side() {
        let declarations = vec![
            RawDeclaration::new("g:a:1.0"),
            RawDeclaration::new("g:a:1.0").with_metadata(MetadataKey::Classifier, "cls"),
        ];
        let mut sink = CollectingSink::new();

        let prepared = prepare(&declarations, &mut sink).expect("prepare");
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].coordinate.classifier(), None);
        assert_eq!(prepared[1].coordinate.classifier(), Some("cls"));
    }

    #[test]
    fn prepare_collects_one_diagnostic_per_failing_item() {
        let declarations = vec![
            RawDeclaration::new("solo"),
            RawDeclaration::new("g:a:1.0"),
            RawDeclaration::new(":x:1.0"),
        ];
        let mut sink = CollectingSink::new();

        let err = prepare(&declarations, &mut sink).unwrap_err();
        assert!(matches!(err, PipelineError::Prepare { failed: 2, total: 3 }));

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].code, DiagnosticCode::MalformedItemSpec);
        assert_eq!(diagnostics[0].item_spec, "solo");
        assert_eq!(diagnostics[1].code, DiagnosticCode::MissingGroupId);
        assert_eq!(diagnostics[1].item_spec, ":x:1.0");
    }

    #[test]
    fn prepare_validates_independent_records_independently() {
        let declarations = vec![
            RawDeclaration::new("g:a"),
            RawDeclaration::new(":b:1.0"),
        ];
        let mut sink = CollectingSink::new();

        prepare(&declarations, &mut sink).unwrap_err();

        let codes: Vec<_> = sink.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![DiagnosticCode::MissingVersion, DiagnosticCode::MissingGroupId]
        );
    }
}
