//! Reference resolution stage.
//!
//! Consumes prepared (validated, deduplicated) coordinates in input order and
//! asks the project-model collaborator to expand each one into the reference
//! records the build consumes. Resolution is fail-fast: the first coordinate
//! the collaborator cannot expand aborts the whole call, and later
//! coordinates are never visited. Callers are expected to pre-validate so
//! that resolution failures are rare and fatal.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use crate::metadata::{FieldMap, MetadataKey};
use crate::model::{ModelError, ProjectModelResolver, ReferenceEntry};
use crate::pipeline::PreparedItem;

/// Output record: the original itemSpec, its fully populated coordinate, and
/// the reference entries derived for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedReferenceItem {
    pub item_spec: String,
    pub coordinate: Coordinate,
    pub entries: Vec<ReferenceEntry>,
}

impl ResolvedReferenceItem {
    /// Returns the recognized metadata keys fully populated from the
    /// coordinate, the way the build host consumes them.
    pub fn metadata(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.set(MetadataKey::GroupId, self.coordinate.group_id.as_str());
        map.set(MetadataKey::ArtifactId, self.coordinate.artifact_id.as_str());
        map.set(MetadataKey::Version, self.coordinate.version.as_str());
        map.set(
            MetadataKey::Classifier,
            self.coordinate.classifier().unwrap_or_default(),
        );
        map.set(MetadataKey::Extension, self.coordinate.extension_or_default());
        map
    }
}

/// Resolution failure surfaced to the caller.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("coordinate '{coordinate}' could not be expanded: {source}")]
    Unresolvable {
        coordinate: String,
        item_spec: String,
        #[source]
        source: ModelError,
    },
}

/// Expands prepared items through a project-model backend.
pub struct ReferenceResolver<'a> {
    model: &'a dyn ProjectModelResolver,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(model: &'a dyn ProjectModelResolver) -> Self {
        Self { model }
    }

    /// Resolves every item in order. Output order matches input order. An
    /// empty input yields an empty output without consulting the model.
    pub fn resolve(
        &self,
        items: &[PreparedItem],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<ResolvedReferenceItem>, ResolveError> {
        let mut resolved = Vec::with_capacity(items.len());

        for item in items {
            match self.model.expand(&item.coordinate) {
                Ok(descriptor) => {
                    debug!(
                        coordinate = %item.coordinate,
                        entries = descriptor.entries.len(),
                        "expanded coordinate"
                    );
                    resolved.push(ResolvedReferenceItem {
                        item_spec: item.item_spec.clone(),
                        coordinate: item.coordinate.clone(),
                        entries: descriptor.entries,
                    });
                }
                Err(error) => {
                    sink.report(
                        Diagnostic::new(DiagnosticCode::UnresolvableCoordinate, &item.item_spec)
                            .with_arg(error.reason()),
                    );
                    return Err(ResolveError::Unresolvable {
                        coordinate: item.coordinate.to_string(),
                        item_spec: item.item_spec.clone(),
                        source: error,
                    });
                }
            }
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::model::{ReferenceDescriptor, StaticModelResolver};

    fn prepared(item_spec: &str, coordinate: Coordinate) -> PreparedItem {
        PreparedItem {
            item_spec: item_spec.to_string(),
            coordinate,
        }
    }

    #[test]
    fn resolved_item_populates_every_recognized_key() {
        let item = ResolvedReferenceItem {
            item_spec: "g:a:1.0".to_string(),
            coordinate: Coordinate::new("g", "a", "1.0"),
            entries: Vec::new(),
        };

        let metadata = item.metadata();
        assert_eq!(metadata.get(MetadataKey::GroupId), Some("g"));
        assert_eq!(metadata.get(MetadataKey::ArtifactId), Some("a"));
        assert_eq!(metadata.get(MetadataKey::Version), Some("1.0"));
        assert_eq!(metadata.get(MetadataKey::Classifier), Some(""));
        assert_eq!(metadata.get(MetadataKey::Extension), Some("jar"));
    }

    #[test]
    fn failed_expansion_reports_diagnostic_with_reason() {
        let model = StaticModelResolver::new();
        let resolver = ReferenceResolver::new(&model);
        let mut sink = CollectingSink::new();

        let err = resolver
            .resolve(
                &[prepared("g:a:1.0", Coordinate::new("g", "a", "1.0"))],
                &mut sink,
            )
            .unwrap_err();

        let ResolveError::Unresolvable { item_spec, .. } = &err;
        assert_eq!(item_spec, "g:a:1.0");

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::UnresolvableCoordinate);
        assert_eq!(diagnostics[0].item_spec, "g:a:1.0");
        assert!(!diagnostics[0].args.is_empty());
    }

    #[test]
    fn output_order_matches_input_order() {
        let first = Coordinate::new("g", "a", "1.0");
        let second = Coordinate::new("g", "b", "2.0");
        let model = StaticModelResolver::new()
            .with_descriptor(&second, ReferenceDescriptor::new())
            .with_descriptor(&first, ReferenceDescriptor::new());
        let resolver = ReferenceResolver::new(&model);
        let mut sink = CollectingSink::new();

        let resolved = resolver
            .resolve(
                &[
                    prepared("g:a:1.0", first.clone()),
                    prepared("g:b:2.0", second.clone()),
                ],
                &mut sink,
            )
            .expect("resolve");

        assert_eq!(resolved[0].coordinate, first);
        assert_eq!(resolved[1].coordinate, second);
        assert!(sink.is_empty());
    }
}
