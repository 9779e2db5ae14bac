//! Build-time Maven reference coordinate pipeline.
//!
//! Accepts an ordered batch of declared package coordinates and turns it
//! into the downstream reference records the build consumes: declarations
//! are parsed and validated, exact duplicates are dropped, and every
//! surviving coordinate is expanded through a project model. The actual
//! dependency-graph computation lives behind the [`model::ProjectModelResolver`]
//! collaborator; this crate owns parsing, identity, deduplication, and the
//! resolution state machine only.

pub mod cli;
pub mod coordinate;
pub mod dedup;
pub mod diagnostics;
pub mod manifest;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod resolver;

pub use coordinate::{
    parse_item_spec, validate, CanonicalKey, Coordinate, ParseError, PartialCoordinate,
    ValidationError, DEFAULT_EXTENSION,
};
pub use dedup::dedup_by_canonical_key;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticCode, DiagnosticSink};
pub use manifest::{DeclarationEntry, DeclarationFile, ManifestError};
pub use metadata::{join_values, FieldMap, MetadataKey, UnknownMetadataKey, PROPERTY_SEPARATOR};
pub use model::{
    ModelError, ProjectModelResolver, ReferenceDescriptor, ReferenceEntry, ReferenceKind,
    RepositoryLayoutResolver, StaticModelResolver,
};
pub use pipeline::{PipelineError, PreparedItem, RawDeclaration};
pub use resolver::{ReferenceResolver, ResolveError, ResolvedReferenceItem};
