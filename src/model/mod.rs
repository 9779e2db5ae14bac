//! Project-model collaborator contract.
//!
//! The pipeline never computes a transitive dependency graph itself; it hands
//! each validated coordinate to an implementation of [`ProjectModelResolver`]
//! and consumes the returned descriptor. Any concrete backend, such as a
//! repository client or an embedded package index, can satisfy the trait
//! without changes to the core.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinate::{CanonicalKey, Coordinate};
use crate::metadata::join_values;

mod layout;

pub use layout::RepositoryLayoutResolver;

/// How the build consumes a resolved artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Compile,
    Runtime,
}

/// A single downstream reference produced for a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub kind: ReferenceKind,
    /// Identity pointer the build keys the reference by (coordinate display form).
    pub identity: String,
    /// Resolved artifact file path, when the backing model knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Further coordinates this reference pulls in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl ReferenceEntry {
    pub fn compile(identity: impl Into<String>) -> Self {
        Self::new(ReferenceKind::Compile, identity)
    }

    pub fn runtime(identity: impl Into<String>) -> Self {
        Self::new(ReferenceKind::Runtime, identity)
    }

    fn new(kind: ReferenceKind, identity: impl Into<String>) -> Self {
        Self {
            kind,
            identity: identity.into(),
            file_path: None,
            references: Vec::new(),
        }
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = references;
        self
    }

    /// Flattens the reference list into a single metadata value using the
    /// reserved separator.
    pub fn joined_references(&self) -> String {
        join_values(&self.references)
    }
}

/// Expansion result for one coordinate. A descriptor may legitimately carry
/// zero entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDescriptor {
    pub entries: Vec<ReferenceEntry>,
}

impl ReferenceDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: ReferenceEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: ReferenceEntry) {
        self.entries.push(entry);
    }
}

/// Failure reported by a project-model backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("coordinate '{coordinate}' not found in the project model: {reason}")]
    NotFound { coordinate: String, reason: String },
    #[error("project model rejected coordinate '{coordinate}': {reason}")]
    InvalidModel { coordinate: String, reason: String },
}

impl ModelError {
    pub fn reason(&self) -> &str {
        match self {
            ModelError::NotFound { reason, .. } | ModelError::InvalidModel { reason, .. } => reason,
        }
    }
}

/// Contract between the pipeline and the external project-model service.
pub trait ProjectModelResolver {
    fn expand(&self, coordinate: &Coordinate) -> Result<ReferenceDescriptor, ModelError>;
}

/// Model backed by a fixed in-memory coordinate table. Serves offline
/// operation and tests; lookups use the same canonical key as deduplication.
#[derive(Debug, Clone, Default)]
pub struct StaticModelResolver {
    table: IndexMap<CanonicalKey, ReferenceDescriptor>,
}

impl StaticModelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coordinate: &Coordinate, descriptor: ReferenceDescriptor) {
        self.table.insert(coordinate.canonical_key(), descriptor);
    }

    pub fn with_descriptor(
        mut self,
        coordinate: &Coordinate,
        descriptor: ReferenceDescriptor,
    ) -> Self {
        self.insert(coordinate, descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl ProjectModelResolver for StaticModelResolver {
    fn expand(&self, coordinate: &Coordinate) -> Result<ReferenceDescriptor, ModelError> {
        self.table
            .get(&coordinate.canonical_key())
            .cloned()
            .ok_or_else(|| ModelError::NotFound {
                coordinate: coordinate.to_string(),
                reason: "not present in the static model table".to_string(),
            })
    }
}
