use std::path::PathBuf;

use super::{ModelError, ProjectModelResolver, ReferenceDescriptor, ReferenceEntry};
use crate::coordinate::Coordinate;

/// Model resolver backed by a standard repository directory layout.
///
/// The artifact for `group:artifact:version` is expected at
/// `{root}/{group/as/path}/{artifact}/{version}/{artifact}-{version}[-classifier].{ext}`.
/// By default the path is derived without touching the filesystem; with
/// [`RepositoryLayoutResolver::require_artifacts`] enabled, a missing file
/// makes expansion fail.
#[derive(Debug, Clone)]
pub struct RepositoryLayoutResolver {
    local_repository: PathBuf,
    require_artifacts: bool,
}

impl RepositoryLayoutResolver {
    pub fn new(local_repository: impl Into<PathBuf>) -> Self {
        Self {
            local_repository: local_repository.into(),
            require_artifacts: false,
        }
    }

    pub fn require_artifacts(mut self) -> Self {
        self.require_artifacts = true;
        self
    }

    fn artifact_basename(coordinate: &Coordinate) -> String {
        match coordinate.classifier() {
            Some(classifier) => format!(
                "{}-{}-{}",
                coordinate.artifact_id, coordinate.version, classifier
            ),
            None => format!("{}-{}", coordinate.artifact_id, coordinate.version),
        }
    }

    pub fn artifact_path(&self, coordinate: &Coordinate) -> PathBuf {
        self.local_repository
            .join(coordinate.group_path())
            .join(&coordinate.artifact_id)
            .join(&coordinate.version)
            .join(format!(
                "{}.{}",
                Self::artifact_basename(coordinate),
                coordinate.extension_or_default()
            ))
    }
}

impl ProjectModelResolver for RepositoryLayoutResolver {
    fn expand(&self, coordinate: &Coordinate) -> Result<ReferenceDescriptor, ModelError> {
        let path = self.artifact_path(coordinate);
        if self.require_artifacts && !path.exists() {
            return Err(ModelError::NotFound {
                coordinate: coordinate.to_string(),
                reason: format!("artifact file {} does not exist", path.display()),
            });
        }

        let entry = ReferenceEntry::compile(coordinate.to_string())
            .with_file_path(path.to_string_lossy().into_owned());
        Ok(ReferenceDescriptor::new().with_entry(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceKind;

    #[test]
    fn derives_repository_layout_path() {
        let resolver = RepositoryLayoutResolver::new("/repo");
        let coordinate = Coordinate::new("org.example.demo", "lib", "1.2.3");

        assert_eq!(
            resolver.artifact_path(&coordinate),
            PathBuf::from("/repo/org/example/demo/lib/1.2.3/lib-1.2.3.jar")
        );
    }

    #[test]
    fn classifier_and_extension_shape_the_file_name() {
        let resolver = RepositoryLayoutResolver::new("/repo");
        let coordinate = Coordinate::new("g", "a", "1.0")
            .with_classifier("sources")
            .with_extension("zip");

        assert_eq!(
            resolver.artifact_path(&coordinate),
            PathBuf::from("/repo/g/a/1.0/a-1.0-sources.zip")
        );
    }

    #[test]
    fn expand_emits_single_compile_entry() {
        let resolver = RepositoryLayoutResolver::new("/repo");
        let coordinate = Coordinate::new("g", "a", "1.0");

        let descriptor = resolver.expand(&coordinate).expect("expand");
        assert_eq!(descriptor.entries.len(), 1);
        assert_eq!(descriptor.entries[0].kind, ReferenceKind::Compile);
        assert_eq!(descriptor.entries[0].identity, "g:a:1.0");
        assert_eq!(
            descriptor.entries[0].file_path.as_deref(),
            Some("/repo/g/a/1.0/a-1.0.jar")
        );
    }
}
