use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::{FieldMap, MetadataKey};

mod parse;

pub use parse::{parse_item_spec, validate, ParseError, ValidationError};

/// 拡張子が明示されていない座標に適用される標準拡張子。
pub const DEFAULT_EXTENSION: &str = "jar";

/// itemSpec の解析とメタデータ統合の結果を保持する、検証前の座標。
/// 「未指定」と「明示的に空」を区別するため、各フィールドは Option で持つ。
/// 空文字列は格納せず、未指定として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialCoordinate {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub classifier: Option<String>,
    pub extension: Option<String>,
}

impl PartialCoordinate {
    /// メタデータ値で未設定フィールドを補完する。
    /// itemSpec 由来の値が常に優先され、メタデータが既存値を上書きすることはない。
    /// 空のメタデータ値は無視される。
    pub fn merge_metadata(mut self, metadata: &FieldMap) -> Self {
        for (key, value) in metadata.iter() {
            if value.is_empty() {
                continue;
            }
            let slot = match key {
                MetadataKey::GroupId => &mut self.group_id,
                MetadataKey::ArtifactId => &mut self.artifact_id,
                MetadataKey::Version => &mut self.version,
                MetadataKey::Classifier => &mut self.classifier,
                MetadataKey::Extension => &mut self.extension,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        self
    }
}

/// 検証済みの完全な Maven 座標。
/// groupId・artifactId・version がすべて非空であることは検証時に保証される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Coordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            extension: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// 明示された拡張子、なければ標準拡張子を返す。
    pub fn extension_or_default(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// 重複判定に使用する正規化キーを構築する。
    /// classifier は空文字列、extension は標準拡張子へ正規化してから比較するため、
    /// 「未指定」と「明示的に既定値」の座標は等価になる。
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            classifier: self.classifier.clone().unwrap_or_default(),
            extension: self
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(classifier) = &self.classifier {
            write!(
                f,
                "{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.version, classifier
            )
        } else {
            write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
        }
    }
}

/// 正規化済みの同一性タプル。フィールドごとの厳密な文字列比較で等価性を判定し、
/// 大文字小文字の同一視やバージョン解釈は一切行わない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    group_id: String,
    artifact_id: String,
    version: String,
    classifier: String,
    extension: String,
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.classifier, self.extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_defaults_absent_classifier_and_extension() {
        let bare = Coordinate::new("g", "a", "1.0");
        let explicit = Coordinate::new("g", "a", "1.0")
            .with_classifier("")
            .with_extension("jar");

        assert_eq!(bare.canonical_key(), explicit.canonical_key());
    }

    #[test]
    fn canonical_key_distinguishes_classifier() {
        let plain = Coordinate::new("g", "a", "1.0");
        let classified = Coordinate::new("g", "a", "1.0").with_classifier("sources");

        assert_ne!(plain.canonical_key(), classified.canonical_key());
    }

    #[test]
    fn canonical_key_compares_versions_as_opaque_tokens() {
        let padded = Coordinate::new("g", "a", "1.0.0");
        let short = Coordinate::new("g", "a", "1.0");

        assert_ne!(padded.canonical_key(), short.canonical_key());
    }

    #[test]
    fn display_includes_classifier_when_present() {
        let coordinate = Coordinate::new("org.example", "demo", "1.2.3");
        assert_eq!(coordinate.to_string(), "org.example:demo:1.2.3");

        let classified = coordinate.with_classifier("sources");
        assert_eq!(classified.to_string(), "org.example:demo:1.2.3:sources");
    }

    #[test]
    fn group_path_replaces_dots() {
        let coordinate = Coordinate::new("org.example.demo", "lib", "1.0");
        assert_eq!(coordinate.group_path(), "org/example/demo");
    }
}
