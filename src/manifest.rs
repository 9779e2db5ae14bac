//! 参照宣言ファイル（TOML）の読み込み。

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::metadata::{FieldMap, MetadataKey};
use crate::pipeline::RawDeclaration;

/// 宣言ファイルの読み込みエラー。
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("宣言ファイル {path} を読み込めません: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("宣言ファイル {path} の解析に失敗しました: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 参照宣言ファイル全体。`[[reference]]` テーブルの並び順が宣言順となる。
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DeclarationFile {
    #[serde(default, rename = "reference")]
    pub references: Vec<DeclarationEntry>,
}

/// ファイル内の 1 宣言。`spec` が itemSpec、残りのフィールドは
/// 既知メタデータキーに対応する補完値として扱う。
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DeclarationEntry {
    pub spec: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl DeclarationFile {
    /// ファイルから宣言一覧を読み込む。
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// パイプライン入力へ変換する。宣言順は維持される。
    pub fn to_declarations(&self) -> Vec<RawDeclaration> {
        self.references
            .iter()
            .map(|entry| RawDeclaration {
                item_spec: entry.spec.clone(),
                metadata: entry.field_map(),
            })
            .collect()
    }
}

impl DeclarationEntry {
    fn field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        let fields = [
            (MetadataKey::GroupId, &self.group_id),
            (MetadataKey::ArtifactId, &self.artifact_id),
            (MetadataKey::Version, &self.version),
            (MetadataKey::Classifier, &self.classifier),
            (MetadataKey::Extension, &self.extension),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                map.set(key, value.as_str());
            }
        }
        map
    }
}
