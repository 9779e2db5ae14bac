use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use thiserror::Error;

/// 複数値メタデータを単一の値へ畳み込む際に使用する予約済み区切り文字。
pub const PROPERTY_SEPARATOR: char = ';';

/// 参照宣言が持てる既知のメタデータフィールド名。
/// パーサ・バリデータ・リゾルバはこの集合だけを共有し、
/// コンポーネント間でキー名が乖離しないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    GroupId,
    ArtifactId,
    Version,
    Classifier,
    Extension,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 5] = [
        MetadataKey::GroupId,
        MetadataKey::ArtifactId,
        MetadataKey::Version,
        MetadataKey::Classifier,
        MetadataKey::Extension,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MetadataKey::GroupId => "GroupId",
            MetadataKey::ArtifactId => "ArtifactId",
            MetadataKey::Version => "Version",
            MetadataKey::Classifier => "Classifier",
            MetadataKey::Extension => "Extension",
        }
    }

    pub const fn variants() -> &'static [&'static str] {
        &["GroupId", "ArtifactId", "Version", "Classifier", "Extension"]
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataKey {
    type Err = UnknownMetadataKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "GroupId" => Ok(MetadataKey::GroupId),
            "ArtifactId" => Ok(MetadataKey::ArtifactId),
            "Version" => Ok(MetadataKey::Version),
            "Classifier" => Ok(MetadataKey::Classifier),
            "Extension" => Ok(MetadataKey::Extension),
            other => Err(UnknownMetadataKey {
                invalid: other.to_string(),
            }),
        }
    }
}

/// 未知のメタデータキーを受け取った際のエラー。
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "未知のメタデータキー: {invalid}. 利用可能候補: {choices}",
    choices = MetadataKey::variants().join(", ")
)]
pub struct UnknownMetadataKey {
    pub invalid: String,
}

/// 1 件の参照宣言に付随するメタデータフィールドの集合。
/// 挿入順を保持し、未設定のキーは保持しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: IndexMap<MetadataKey, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: MetadataKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn with(mut self, key: MetadataKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: MetadataKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetadataKey, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }
}

/// 複数値を予約区切り文字で 1 つのメタデータ値へ連結する。
pub fn join_values<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for value in values {
        if !joined.is_empty() {
            joined.push(PROPERTY_SEPARATOR);
        }
        joined.push_str(value.as_ref());
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_key_round_trips_through_str() {
        for key in MetadataKey::ALL {
            assert_eq!(MetadataKey::from_str(key.as_str()).unwrap(), key);
        }
    }

    #[test]
    fn unknown_metadata_key_is_rejected() {
        let err = MetadataKey::from_str("FilePath").unwrap_err();
        assert_eq!(err.invalid, "FilePath");
        assert!(err.to_string().contains("GroupId"));
    }

    #[test]
    fn field_map_preserves_insertion_order() {
        let map = FieldMap::new()
            .with(MetadataKey::Version, "1.0")
            .with(MetadataKey::GroupId, "org.example");

        let keys: Vec<_> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![MetadataKey::Version, MetadataKey::GroupId]);
        assert_eq!(map.get(MetadataKey::Version), Some("1.0"));
        assert_eq!(map.get(MetadataKey::Classifier), None);
    }

    #[test]
    fn join_values_uses_reserved_separator() {
        assert_eq!(join_values(["a", "b", "c"]), "a;b;c");
        assert_eq!(join_values(Vec::<String>::new()), "");
    }
}
