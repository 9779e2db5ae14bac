use thiserror::Error;

use crate::diagnostics::DiagnosticCode;

use super::{Coordinate, PartialCoordinate};

/// itemSpec 文字列の解析エラー。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("itemSpec '{item_spec}' を解釈できません: コロン区切りトークンが不足しています")]
    MalformedItemSpec { item_spec: String },
}

/// 必須フィールド欠落の検証エラー。
/// 検証順は groupId → artifactId → version で固定され、
/// 1 項目につき最初に欠落したフィールドのみを報告する。
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("groupId が指定されていません")]
    MissingGroupId,
    #[error("artifactId が指定されていません")]
    MissingArtifactId,
    #[error("version が指定されていません")]
    MissingVersion,
}

impl ValidationError {
    /// 対応する安定診断コードを返す。
    pub const fn code(self) -> DiagnosticCode {
        match self {
            ValidationError::MissingGroupId => DiagnosticCode::MissingGroupId,
            ValidationError::MissingArtifactId => DiagnosticCode::MissingArtifactId,
            ValidationError::MissingVersion => DiagnosticCode::MissingVersion,
        }
    }
}

/// itemSpec をコロン区切り文法で解析する。
///
/// 文法は `groupId:artifactId:[packaging]:[classifier]:version` で、
/// 短縮形 `groupId:artifactId` と `groupId:artifactId:version` も受理する。
/// 先頭トークンが groupId、2 番目が artifactId、末尾トークンが version となり、
/// その間の中間トークンは version 側から `[classifier, packaging]` の順に割り当てる
/// （version 直前が classifier）。packaging トークンは座標の extension を埋める。
/// 空トークンは「そのスロットを飛ばす」ことを意味し、フィールドは未設定のまま残る。
/// 呼び出し側は欠落フィールドを後からメタデータで補完できる。
pub fn parse_item_spec(item_spec: &str) -> Result<PartialCoordinate, ParseError> {
    let tokens: Vec<&str> = item_spec.split(':').map(str::trim).collect();
    if tokens.len() < 2 {
        return Err(ParseError::MalformedItemSpec {
            item_spec: item_spec.to_string(),
        });
    }

    let mut partial = PartialCoordinate {
        group_id: non_empty(tokens[0]),
        artifact_id: non_empty(tokens[1]),
        ..PartialCoordinate::default()
    };

    if tokens.len() >= 3 {
        let last = tokens.len() - 1;
        partial.version = non_empty(tokens[last]);

        // 中間トークンは右詰めで割り当てる。余った空トークンは無視する。
        let mut middles = tokens[2..last].iter().rev();
        partial.classifier = middles.next().and_then(|token| non_empty(token));
        partial.extension = middles.next().and_then(|token| non_empty(token));
    }

    Ok(partial)
}

/// 統合済みの座標を検証し、完全な [`Coordinate`] へ昇格する。
pub fn validate(partial: &PartialCoordinate) -> Result<Coordinate, ValidationError> {
    let group_id = required(&partial.group_id).ok_or(ValidationError::MissingGroupId)?;
    let artifact_id = required(&partial.artifact_id).ok_or(ValidationError::MissingArtifactId)?;
    let version = required(&partial.version).ok_or(ValidationError::MissingVersion)?;

    Ok(Coordinate {
        group_id: group_id.to_string(),
        artifact_id: artifact_id.to_string(),
        version: version.to_string(),
        classifier: partial.classifier.clone(),
        extension: partial.extension.clone(),
    })
}

fn non_empty(token: &str) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
