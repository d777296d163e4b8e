//! APIレスポンスの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ConditionSummary / ConditionDetail: conditionsサービス
//! - RegionSummary / RegionDetail: geographyサービス
//!
//! 両サービスは構造的に似ているが同一ではないため統合しない
//! （フィールド名・画像形式がサービスごとに異なる）。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::explorer::pagination::CollectionEntry;
use crate::images::dedupe_by_key;

/// 一覧エンドポイントの1件分（conditions）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionSummary {
    pub id: String,
    pub name: String,
    pub same_as: Vec<String>,
}

/// 詳細エンドポイントのレスポンス（conditions）
///
/// APIのリビジョンにより images 配列と単数 image の両方が存在するため
/// 両方を受け、`image_urls()` でマージする。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionDetail {
    pub id: String,
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub image: Option<String>,
    pub symptoms: Vec<String>,
    pub risk_factors: Vec<String>,
    pub same_as: Vec<String>,
    pub wikidoc_snippet: String,
    pub context: String,
    #[serde(rename = "type")]
    pub schema_type: String,
}

impl ConditionDetail {
    /// images と image をマージし、正規化キーで重複排除した画像URL一覧
    pub fn image_urls(&self) -> Vec<String> {
        let combined: Vec<String> = if !self.images.is_empty() {
            self.images.clone()
        } else {
            self.image.iter().cloned().collect()
        };
        dedupe_by_key(&combined)
    }

    /// 表示用ID（identifierが空ならidにフォールバック）
    pub fn display_identifier(&self) -> &str {
        if self.identifier.is_empty() {
            &self.id
        } else {
            &self.identifier
        }
    }
}

/// 一覧エンドポイントの1件分（regions）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub schema_type: String,
}

/// 詳細エンドポイントのレスポンス（regions）
///
/// 人口系フィールドは数値でも文字列でも届くためValueで受ける。
/// スニペットはリビジョンにより wikipediaSnippet / wikidocSnippet の両名がある。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionDetail {
    pub id: String,
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub population_total: Option<Value>,
    pub population_density: Option<Value>,
    pub cultural_factors: Vec<String>,
    pub climates: Vec<String>,
    pub industrial_development: Vec<String>,
    #[serde(alias = "wikidocSnippet")]
    pub wikipedia_snippet: String,
    pub same_as: Vec<String>,
    pub context: String,
    #[serde(rename = "type")]
    pub schema_type: String,
}

impl RegionDetail {
    /// 正規化キーで重複排除した画像URL一覧
    pub fn image_urls(&self) -> Vec<String> {
        dedupe_by_key(&self.images)
    }

    /// 表示用ID（identifierが空ならidにフォールバック）
    pub fn display_identifier(&self) -> &str {
        if self.identifier.is_empty() {
            &self.id
        } else {
            &self.identifier
        }
    }
}

impl CollectionEntry for ConditionSummary {
    fn entry_id(&self) -> &str {
        &self.id
    }
    fn entry_name(&self) -> &str {
        &self.name
    }
}

impl CollectionEntry for RegionSummary {
    fn entry_id(&self) -> &str {
        &self.id
    }
    fn entry_name(&self) -> &str {
        &self.name
    }
}
