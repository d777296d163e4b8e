//! APIクライアント（ネイティブ）
//!
//! conditions / geography 両サービスへの読み取り専用アクセス。
//! リトライ・タイムアウトは持たない（HTTPクライアントの既定に従う）。
//! WASM側はブラウザfetchを使うため、このモジュールはnative-client
//! フィーチャ限定。

use serde::de::DeserializeOwned;

use crate::error::{MeadError, Result};
use crate::types::{ConditionDetail, ConditionSummary, RegionDetail, RegionSummary};

/// パスセグメント用のパーセントエンコード（encodeURIComponent相当）
pub fn encode_component(raw: &str) -> String {
    const KEEP: &[u8] = b"-_.!~*'()";
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// ベースURLとHTTPクライアントの組
#[derive(Debug, Clone)]
struct ApiBase {
    service: &'static str,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl ApiBase {
    fn new(service: &'static str, base_url: Option<String>) -> Self {
        Self {
            service,
            base_url: base_url.filter(|url| !url.trim().is_empty()),
            http: reqwest::Client::new(),
        }
    }

    /// ベースURL未設定はリクエスト前にConfigエラーにする
    fn require_base(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .ok_or_else(|| MeadError::Config(format!("missing {} API base URL", self.service)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let base = self.require_base()?;
        let url = format!("{}{}", base.trim_end_matches('/'), path);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| MeadError::unreachable(e.to_string()))?;

        let status = response.status();
        // ボディはエラー表示にも使うため先に取り出す（失敗時は空文字）
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let detail = if body.is_empty() {
                status.canonical_reason().unwrap_or("").to_string()
            } else {
                body
            };
            return Err(MeadError::Transport {
                status: status.as_u16(),
                body: detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| MeadError::Transport {
            status: status.as_u16(),
            body: format!("invalid JSON body: {}", e),
        })
    }
}

/// conditionsサービスのクライアント
#[derive(Debug, Clone)]
pub struct ConditionsClient {
    api: ApiBase,
}

impl ConditionsClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            api: ApiBase::new("conditions", base_url),
        }
    }

    pub async fn list(&self) -> Result<Vec<ConditionSummary>> {
        self.api.get_json("/api/v1/conditions").await
    }

    pub async fn detail(&self, id: &str) -> Result<ConditionDetail> {
        self.api
            .get_json(&format!("/api/v1/conditions/{}", encode_component(id)))
            .await
    }
}

/// geographyサービスのクライアント
#[derive(Debug, Clone)]
pub struct GeographyClient {
    api: ApiBase,
}

impl GeographyClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            api: ApiBase::new("geography", base_url),
        }
    }

    pub async fn list(&self) -> Result<Vec<RegionSummary>> {
        self.api.get_json("/api/v1/regions").await
    }

    pub async fn detail(&self, id: &str) -> Result<RegionDetail> {
        self.api
            .get_json(&format!("/api/v1/regions/{}", encode_component(id)))
            .await
    }
}
