//! conditionsサービス連携

use mead_common::{ConditionDetail, ConditionSummary, Result};

use crate::config;

use super::http_get_json;

pub async fn fetch_conditions_list() -> Result<Vec<ConditionSummary>> {
    http_get_json("conditions", config::conditions_base_url(), "/api/v1/conditions").await
}

pub async fn fetch_condition_detail(id: &str) -> Result<ConditionDetail> {
    let encoded: String = js_sys::encode_uri_component(id).into();
    http_get_json(
        "conditions",
        config::conditions_base_url(),
        &format!("/api/v1/conditions/{}", encoded),
    )
    .await
}
