//! geographyサービス連携

use mead_common::{RegionDetail, RegionSummary, Result};

use crate::config;

use super::http_get_json;

pub async fn fetch_regions_list() -> Result<Vec<RegionSummary>> {
    http_get_json("geography", config::geography_base_url(), "/api/v1/regions").await
}

pub async fn fetch_region_detail(id: &str) -> Result<RegionDetail> {
    let encoded: String = js_sys::encode_uri_component(id).into();
    http_get_json(
        "geography",
        config::geography_base_url(),
        &format!("/api/v1/regions/{}", encoded),
    )
    .await
}
