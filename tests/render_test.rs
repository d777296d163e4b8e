//! CLI表示テスト
//!
//! APIレスポンス形式のJSONをデシリアライズしてから
//! 一覧・詳細の整形出力を検証

use mead_common::{paginate, ConditionDetail, QueryState, RegionDetail, RegionSummary};
use mead_rust::render;

/// 詳細JSONからの整形出力（conditions）
#[test]
fn test_condition_detail_render_from_json() {
    let detail: ConditionDetail = serde_json::from_str(
        r#"{
            "id": "asthma",
            "identifier": "ASTHMA-01",
            "name": "Asthma",
            "description": "A chronic respiratory condition.",
            "images": ["File:Asthma.jpg", "file:asthma.jpg"],
            "symptoms": ["Wheezing", "Shortness of breath"],
            "riskFactors": ["Smoking"],
            "sameAs": ["https://www.wikidata.org/wiki/Q35869"],
            "wikidocSnippet": "Asthma is a long-term inflammatory disease."
        }"#,
    )
    .unwrap();

    let text = render::render_condition_detail(&detail);
    assert!(text.starts_with("Asthma\nID: ASTHMA-01\n"));
    assert!(text.contains("== Symptoms ==\n  - Wheezing\n  - Shortness of breath\n"));
    assert!(text.contains("== Risk factors ==\n  - Smoking\n"));
    assert!(text.contains("Asthma is a long-term inflammatory disease."));
    assert!(text.contains("https://www.wikidata.org/wiki/Q35869"));

    // 重複画像は正規化キーで1つにまとまる
    assert_eq!(text.matches("File:Asthma.jpg").count(), 1);
}

/// 一覧出力は地域タイプを注記し、フッターに件数を出す
#[test]
fn test_region_page_render_with_type_note() {
    let items = vec![
        RegionSummary {
            id: "tokyo".into(),
            name: "Tokyo".into(),
            schema_type: "City".into(),
        },
        RegionSummary {
            id: "japan".into(),
            name: "Japan".into(),
            schema_type: String::new(),
        },
    ];
    let text = render::render_region_page(&paginate(&items, &QueryState::new()));
    assert!(text.contains("Tokyo  (id: tokyo) [City]"));
    assert!(text.contains("Japan  (id: japan)\n"));
    assert!(text.contains("Page 1 of 1 (2 matching)"));
}

/// 地域詳細: Wikipedia URLがソース一覧の先頭に入る
#[test]
fn test_region_detail_sources_lead_with_wikipedia() {
    let detail: RegionDetail = serde_json::from_str(
        r#"{
            "id": "new_york-city",
            "name": "",
            "populationTotal": "8,336,817",
            "populationDensity": 11313.81,
            "sameAs": ["https://www.wikidata.org/wiki/Q60"]
        }"#,
    )
    .unwrap();

    let text = render::render_region_detail(&detail);
    assert!(text.contains("Population total:   8,336,817"));
    assert!(text.contains("Population density: 11,313.81"));

    let wiki_pos = text
        .find("https://en.wikipedia.org/wiki/New_York_City")
        .unwrap();
    let wikidata_pos = text.find("https://www.wikidata.org/wiki/Q60").unwrap();
    assert!(wiki_pos < wikidata_pos);
}

/// 範囲外のページ番号は最終ページとして表示される
#[test]
fn test_page_footer_clamps_page_number() {
    let items = vec![
        RegionSummary {
            id: "a".into(),
            name: "Asia".into(),
            schema_type: "Continent".into(),
        },
        RegionSummary {
            id: "b".into(),
            name: "Africa".into(),
            schema_type: "Continent".into(),
        },
    ];
    let mut query = QueryState::new();
    query.page_size = 1;
    query.page_number = 99;
    let text = render::render_region_page(&paginate(&items, &query));
    assert!(text.contains("Page 2 of 2"));
    assert!(text.contains("Africa"));
}
