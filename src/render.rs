use mead_common::format::{build_wikipedia_url, format_population};
use mead_common::{ConditionDetail, ConditionSummary, PageView, RegionDetail, RegionSummary};

/// 一覧セクションの見出しと空表示はWeb版の文言に合わせる

pub fn render_condition_page(view: &PageView<ConditionSummary>) -> String {
    if view.filtered.is_empty() {
        return "No conditions match your search.\n".to_string();
    }

    let mut out = String::new();
    for condition in &view.page {
        out.push_str(&format!("  {}  (id: {})\n", condition.name, condition.id));
    }
    out.push_str(&format!(
        "Page {} of {} ({} matching)\n",
        view.active_page,
        view.total_pages,
        view.filtered.len()
    ));
    out
}

pub fn render_region_page(view: &PageView<RegionSummary>) -> String {
    if view.filtered.is_empty() {
        return "No regions match your search.\n".to_string();
    }

    let mut out = String::new();
    for region in &view.page {
        let type_note = if region.schema_type.is_empty() {
            String::new()
        } else {
            format!(" [{}]", region.schema_type)
        };
        out.push_str(&format!(
            "  {}  (id: {}){}\n",
            region.name, region.id, type_note
        ));
    }
    out.push_str(&format!(
        "Page {} of {} ({} matching)\n",
        view.active_page,
        view.total_pages,
        view.filtered.len()
    ));
    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n== {} ==\n", title));
}

fn bullet_list(out: &mut String, items: &[String], empty_note: &str) {
    if items.is_empty() {
        out.push_str(&format!("{}\n", empty_note));
    } else {
        for item in items {
            out.push_str(&format!("  - {}\n", item));
        }
    }
}

pub fn render_condition_detail(detail: &ConditionDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", detail.name));
    out.push_str(&format!("ID: {}\n", detail.display_identifier()));

    section(&mut out, "Overview");
    if detail.description.is_empty() {
        out.push_str("No description available.\n");
    } else {
        out.push_str(&format!("{}\n", detail.description));
    }

    section(&mut out, "Symptoms");
    bullet_list(&mut out, &detail.symptoms, "No symptoms documented.");

    section(&mut out, "Risk factors");
    bullet_list(&mut out, &detail.risk_factors, "No risk factors documented.");

    section(&mut out, "Images");
    bullet_list(&mut out, &detail.image_urls(), "No images available.");

    section(&mut out, "Clinical summary");
    if detail.wikidoc_snippet.is_empty() {
        out.push_str("No clinical snippet available.\n");
    } else {
        out.push_str(&format!("{}\n", detail.wikidoc_snippet));
    }

    section(&mut out, "References & Sources");
    bullet_list(&mut out, &detail.same_as, "No sources listed.");

    out
}

pub fn render_region_detail(detail: &RegionDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", detail.name));
    out.push_str(&format!("ID: {}\n", detail.display_identifier()));

    section(&mut out, "Overview");
    if detail.description.is_empty() {
        out.push_str("No description available.\n");
    } else {
        out.push_str(&format!("{}\n", detail.description));
    }

    section(&mut out, "Population");
    let total = format_population(detail.population_total.as_ref(), 0);
    let density = format_population(detail.population_density.as_ref(), 2);
    out.push_str(&format!(
        "Population total:   {}\n",
        total.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!(
        "Population density: {}\n",
        density.as_deref().unwrap_or("Unknown")
    ));

    section(&mut out, "Cultural factors");
    bullet_list(&mut out, &detail.cultural_factors, "No cultural data available.");

    section(&mut out, "Climates");
    bullet_list(&mut out, &detail.climates, "No climate data available.");

    section(&mut out, "Industrial development");
    bullet_list(
        &mut out,
        &detail.industrial_development,
        "No industry data available.",
    );

    section(&mut out, "Images");
    bullet_list(&mut out, &detail.image_urls(), "No images available.");

    section(&mut out, "Wikipedia summary");
    if detail.wikipedia_snippet.is_empty() {
        out.push_str("No Wikipedia summary available.\n");
    } else {
        out.push_str(&format!("{}\n", detail.wikipedia_snippet));
    }

    section(&mut out, "References & Sources");
    let mut sources = Vec::new();
    if let Some(url) = build_wikipedia_url(detail) {
        sources.push(url);
    }
    sources.extend(detail.same_as.iter().cloned());
    bullet_list(&mut out, &sources, "No sources listed.");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mead_common::{paginate, QueryState};

    #[test]
    fn test_render_condition_page_with_footer() {
        let items = vec![
            ConditionSummary {
                id: "a".into(),
                name: "Flu".into(),
                ..Default::default()
            },
            ConditionSummary {
                id: "b".into(),
                name: "Cold".into(),
                ..Default::default()
            },
        ];
        let mut query = QueryState::new();
        query.page_size = 1;
        let text = render_condition_page(&paginate(&items, &query));
        assert!(text.contains("Flu"));
        assert!(!text.contains("Cold"));
        assert!(text.contains("Page 1 of 2"));
    }

    #[test]
    fn test_render_empty_page() {
        let items: Vec<ConditionSummary> = vec![];
        let text = render_condition_page(&paginate(&items, &QueryState::new()));
        assert_eq!(text, "No conditions match your search.\n");
    }

    #[test]
    fn test_render_condition_detail_fallbacks() {
        let detail = ConditionDetail {
            id: "flu".into(),
            name: "Flu".into(),
            ..Default::default()
        };
        let text = render_condition_detail(&detail);
        assert!(text.contains("No description available."));
        assert!(text.contains("No symptoms documented."));
        assert!(text.contains("ID: flu"));
    }

    #[test]
    fn test_render_region_detail_population() {
        let detail = RegionDetail {
            id: "tokyo".into(),
            name: "Tokyo".into(),
            population_total: Some(serde_json::json!(13960000)),
            ..Default::default()
        };
        let text = render_region_detail(&detail);
        assert!(text.contains("Population total:   13,960,000"));
        assert!(text.contains("Population density: Unknown"));
        assert!(text.contains("https://en.wikipedia.org/wiki/Tokyo"));
    }
}
