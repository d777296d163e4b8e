//! 表示用フォーマッタ
//!
//! 人口値の桁区切り、地域タイプの正規化、Wikipediaリンクの導出。
//! いずれもgeographyページの表示専用ヘルパ。

use serde_json::Value;

use crate::types::RegionDetail;

/// 地域タイプ絞り込み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionTypeFilter {
    #[default]
    All,
    City,
    Country,
    Continent,
}

impl RegionTypeFilter {
    pub const ALL_FILTERS: [RegionTypeFilter; 4] = [
        RegionTypeFilter::All,
        RegionTypeFilter::City,
        RegionTypeFilter::Country,
        RegionTypeFilter::Continent,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RegionTypeFilter::All => "all",
            RegionTypeFilter::City => "city",
            RegionTypeFilter::Country => "country",
            RegionTypeFilter::Continent => "continent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionTypeFilter::All => "All regions",
            RegionTypeFilter::City => "Cities",
            RegionTypeFilter::Country => "Countries",
            RegionTypeFilter::Continent => "Continents",
        }
    }

    /// 地域のtype値がこのフィルタに該当するか
    pub fn matches(&self, region_type: &str) -> bool {
        match self {
            RegionTypeFilter::All => true,
            _ => normalize_region_type(region_type) == self.key(),
        }
    }
}

/// type値の正規化（前後空白除去＋小文字化）
pub fn normalize_region_type(type_value: &str) -> String {
    type_value.trim().to_lowercase()
}

/// 数値文字列をen-US風の桁区切りで整形する
///
/// - 空文字はNone
/// - カンマ混じりは除去してから解釈
/// - 数値として解釈できなければ元の文字列を返す
/// - 小数部はmax_fraction_digitsで丸め、末尾の0は出さない
pub fn format_number(raw: &str, max_fraction_digits: usize) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let normalized: String = raw.chars().filter(|c| *c != ',').collect();
    let numeric: f64 = match normalized.parse() {
        Ok(n) => n,
        Err(_) => return Some(raw.to_string()),
    };
    if !numeric.is_finite() {
        return Some(raw.to_string());
    }

    let rounded = format!("{:.*}", max_fraction_digits, numeric.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rounded.as_str(), ""),
    };

    let mut grouped = String::new();
    for (pos, ch) in int_part.chars().enumerate() {
        if pos > 0 && (int_part.len() - pos) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_nonzero = int_part.chars().any(|c| c != '0') || !frac_part.is_empty();
    let mut result = String::new();
    if numeric < 0.0 && is_nonzero {
        result.push('-');
    }
    result.push_str(&grouped);
    if !frac_part.is_empty() {
        result.push('.');
        result.push_str(frac_part);
    }
    Some(result)
}

/// JSON値（数値または文字列）の人口系フィールドを整形する
pub fn format_population(value: Option<&Value>, max_fraction_digits: usize) -> Option<String> {
    let raw = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => return None,
    };
    format_number(&raw, max_fraction_digits)
}

/// 地域名からWikipedia記事URLを組み立てる
///
/// name → identifier → id の順で採用し、`_`/`-`を空白に開いてから
/// 各語の先頭を大文字化して`_`で連結する。
pub fn build_wikipedia_url(detail: &RegionDetail) -> Option<String> {
    let base = [&detail.name, &detail.identifier, &detail.id]
        .into_iter()
        .find(|s| !s.trim().is_empty())?;

    let opened: String = base
        .trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let title = opened
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("_");

    Some(format!("https://en.wikipedia.org/wiki/{}", title))
}
