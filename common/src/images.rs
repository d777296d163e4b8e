//! 画像URL正規化
//!
//! Wikimedia/Wikidata系の画像URLは同じファイルを指す表記ゆれが多い
//! （直リンク、Special:FilePath、Special:Redirect、File:ページ等）。
//! 正規化キーでエラー記録と重複排除を行う。

const UPLOAD_MARKER: &str = "upload.wikimedia.org/";
const FILE_PATH_MARKER: &str = "special:filepath/";
const REDIRECT_MARKER: &str = "special:redirect/file/";
const FILE_PAGE_MARKER: &str = "/wiki/file:";
const FILE_PREFIX: &str = "file:";

/// パーセントデコード（失敗時は入力をそのまま返す）
fn safe_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = match bytes.get(i + 1..i + 3) {
                Some(h) => h,
                None => return value.to_string(),
            };
            let digits = match std::str::from_utf8(hex) {
                Ok(d) => d,
                Err(_) => return value.to_string(),
            };
            match u8::from_str_radix(digits, 16) {
                Ok(byte) => out.push(byte),
                Err(_) => return value.to_string(),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    match String::from_utf8(out) {
        Ok(decoded) => decoded,
        Err(_) => value.to_string(),
    }
}

/// URLから比較用キーを作る
///
/// クエリ/フラグメントを落とし、既知のWikimedia形式はファイル名部分だけを
/// 取り出して小文字化する。未知の形式は小文字化のみ。
pub fn normalize_image_key(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let cut = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or(trimmed);
    let lower = cut.to_lowercase();

    if lower.contains(UPLOAD_MARKER) {
        let last = cut.rsplit('/').next().unwrap_or(cut);
        return safe_decode(last).to_lowercase();
    }

    // マーカー位置はlower上のインデックスなのでcutではなくlowerを切る
    // （小文字化でバイト長が変わる文字があるため）
    for marker in [FILE_PATH_MARKER, REDIRECT_MARKER, FILE_PAGE_MARKER] {
        if let Some(idx) = lower.find(marker) {
            let tail = &lower[idx + marker.len()..];
            return safe_decode(tail).to_lowercase();
        }
    }

    if lower.starts_with(FILE_PREFIX) {
        return safe_decode(&lower[FILE_PREFIX.len()..]).to_lowercase();
    }

    lower
}

/// 正規化キーで重複排除（元の順序と元のURL表記を保持）
pub fn dedupe_by_key(urls: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    for url in urls {
        let key = normalize_image_key(url);
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            result.push(url.clone());
        }
    }
    result
}
