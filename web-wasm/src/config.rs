//! ベースURL設定
//!
//! デプロイ時に `window.__MEAD_CONFIG__ = { conditionsApiBaseUrl, geographyApiBaseUrl }`
//! を差し込む想定。無ければビルド時の環境変数にフォールバックする。

use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "__MEAD_CONFIG__";

fn from_window(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if config.is_undefined() || config.is_null() {
        return None;
    }
    js_sys::Reflect::get(&config, &JsValue::from_str(key))
        .ok()?
        .as_string()
        .filter(|url| !url.trim().is_empty())
}

pub fn conditions_base_url() -> Option<String> {
    from_window("conditionsApiBaseUrl")
        .or_else(|| option_env!("MEAD_CONDITIONS_API_BASE_URL").map(str::to_string))
}

pub fn geography_base_url() -> Option<String> {
    from_window("geographyApiBaseUrl")
        .or_else(|| option_env!("MEAD_GEOGRAPHY_API_BASE_URL").map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn clear_global() {
        if let Some(window) = web_sys::window() {
            let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str(CONFIG_GLOBAL));
        }
    }

    /// グローバル未設定ならNone
    #[wasm_bindgen_test]
    fn test_missing_global_is_none() {
        clear_global();
        assert!(from_window("conditionsApiBaseUrl").is_none());
    }

    /// window.__MEAD_CONFIG__のURLが読める。空白のみは未設定扱い
    #[wasm_bindgen_test]
    fn test_reads_window_global() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(
            &config,
            &JsValue::from_str("conditionsApiBaseUrl"),
            &JsValue::from_str("http://localhost:9000"),
        )
        .unwrap();
        js_sys::Reflect::set(
            &config,
            &JsValue::from_str("geographyApiBaseUrl"),
            &JsValue::from_str("   "),
        )
        .unwrap();

        let window = web_sys::window().unwrap();
        js_sys::Reflect::set(&window, &JsValue::from_str(CONFIG_GLOBAL), &config).unwrap();

        assert_eq!(
            from_window("conditionsApiBaseUrl").as_deref(),
            Some("http://localhost:9000")
        );
        assert!(from_window("geographyApiBaseUrl").is_none());

        clear_global();
    }
}
