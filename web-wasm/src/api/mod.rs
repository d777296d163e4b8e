//! API呼び出し（ブラウザfetch）
//!
//! conditions / geography 共通のGETヘルパ。エラーは共通の
//! `MeadError` に寄せ、表示側で文字列化する。

pub mod conditions;
pub mod geography;

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use mead_common::{MeadError, Result};

fn js_error(value: JsValue) -> MeadError {
    MeadError::unreachable(format!("{:?}", value))
}

/// GETしてJSONをデコードする共通処理
pub(crate) async fn http_get_json<T: DeserializeOwned>(
    service: &'static str,
    base_url: Option<String>,
    path: &str,
) -> Result<T> {
    let base = base_url
        .ok_or_else(|| MeadError::Config(format!("missing {} API base URL", service)))?;
    let url = format!("{}{}", base.trim_end_matches('/'), path);

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| MeadError::unreachable("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| MeadError::unreachable("unexpected fetch result"))?;

    let status = resp.status();
    // ボディはエラー表示にも使うため先に読む（読めなければ空文字）
    let body = match resp.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };

    if !(200..300).contains(&status) {
        let detail = if body.is_empty() {
            resp.status_text()
        } else {
            body
        };
        return Err(MeadError::Transport {
            status,
            body: detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| MeadError::Transport {
        status,
        body: format!("invalid JSON body: {}", e),
    })
}
