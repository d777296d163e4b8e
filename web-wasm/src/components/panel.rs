//! 一覧パネルのレイアウト計測
//!
//! 詳細カードの高さから1ページに収まる行数を割り出す。計算本体は
//! `mead_common::explorer::layout`、ここはDOM計測とResizeObserverの接続。

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, HtmlElement, ResizeObserver};

use mead_common::explorer::layout::{PanelMetrics, DEFAULT_ROW_HEIGHT};

/// CSS値をpx数値として読む（"12px" / "12" / 空を許容）
fn read_px(styles: &CssStyleDeclaration, property: &str) -> Option<f64> {
    let value = styles.get_property_value(property).ok()?;
    let trimmed = value.trim().trim_end_matches("px").trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// 現在のDOMレイアウトから1ページの行数を計測する
pub(crate) fn measure_fit_count(
    list: &HtmlElement,
    list_panel: &HtmlElement,
    pagination: Option<&HtmlElement>,
    detail_card: &HtmlElement,
) -> Option<usize> {
    let window = web_sys::window()?;

    let list_styles = window.get_computed_style(list).ok().flatten();
    let (row_gap, row_height) = match &list_styles {
        Some(styles) => (
            read_px(styles, "row-gap")
                .or_else(|| read_px(styles, "gap"))
                .unwrap_or(0.0),
            read_px(styles, "--list-item-height").unwrap_or(DEFAULT_ROW_HEIGHT),
        ),
        None => (0.0, DEFAULT_ROW_HEIGHT),
    };

    let panel_gap = window
        .get_computed_style(list_panel)
        .ok()
        .flatten()
        .and_then(|styles| read_px(&styles, "row-gap").or_else(|| read_px(&styles, "gap")))
        .unwrap_or(0.0);

    let pagination_height = pagination
        .map(|el| el.get_bounding_client_rect().height())
        .unwrap_or(0.0);
    let detail_height = detail_card.get_bounding_client_rect().height();

    let metrics = PanelMetrics {
        detail_height,
        pagination_height,
        panel_gap,
        row_height,
        row_gap,
    };
    metrics.fit_count()
}

/// 要素群のリサイズで`on_resize`を呼ぶオブザーバを作る
pub(crate) fn observe_resize(
    targets: &[&HtmlElement],
    on_resize: impl Fn() + 'static,
) -> Option<ResizeObserver> {
    let closure = Closure::<dyn FnMut()>::new(move || on_resize());
    let observer = ResizeObserver::new(closure.as_ref().unchecked_ref()).ok()?;
    closure.forget();
    for target in targets {
        observer.observe(target);
    }
    Some(observer)
}
