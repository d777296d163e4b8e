//! 画像カルーセルコンポーネント
//!
//! 状態遷移は`mead_common::CarouselState`が持ち、ここはDOMとの接続のみ。
//! 矢印・ドット・スワイプで巡回し、読み込み失敗画像は除外していく。

use leptos::attr::custom::custom_attribute;
use leptos::prelude::*;
use web_sys::TouchEvent;

use mead_common::CarouselState;

#[component]
pub fn Carousel(state: RwSignal<CarouselState>, alt: Signal<String>) -> impl IntoView {
    let current_image = move || state.with(|c| c.current_image());
    let image_count = move || state.with(|c| c.image_count());

    let on_touch_start = move |ev: TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            state.update(|c| c.swipe_start(touch.client_x() as f64));
        }
    };

    let on_touch_end = move |ev: TouchEvent| {
        if let Some(touch) = ev.changed_touches().get(0) {
            state.update(|c| c.swipe_end(touch.client_x() as f64));
        }
    };

    // 失敗したのは常に表示中の画像（それ以外は読み込まれない）
    let on_image_error = move |_| {
        if let Some(url) = state.with_untracked(|c| c.current_image()) {
            state.update(|c| c.report_load_failure(&url));
        }
    };

    view! {
        <Show when=move || current_image().is_some()>
            <div class="carousel" on:touchstart=on_touch_start on:touchend=on_touch_end>
                <div class="carousel-frame image-frame">
                    <img
                        src=move || current_image().unwrap_or_default()
                        alt=move || alt.get()
                        {custom_attribute("property", "image")}
                        class="carousel-image"
                        on:error=on_image_error
                    />
                    <Show when=move || { image_count() > 1 }>
                        <button
                            type="button"
                            class="carousel-arrow left"
                            on:click=move |_| state.update(|c| c.previous())
                            aria-label="Previous image"
                        >
                            "<"
                        </button>
                        <button
                            type="button"
                            class="carousel-arrow right"
                            on:click=move |_| state.update(|c| c.next())
                            aria-label="Next image"
                        >
                            ">"
                        </button>
                    </Show>
                </div>

                <Show when=move || { image_count() > 1 }>
                    <div class="carousel-dots">
                        {move || {
                            (0..image_count())
                                .map(|index| {
                                    view! {
                                        <button
                                            type="button"
                                            class="carousel-dot"
                                            class:active=move || {
                                                state.with(|c| c.current_index()) == index
                                            }
                                            on:click=move |_| state.update(|c| c.set_index(index))
                                            aria-label=format!("Go to image {}", index + 1)
                                        ></button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
        </Show>
    }
}
