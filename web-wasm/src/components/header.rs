//! ヘッダーコンポーネント

use leptos::prelude::*;

use crate::app::Page;

#[component]
pub fn Header(set_page: WriteSignal<Page>) -> impl IntoView {
    view! {
        <header class="app-header">
            <div class="brand-block">
                <a
                    class="brand"
                    href="#"
                    on:click=move |ev| {
                        ev.prevent_default();
                        set_page.set(Page::Home);
                    }
                >
                    "MeAd"
                </a>
                <span class="brand-subtitle">"Medical Web Advisor"</span>
            </div>
            <p class="header-meta">
                "A multimedia experience for high-school students exploring medical conditions and their impact across regions."
            </p>
        </header>
    }
}
