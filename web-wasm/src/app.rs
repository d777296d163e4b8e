//! メインアプリケーションコンポーネント

use leptos::prelude::*;

use crate::components::{
    conditions::ConditionsExplorerPage, geography::GeographyPage, header::Header, home::HomePage,
};

/// 表示中のページ
///
/// ルーティングフレームワークは使わず、ページ切り替えはアプリ内状態で行う。
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Conditions,
    Geography,
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Home);

    view! {
        <div class="app-shell">
            <Header set_page=set_page />

            <main class="app-main">
                <Show when=move || page.get() == Page::Home>
                    <HomePage set_page=set_page />
                </Show>
                <Show when=move || page.get() == Page::Conditions>
                    <ConditionsExplorerPage set_page=set_page />
                </Show>
                <Show when=move || page.get() == Page::Geography>
                    <GeographyPage set_page=set_page />
                </Show>
            </main>
        </div>
    }
}
