//! 医療条件エクスプローラページ
//!
//! 検索→ページング→選択→カルーセルの状態はすべて`mead_common`の
//! コントローラが持つ。このファイルはシグナル接続と描画のみ。

use leptos::attr::custom::custom_attribute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::ResizeObserver;

use mead_common::{
    paginate, CarouselState, ConditionDetail, ConditionSummary, FetchTicket, QueryState,
    SelectionController, SelectionState,
};

use crate::api::conditions::{fetch_condition_detail, fetch_conditions_list};
use crate::app::Page;
use crate::components::carousel::Carousel;
use crate::components::panel::{measure_fit_count, observe_resize};

/// 詳細取得を発行する。解決はチケットの世代照合つきで反映される
fn load_detail(controller: RwSignal<SelectionController<ConditionDetail>>, ticket: FetchTicket) {
    spawn_local(async move {
        let result = fetch_condition_detail(&ticket.id).await;
        if let Err(error) = &result {
            gloo::console::warn!(format!("condition detail fetch failed: {}", error));
        }
        // ページ破棄後に届いた結果はtry_updateが無視する
        let _ = controller.try_update(|c| c.resolve(&ticket, result));
    });
}

#[component]
pub fn ConditionsExplorerPage(set_page: WriteSignal<Page>) -> impl IntoView {
    let (conditions, set_conditions) = signal(Vec::<ConditionSummary>::new());
    let (is_list_loading, set_is_list_loading) = signal(true);
    let (list_error, set_list_error) = signal(None::<String>);

    let query = RwSignal::new(QueryState::new());
    let controller = RwSignal::new(SelectionController::<ConditionDetail>::new());
    let carousel = RwSignal::new(CarouselState::default());

    let list_ref = NodeRef::<leptos::html::Ul>::new();
    let list_panel_ref = NodeRef::<leptos::html::Div>::new();
    let pagination_ref = NodeRef::<leptos::html::Div>::new();
    let detail_card_ref = NodeRef::<leptos::html::Article>::new();
    let observer_store = StoredValue::new_local(None::<ResizeObserver>);

    // 一覧の初回ロード
    spawn_local(async move {
        match fetch_conditions_list().await {
            Ok(data) => {
                let _ = set_conditions.try_set(data);
            }
            Err(error) => {
                gloo::console::error!(format!("conditions list fetch failed: {}", error));
                let _ = set_list_error.try_set(Some(error.to_string()));
            }
        }
        let _ = set_is_list_loading.try_set(false);
    });

    // 絞り込み＋ページ計算（純粋導出）
    let page_view = Memo::new(move |_| paginate(&conditions.get(), &query.get()));

    // 保持しているページ番号を総ページ数に追従させる
    Effect::new(move |_| {
        let total = page_view.with(|v| v.total_pages);
        let out_of_range = query.with_untracked(|q| {
            let mut clamped = q.clone();
            clamped.clamp_page(total);
            clamped.page_number != q.page_number
        });
        if out_of_range {
            query.update(|q| q.clamp_page(total));
        }
    });

    // 絞り込み結果の変化に選択を追従させる
    Effect::new(move |_| {
        let filtered = page_view.with(|v| v.filtered.clone());
        let ticket = controller.try_update(|c| c.sync_filtered(&filtered)).flatten();
        if let Some(ticket) = ticket {
            load_detail(controller, ticket);
        }
    });

    // 選択・詳細の変化でカルーセルを初期化する
    let detail_images = Memo::new(move |_| {
        controller.with(|c| {
            (
                c.active_id().map(str::to_string),
                c.detail().map(ConditionDetail::image_urls).unwrap_or_default(),
            )
        })
    });
    Effect::new(move |_| {
        let (_, images) = detail_images.get();
        carousel.update(|c| c.rekey(images));
    });

    // レイアウト計測 → ページサイズ反映（値が変わるときのみ書き込む）
    let compute_page_size = move || {
        if page_view.with_untracked(|v| v.filtered.is_empty()) {
            return;
        }
        let (Some(list_el), Some(list_panel), Some(detail_card)) = (
            list_ref.get_untracked(),
            list_panel_ref.get_untracked(),
            detail_card_ref.get_untracked(),
        ) else {
            return;
        };
        let pagination = pagination_ref.get_untracked();
        let Some(fit) = measure_fit_count(
            &list_el,
            &list_panel,
            pagination.as_deref(),
            &detail_card,
        ) else {
            return;
        };
        if query.with_untracked(|q| q.page_size) != fit {
            query.update(|q| {
                q.apply_page_size(fit);
            });
        }
    };

    // データ変化後の再計測
    Effect::new(move |_| {
        let _ = page_view.get();
        let _ = detail_images.get();
        compute_page_size();
    });

    // 要素リサイズでの再計測
    Effect::new(move |_| {
        if observer_store.with_value(Option::is_some) {
            return;
        }
        let (Some(list_panel), Some(detail_card)) =
            (list_panel_ref.get(), detail_card_ref.get())
        else {
            return;
        };
        let mut targets: Vec<&web_sys::HtmlElement> = vec![&detail_card, &list_panel];
        let pagination = pagination_ref.get();
        if let Some(pagination) = pagination.as_deref() {
            targets.push(pagination);
        }
        if let Some(observer) = observe_resize(&targets, compute_page_size) {
            observer_store.set_value(Some(observer));
        }
    });
    on_cleanup(move || {
        observer_store.with_value(|observer| {
            if let Some(observer) = observer {
                observer.disconnect();
            }
        });
    });

    let on_select = move |id: String| {
        if let Some(ticket) = controller.try_update(|c| c.select(id)) {
            load_detail(controller, ticket);
        }
    };

    let is_detail_loading = move || controller.with(|c| c.is_loading());
    let detail_error = move || controller.with(|c| c.error().map(|e| e.to_string()));
    let detail = move || controller.with(|c| c.detail().cloned());
    let detail_alt = Signal::derive(move || detail().map(|d| d.name).unwrap_or_default());

    view! {
        <section class="page">
            <a
                class="back-link"
                href="#"
                on:click=move |ev| {
                    ev.prevent_default();
                    set_page.set(Page::Home);
                }
            >
                "<- Back to home"
            </a>

            <div class="hero">
                <div class="hero-copy">
                    <p class="eyebrow">"Medical explorer"</p>
                    <h1 class="hero-title">"Medical conditions directory"</h1>
                    <p class="hero-subtitle">
                        "Review symptoms, risk factors, and clinical summaries from linked open data sources."
                    </p>
                </div>
            </div>

            <div class="search-panel">
                <div>
                    <h2>"Search conditions"</h2>
                    <p class="muted">"Filter by name or id."</p>
                </div>
                <div class="search-field">
                    <input
                        id="condition-search"
                        class="search-input"
                        type="search"
                        placeholder="Start typing a condition..."
                        prop:value=move || query.with(|q| q.search_query.clone())
                        on:input=move |ev| {
                            query.update(|q| q.set_search_query(event_target_value(&ev)));
                        }
                    />
                </div>
            </div>

            <Show when=move || is_list_loading.get()>
                <p class="status">"Loading conditions..."</p>
            </Show>
            <Show when=move || list_error.get().is_some()>
                <p class="status error">
                    {move || format!("Error: {}", list_error.get().unwrap_or_default())}
                </p>
            </Show>

            <Show when=move || !is_list_loading.get() && list_error.get().is_none()>
                <div class="split-layout">
                    <div class="list-column">
                        <div class="section-head">
                            <h2>"Condition list"</h2>
                        </div>

                        <Show
                            when=move || page_view.with(|v| !v.filtered.is_empty())
                            fallback=|| view! {
                                <p class="status">"No conditions match your search."</p>
                            }
                        >
                            <div class="list-panel" node_ref=list_panel_ref>
                                <div class="list-scroll">
                                    <ul class="list" node_ref=list_ref>
                                        <For
                                            each=move || page_view.with(|v| v.page.clone())
                                            key=|condition| condition.id.clone()
                                            children=move |condition| {
                                                let select_id = condition.id.clone();
                                                let active_id = condition.id.clone();
                                                let is_active = move || {
                                                    controller.with(|c| {
                                                        c.active_id() == Some(active_id.as_str())
                                                    })
                                                };
                                                let pressed = is_active.clone();
                                                view! {
                                                    <li
                                                        class="card condition-card"
                                                        class:active=is_active
                                                    >
                                                        <div class="card-body list-row">
                                                            <div>
                                                                <h3>{condition.name.clone()}</h3>
                                                                <div class="muted">
                                                                    {format!("id: {}", condition.id)}
                                                                </div>
                                                            </div>
                                                            <button
                                                                type="button"
                                                                class="button"
                                                                on:click=move |_| on_select(select_id.clone())
                                                                aria-pressed=move || pressed().to_string()
                                                            >
                                                                "View details"
                                                            </button>
                                                        </div>
                                                    </li>
                                                }
                                            }
                                        />
                                    </ul>
                                </div>

                                <div class="pagination" node_ref=pagination_ref>
                                    <button
                                        class="page-button"
                                        type="button"
                                        on:click=move |_| query.update(|q| q.previous_page())
                                        disabled=move || page_view.with(|v| v.active_page == 1)
                                    >
                                        "Previous"
                                    </button>
                                    <span class="page-status">
                                        {move || {
                                            page_view.with(|v| {
                                                format!("Page {} of {}", v.active_page, v.total_pages)
                                            })
                                        }}
                                    </span>
                                    <button
                                        class="page-button"
                                        type="button"
                                        on:click=move |_| {
                                            let total = page_view.with_untracked(|v| v.total_pages);
                                            query.update(|q| q.next_page(total));
                                        }
                                        disabled=move || {
                                            page_view.with(|v| v.active_page == v.total_pages)
                                        }
                                    >
                                        "Next"
                                    </button>
                                </div>
                            </div>
                        </Show>
                    </div>

                    <div class="detail-column">
                        <div class="section-head">
                            <h2>"Condition details"</h2>
                        </div>
                        <Show when=is_detail_loading>
                            <p class="status">"Loading condition details..."</p>
                        </Show>
                        <Show when=move || detail_error().is_some()>
                            <p class="status error">
                                {move || format!("Error: {}", detail_error().unwrap_or_default())}
                            </p>
                        </Show>
                        <Show when=move || {
                            controller.with(|c| matches!(c.state(), SelectionState::Idle))
                                && page_view.with(|v| !v.filtered.is_empty())
                        }>
                            <p class="status">"Select a condition to see details."</p>
                        </Show>

                        {move || {
                            detail()
                                .map(|detail| {
                                    let vocab = if detail.context.is_empty() {
                                        "https://schema.org/".to_string()
                                    } else {
                                        detail.context.clone()
                                    };
                                    let type_of = if detail.schema_type.is_empty() {
                                        "MedicalCondition".to_string()
                                    } else {
                                        detail.schema_type.clone()
                                    };
                                    view! {
                                        <article
                                            {custom_attribute("vocab", vocab)}
                                            {custom_attribute("typeof", type_of)}
                                            {custom_attribute("resource", detail.id.clone())}
                                            class="card detail-card"
                                            node_ref=detail_card_ref
                                        >
                                            <header
                                                class="detail-header"
                                                class:single=move || {
                                                    carousel.with(|c| c.current_image().is_none())
                                                }
                                            >
                                                <div class="title-group">
                                                    <p class="eyebrow">"Medical condition"</p>
                                                    <h1 {custom_attribute("property", "name")}>{detail.name.clone()}</h1>
                                                    <p class="muted">
                                                        {format!("ID: {}", detail.display_identifier())}
                                                    </p>
                                                </div>

                                                <Carousel state=carousel alt=detail_alt />
                                            </header>

                                            <div class="detail-section">
                                                <h2>"Overview"</h2>
                                                <p {custom_attribute("property", "description")}>
                                                    {if detail.description.is_empty() {
                                                        "No description available.".to_string()
                                                    } else {
                                                        detail.description.clone()
                                                    }}
                                                </p>
                                            </div>

                                            <div class="detail-grid">
                                                <section class="detail-section">
                                                    <h2>"Symptoms"</h2>
                                                    {if detail.symptoms.is_empty() {
                                                        view! {
                                                            <p class="muted">"No symptoms documented."</p>
                                                        }
                                                            .into_any()
                                                    } else {
                                                        view! {
                                                            <ul class="info-list">
                                                                {detail
                                                                    .symptoms
                                                                    .iter()
                                                                    .map(|symptom| {
                                                                        view! {
                                                                            <li {custom_attribute("property", "signOrSymptom")}>
                                                                                {symptom.clone()}
                                                                            </li>
                                                                        }
                                                                    })
                                                                    .collect_view()}
                                                            </ul>
                                                        }
                                                            .into_any()
                                                    }}
                                                </section>

                                                <section class="detail-section">
                                                    <h2>"Risk factors"</h2>
                                                    {if detail.risk_factors.is_empty() {
                                                        view! {
                                                            <p class="muted">"No risk factors documented."</p>
                                                        }
                                                            .into_any()
                                                    } else {
                                                        view! {
                                                            <ul class="info-list">
                                                                {detail
                                                                    .risk_factors
                                                                    .iter()
                                                                    .map(|factor| {
                                                                        view! {
                                                                            <li {custom_attribute("property", "riskFactor")}>
                                                                                {factor.clone()}
                                                                            </li>
                                                                        }
                                                                    })
                                                                    .collect_view()}
                                                            </ul>
                                                        }
                                                            .into_any()
                                                    }}
                                                </section>
                                            </div>

                                            <section class="detail-section">
                                                <h2>"Clinical summary"</h2>
                                                <div class="snippet-container">
                                                    <pre class="snippet">
                                                        {if detail.wikidoc_snippet.is_empty() {
                                                            "No clinical snippet available.".to_string()
                                                        } else {
                                                            detail.wikidoc_snippet.clone()
                                                        }}
                                                    </pre>
                                                </div>
                                            </section>

                                            <footer class="detail-section">
                                                <h2>"References & Sources"</h2>
                                                <ul class="source-list">
                                                    {detail
                                                        .same_as
                                                        .iter()
                                                        .map(|url| {
                                                            view! {
                                                                <li>
                                                                    <a
                                                                        href=url.clone()
                                                                        target="_blank"
                                                                        rel="noreferrer"
                                                                    >
                                                                        {url.clone()}
                                                                    </a>
                                                                </li>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </ul>
                                            </footer>
                                        </article>
                                    }
                                })
                        }}
                    </div>
                </div>
            </Show>
        </section>
    }
}
