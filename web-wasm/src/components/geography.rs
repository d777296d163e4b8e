//! 地域エクスプローラページ
//!
//! conditionsページと同じ骨格に、地域タイプの絞り込みチップ、
//! 人口統計の整形表示、画像グリッド（最大6枚）が加わる。

use std::collections::HashSet;

use leptos::attr::custom::custom_attribute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::ResizeObserver;

use mead_common::format::{
    build_wikipedia_url, format_population, RegionTypeFilter,
};
use mead_common::images::normalize_image_key;
use mead_common::{
    paginate, FetchTicket, QueryState, RegionDetail, RegionSummary,
    SelectionController, SelectionState,
};

use crate::api::geography::{fetch_region_detail, fetch_regions_list};
use crate::app::Page;
use crate::components::panel::{measure_fit_count, observe_resize};

/// 詳細カードに並べる画像の上限
const IMAGE_GRID_LIMIT: usize = 6;

fn load_detail(controller: RwSignal<SelectionController<RegionDetail>>, ticket: FetchTicket) {
    spawn_local(async move {
        let result = fetch_region_detail(&ticket.id).await;
        if let Err(error) = &result {
            gloo::console::warn!(format!("region detail fetch failed: {}", error));
        }
        let _ = controller.try_update(|c| c.resolve(&ticket, result));
    });
}

#[component]
pub fn GeographyPage(set_page: WriteSignal<Page>) -> impl IntoView {
    let (regions, set_regions) = signal(Vec::<RegionSummary>::new());
    let (is_list_loading, set_is_list_loading) = signal(true);
    let (list_error, set_list_error) = signal(None::<String>);
    let (type_filter, set_type_filter) = signal(RegionTypeFilter::All);

    let query = RwSignal::new(QueryState::new());
    let controller = RwSignal::new(SelectionController::<RegionDetail>::new());
    let (broken_keys, set_broken_keys) = signal(HashSet::<String>::new());

    let list_ref = NodeRef::<leptos::html::Ul>::new();
    let list_panel_ref = NodeRef::<leptos::html::Div>::new();
    let pagination_ref = NodeRef::<leptos::html::Div>::new();
    let detail_card_ref = NodeRef::<leptos::html::Article>::new();
    let observer_store = StoredValue::new_local(None::<ResizeObserver>);

    spawn_local(async move {
        match fetch_regions_list().await {
            Ok(data) => {
                let _ = set_regions.try_set(data);
            }
            Err(error) => {
                gloo::console::error!(format!("regions list fetch failed: {}", error));
                let _ = set_list_error.try_set(Some(error.to_string()));
            }
        }
        let _ = set_is_list_loading.try_set(false);
    });

    // タイプ絞り込み → 検索・ページングの順で適用する
    let typed_regions = Memo::new(move |_| {
        let filter = type_filter.get();
        regions.with(|all| {
            all.iter()
                .filter(|region| filter.matches(&region.schema_type))
                .cloned()
                .collect::<Vec<_>>()
        })
    });
    let page_view = Memo::new(move |_| paginate(&typed_regions.get(), &query.get()));

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

    Effect::new(move |_| {
        let filtered = page_view.with(|v| v.filtered.clone());
        let ticket = controller.try_update(|c| c.sync_filtered(&filtered)).flatten();
        if let Some(ticket) = ticket {
            load_detail(controller, ticket);
        }
    });

    let detail_images = Memo::new(move |_| {
        controller.with(|c| {
            (
                c.active_id().map(str::to_string),
                c.detail().map(RegionDetail::image_urls).unwrap_or_default(),
            )
        })
    });
    // 選択の切り替えで失敗記録をリセットする
    Effect::new(move |_| {
        let _ = detail_images.get();
        set_broken_keys.set(HashSet::new());
    });
    // 失敗画像を除いた先頭6枚をグリッドに出す
    let grid_images = Memo::new(move |_| {
        let (_, images) = detail_images.get();
        broken_keys.with(|broken| {
            images
                .into_iter()
                .filter(|url| !broken.contains(&normalize_image_key(url)))
                .take(IMAGE_GRID_LIMIT)
                .collect::<Vec<_>>()
        })
    });
    let on_image_error = move |url: String| {
        set_broken_keys.update(|broken| {
            broken.insert(normalize_image_key(&url));
        });
    };

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

    Effect::new(move |_| {
        let _ = page_view.get();
        let _ = detail_images.get();
        compute_page_size();
    });

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
    let on_filter = move |filter: RegionTypeFilter| {
        set_type_filter.set(filter);
        query.update(|q| q.page_number = 1);
    };

    let is_detail_loading = move || controller.with(|c| c.is_loading());
    let detail_error = move || controller.with(|c| c.error().map(|e| e.to_string()));
    let detail = move || controller.with(|c| c.detail().cloned());

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
                    <p class="eyebrow">"Geography explorer"</p>
                    <h1 class="hero-title">"Population context by region"</h1>
                    <p class="hero-subtitle">
                        "Compare population, density, climate, industry, and cultural factors across cities, countries, and continents."
                    </p>
                </div>
            </div>

            <div class="search-panel">
                <div>
                    <h2>"Search regions"</h2>
                    <p class="muted">"Filter by name or id."</p>
                </div>
                <div class="search-field">
                    <input
                        id="region-search"
                        class="search-input"
                        type="search"
                        placeholder="Start typing a region..."
                        prop:value=move || query.with(|q| q.search_query.clone())
                        on:input=move |ev| {
                            query.update(|q| q.set_search_query(event_target_value(&ev)));
                        }
                    />
                </div>
                <div class="filter-chips">
                    {RegionTypeFilter::ALL_FILTERS
                        .into_iter()
                        .map(|filter| {
                            view! {
                                <button
                                    type="button"
                                    class="chip"
                                    class:active=move || type_filter.get() == filter
                                    on:click=move |_| on_filter(filter)
                                >
                                    {filter.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <Show when=move || is_list_loading.get()>
                <p class="status">"Loading regions..."</p>
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
                            <h2>"Region list"</h2>
                        </div>

                        <Show
                            when=move || page_view.with(|v| !v.filtered.is_empty())
                            fallback=|| view! {
                                <p class="status">"No regions match your search."</p>
                            }
                        >
                            <div class="list-panel" node_ref=list_panel_ref>
                                <div class="list-scroll">
                                    <ul class="list" node_ref=list_ref>
                                        <For
                                            each=move || page_view.with(|v| v.page.clone())
                                            key=|region| region.id.clone()
                                            children=move |region| {
                                                let select_id = region.id.clone();
                                                let active_id = region.id.clone();
                                                let is_active = move || {
                                                    controller.with(|c| {
                                                        c.active_id() == Some(active_id.as_str())
                                                    })
                                                };
                                                let pressed = is_active.clone();
                                                let type_label = if region.schema_type.is_empty() {
                                                    "Region".to_string()
                                                } else {
                                                    region.schema_type.clone()
                                                };
                                                view! {
                                                    <li
                                                        class="card region-card"
                                                        class:active=is_active
                                                    >
                                                        <div class="card-body list-row">
                                                            <div>
                                                                <h3>{region.name.clone()}</h3>
                                                                <div class="muted">{type_label}</div>
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
                            <h2>"Region details"</h2>
                        </div>
                        <Show when=is_detail_loading>
                            <p class="status">"Loading region details..."</p>
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
                            <p class="status">"Select a region to see details."</p>
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
                                        "Place".to_string()
                                    } else {
                                        detail.schema_type.clone()
                                    };
                                    let population = format_population(
                                        detail.population_total.as_ref(),
                                        0,
                                    );
                                    let density = format_population(
                                        detail.population_density.as_ref(),
                                        2,
                                    );
                                    let wikipedia_url = build_wikipedia_url(&detail);
                                    let grid_alt = StoredValue::new(detail.name.clone());
                                    view! {
                                        <article
                                            {custom_attribute("vocab", vocab)}
                                            {custom_attribute("typeof", type_of)}
                                            {custom_attribute("resource", detail.id.clone())}
                                            class="card detail-card"
                                            node_ref=detail_card_ref
                                        >
                                            <header class="detail-header single">
                                                <div class="title-group">
                                                    <p class="eyebrow">"Region"</p>
                                                    <h1 {custom_attribute("property", "name")}>{detail.name.clone()}</h1>
                                                    <p class="muted">
                                                        {format!("ID: {}", detail.display_identifier())}
                                                    </p>
                                                </div>
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

                                            <div class="detail-section">
                                                <h2>"Population stats"</h2>
                                                <dl class="stat-list">
                                                    <div class="stat">
                                                        <dt>"Total population"</dt>
                                                        <dd>
                                                            {population
                                                                .unwrap_or_else(|| "Unknown".to_string())}
                                                        </dd>
                                                    </div>
                                                    <div class="stat">
                                                        <dt>"Population density"</dt>
                                                        <dd>
                                                            {density
                                                                .unwrap_or_else(|| "Unknown".to_string())}
                                                        </dd>
                                                    </div>
                                                </dl>
                                            </div>

                                            <div class="detail-grid">
                                                <section class="detail-section">
                                                    <h2>"Cultural factors"</h2>
                                                    {if detail.cultural_factors.is_empty() {
                                                        view! {
                                                            <p class="muted">
                                                                "No cultural factors documented."
                                                            </p>
                                                        }
                                                            .into_any()
                                                    } else {
                                                        view! {
                                                            <ul class="info-list">
                                                                {detail
                                                                    .cultural_factors
                                                                    .iter()
                                                                    .map(|factor| {
                                                                        view! { <li>{factor.clone()}</li> }
                                                                    })
                                                                    .collect_view()}
                                                            </ul>
                                                        }
                                                            .into_any()
                                                    }}
                                                </section>

                                                <section class="detail-section">
                                                    <h2>"Climates"</h2>
                                                    {if detail.climates.is_empty() {
                                                        view! {
                                                            <p class="muted">"No climates documented."</p>
                                                        }
                                                            .into_any()
                                                    } else {
                                                        view! {
                                                            <ul class="info-list">
                                                                {detail
                                                                    .climates
                                                                    .iter()
                                                                    .map(|climate| {
                                                                        view! { <li>{climate.clone()}</li> }
                                                                    })
                                                                    .collect_view()}
                                                            </ul>
                                                        }
                                                            .into_any()
                                                    }}
                                                </section>
                                            </div>

                                            <section class="detail-section">
                                                <h2>"Industrial development"</h2>
                                                {if detail.industrial_development.is_empty() {
                                                    view! {
                                                        <p class="muted">
                                                            "No industrial development documented."
                                                        </p>
                                                    }
                                                        .into_any()
                                                } else {
                                                    view! {
                                                        <ul class="info-list">
                                                            {detail
                                                                .industrial_development
                                                                .iter()
                                                                .map(|entry| {
                                                                    view! { <li>{entry.clone()}</li> }
                                                                })
                                                                .collect_view()}
                                                        </ul>
                                                    }
                                                        .into_any()
                                                }}
                                            </section>

                                            <section class="detail-section">
                                                <h2>"Images"</h2>
                                                <Show
                                                    when=move || !grid_images.get().is_empty()
                                                    fallback=|| view! {
                                                        <p class="muted">"No images available."</p>
                                                    }
                                                >
                                                    <div class="image-grid">
                                                        <For
                                                            each=move || grid_images.get()
                                                            key=|url| normalize_image_key(url)
                                                            children=move |url| {
                                                                let failed_url = url.clone();
                                                                view! {
                                                                    <img
                                                                        src=url.clone()
                                                                        alt=grid_alt.get_value()
                                                                        {custom_attribute("property", "image")}
                                                                        on:error=move |_| {
                                                                            on_image_error(failed_url.clone())
                                                                        }
                                                                    />
                                                                }
                                                            }
                                                        />
                                                    </div>
                                                </Show>
                                            </section>

                                            <section class="detail-section">
                                                <h2>"Wikipedia summary"</h2>
                                                <div class="snippet-container">
                                                    <pre class="snippet">
                                                        {if detail.wikipedia_snippet.is_empty() {
                                                            "No summary available.".to_string()
                                                        } else {
                                                            detail.wikipedia_snippet.clone()
                                                        }}
                                                    </pre>
                                                </div>
                                            </section>

                                            <footer class="detail-section">
                                                <h2>"References & Sources"</h2>
                                                <ul class="source-list">
                                                    {wikipedia_url
                                                        .iter()
                                                        .chain(detail.same_as.iter())
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
