//! ホームページコンポーネント

use leptos::prelude::*;

use crate::app::Page;

#[component]
pub fn HomePage(set_page: WriteSignal<Page>) -> impl IntoView {
    view! {
        <section class="page">
            <div class="hero">
                <div class="hero-copy">
                    <p class="eyebrow">"Project focus"</p>
                    <h1 class="hero-title">
                        "MeAd helps high-school students explore medical conditions and geography"
                    </h1>
                    <p class="hero-subtitle">
                        "Learn about common diseases, allergies, food intolerance, obesity, and disorders, plus how they affect the human body."
                    </p>
                    <p class="hero-subtitle">
                        "Explore geographic population context with climate, industrial development, population density, and cultural factors for towns, countries, or continents."
                    </p>
                </div>
            </div>

            <div class="feature-grid">
                <div class="card feature-card">
                    <p class="eyebrow">"Medical"</p>
                    <h2>"Medical conditions"</h2>
                    <p class="muted">
                        "Browse conditions, symptoms, risk factors, and sources to understand health topics."
                    </p>
                    <button class="button" on:click=move |_| set_page.set(Page::Conditions)>
                        "Browse conditions"
                    </button>
                </div>
                <div class="card feature-card">
                    <p class="eyebrow">"Geography"</p>
                    <h2>"Geography explorer"</h2>
                    <p class="muted">
                        "Inspect population context by region, including climate, industry, and cultural factors."
                    </p>
                    <button class="button" on:click=move |_| set_page.set(Page::Geography)>
                        "Open geography explorer"
                    </button>
                </div>
            </div>
        </section>
    }
}
