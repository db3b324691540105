//! Hero section component

use leptos::*;

#[component]
pub fn Hero(
    #[prop(into)] title: String,
    #[prop(into)] subtitle: String,
) -> impl IntoView {
    view! {
        <div class="hero">
            <h1>{title}</h1>
            <p class="subtitle">{subtitle}</p>
        </div>
    }
}
