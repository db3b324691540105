//! Progress surfaces: the inline upload bar and the blocking generation modal.

use leptos::*;

#[component]
pub fn ProgressBar(
    /// Whether the bar is shown
    visible: ReadSignal<bool>,
    /// Percentage in `0..=100`
    percent: ReadSignal<f64>,
) -> impl IntoView {
    view! {
        <Show when=move || visible.get() fallback=|| view! {}>
            <div class="progress-section show" id="progressSection">
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        id="progressFill"
                        style=move || format!("width: {:.0}%;", percent.get())
                    ></div>
                </div>
                <div class="progress-label">{move || format!("{:.0}%", percent.get())}</div>
            </div>
        </Show>
    }
}

#[component]
pub fn GenerationModal(visible: ReadSignal<bool>, percent: ReadSignal<f64>) -> impl IntoView {
    let label = move || {
        if percent.get() >= 100.0 {
            "✅ Paper ready, opening preview..."
        } else {
            "⏳ Generating your question paper..."
        }
    };

    view! {
        <Show when=move || visible.get() fallback=|| view! {}>
            <div class="modal-backdrop" id="generationModal">
                <div class="modal">
                    <div class="modal-title">{label}</div>
                    <div class="progress-bar">
                        <div
                            class="progress-fill"
                            style=move || format!("width: {:.0}%;", percent.get())
                        ></div>
                    </div>
                    <div class="progress-label">{move || format!("{:.0}%", percent.get())}</div>
                    <div class="modal-hint">"This can take a minute. Please keep this page open."</div>
                </div>
            </div>
        </Show>
    }
}
