//! File upload page with drag & drop support.
//!
//! Owns one [`UploadSession`]: files come in through the picker or a drop,
//! can be removed one by one, and are posted together to start a session.

use leptos::ev::DragEvent;
use leptos::*;
use qgen_core::{perform_upload, UploadSession};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use crate::components::{Hero, ProgressBar};
use crate::config::client_config;
use crate::services::{files_from_list, page_host, BrowserFile, PageShell};
use crate::types::Notification;

#[component]
pub fn UploadPage(set_notifications: WriteSignal<Vec<Notification>>) -> impl IntoView {
    let session = create_rw_signal(UploadSession::<BrowserFile>::new());
    let (is_dragging, set_is_dragging) = create_signal(false);
    let (progress_visible, set_progress_visible) = create_signal(false);
    let (progress, set_progress) = create_signal(0.0_f64);
    let (submit_enabled, set_submit_enabled) = create_signal(true);

    let shell = PageShell {
        notifications: set_notifications,
        progress_visible: set_progress_visible,
        progress: set_progress,
        submit_enabled: set_submit_enabled,
    };

    let acquire = move |files: Vec<BrowserFile>| {
        log::info!("📂 {} file(s) selected", files.len());
        session.update(|s| s.acquire(files));
    };

    // Picker and drop both replace the selection
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            acquire(files_from_list(&list));
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragging.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragging.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragging.set(false);
        if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
            acquire(files_from_list(&list));
        }
    };

    let trigger_file_input = move |_| {
        if let Some(input) = gloo_utils::document().get_element_by_id("fileInput") {
            if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                html_input.click();
            }
        }
    };

    let on_submit = move |_| {
        let config = client_config();
        let mut prepared = None;
        session.update(|s| prepared = s.begin_submit(&config.upload_url()));
        let Some(request) = prepared else {
            return;
        };

        spawn_local(async move {
            let host = page_host(shell);
            let mut rng = rand::thread_rng();
            let outcome = perform_upload(&host, request, &mut rng).await;
            session.update(|s| s.settle(&outcome));
        });
    };

    let is_submitting = move || session.with(|s| s.phase() == qgen_core::UploadPhase::Submitting);
    let submit_disabled = move || !session.with(|s| s.can_submit()) || !submit_enabled.get();

    view! {
        <div class="container">
            <Hero
                title="Question Paper Studio"
                subtitle="Upload your syllabus, notes or past papers to start a generation session."
            />

            <div
                class=move || if is_dragging.get() { "upload-section dragover" } else { "upload-section" }
                id="uploadZone"
                on:click=trigger_file_input
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <div class="upload-icon">"📤"</div>
                <div class="upload-text">
                    {move || if is_submitting() {
                        "⏳ Uploading..."
                    } else {
                        "Drop your files here"
                    }}
                </div>
                <div class="upload-hint">"or click to browse (PDF, DOCX, TXT)"</div>
                <input
                    type="file"
                    id="fileInput"
                    multiple=true
                    accept=".pdf,.docx,.txt"
                    style="display:none"
                    on:change=on_file_change
                />
            </div>

            <Show when=move || !session.with(|s| s.is_empty()) fallback=|| view! {}>
                <ul class="file-list" id="filePreview">
                    <For
                        each=move || {
                            session.with(|s| {
                                s.files()
                                    .iter()
                                    .enumerate()
                                    .map(|(i, f)| (i, f.name.clone(), f.display_size()))
                                    .collect::<Vec<_>>()
                            })
                        }
                        key=|(i, name, _)| (*i, name.clone())
                        children=move |(index, name, size)| {
                            view! {
                                <li class="file-item">
                                    <span class="file-name">"📄 " {name}</span>
                                    <span class="file-size">{size}</span>
                                    <button
                                        class="file-remove"
                                        disabled=is_submitting
                                        on:click=move |_| {
                                            session.update(|s| {
                                                s.remove(index);
                                            });
                                        }
                                    >
                                        "✕"
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>

            <ProgressBar visible=progress_visible percent=progress/>

            <button class="upload-button" id="submitBtn" disabled=submit_disabled on:click=on_submit>
                {move || if is_submitting() { "Uploading..." } else { "Upload & Continue" }}
            </button>
        </div>
    }
}
