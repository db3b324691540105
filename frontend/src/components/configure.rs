//! Paper configuration page.
//!
//! Owns one [`ConfigurationBuilder`] for the session in the URL. Every control
//! goes through the builder's capability methods (`update_question_set`,
//! `remove_question_set`, `toggle_topic`, ...) so the rendered rows never hold
//! state of their own.

use leptos::*;
use leptos_router::use_params_map;
use qgen_core::{
    perform_generation, ConfigError, ConfigurationBuilder, NotificationKind, QuestionSetUpdate,
    QuestionType, SessionId, Shell, ALLOWED_MARKS, MAX_QUESTION_COUNT,
};
use web_sys::Event;

use crate::components::{GenerationModal, Hero};
use crate::config::client_config;
use crate::services::{page_host, read_session_context, BrowserFile, PageShell};
use crate::types::Notification;

#[component]
pub fn ConfigurePage(set_notifications: WriteSignal<Vec<Notification>>) -> impl IntoView {
    let params = use_params_map();
    let session_id = move || params.with(|p| p.get("session_id").cloned());

    let context = read_session_context();
    let suggested = store_value(context.suggested_patterns);
    let builder = create_rw_signal({
        let mut builder = ConfigurationBuilder::new();
        builder.set_available_topics(context.topics);
        builder
    });

    let (progress_visible, set_progress_visible) = create_signal(false);
    let (progress, set_progress) = create_signal(0.0_f64);
    let (submit_enabled, set_submit_enabled) = create_signal(true);

    let shell = PageShell {
        notifications: set_notifications,
        progress_visible: set_progress_visible,
        progress: set_progress,
        submit_enabled: set_submit_enabled,
    };

    let report = move |e: ConfigError| {
        log::warn!("⚠️ {}", e);
        shell.notify(&e.to_string(), NotificationKind::Error);
    };

    // Scalar fields
    let on_title = move |ev: Event| builder.update(|b| b.set_title(&event_target_value(&ev)));
    let on_subject = move |ev: Event| builder.update(|b| b.set_subject(&event_target_value(&ev)));
    let on_instructions = move |ev: Event| builder.update(|b| b.set_instructions(&event_target_value(&ev)));
    let on_target = move |ev: Event| {
        let raw = event_target_value(&ev);
        let result = match raw.trim().parse::<u32>() {
            Ok(value) => {
                let mut result = Ok(());
                builder.update(|b| result = b.set_target_marks(value));
                result
            }
            Err(_) => Err(ConfigError::InvalidValue { field: "total_marks".into(), value: raw }),
        };
        if let Err(e) = result {
            report(e);
        }
    };
    let on_difficulty = move |ev: Event| {
        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
            let mut result = Ok(());
            builder.update(|b| result = b.set_difficulty(value));
            if let Err(e) = result {
                report(e);
            }
        }
    };

    let on_add = move |_| {
        builder.update(|b| {
            b.add_question_set();
        });
    };

    let on_apply_suggested = move |_| {
        let mut applied = 0;
        suggested.with_value(|patterns| builder.update(|b| applied = b.apply_suggested(patterns)));
        log::info!("🧩 Applied {} suggested pattern(s)", applied);
    };

    let on_generate = move |_| {
        let session = SessionId::from_page(session_id().as_deref());
        let config = client_config();
        let mut prepared = None;
        builder.update(|b| prepared = Some(b.begin_submit::<BrowserFile>(session.as_ref(), &config)));

        match prepared {
            Some(Ok(request)) => {
                spawn_local(async move {
                    let host = page_host(shell);
                    let mut rng = rand::thread_rng();
                    let outcome = perform_generation(&host, request, &mut rng).await;
                    builder.update(|b| b.settle(&outcome));
                });
            }
            Some(Err(e)) => report(e),
            None => {}
        }
    };

    let total_check = move || builder.with(|b| b.total_check());
    let generate_disabled =
        move || !submit_enabled.get() || builder.with(|b| b.phase() != qgen_core::BuilderPhase::Building);

    view! {
        <div class="container">
            <Hero
                title="Configure your paper"
                subtitle="Describe the paper, then add question sets until the total matches the target."
            />

            <section class="config-card">
                <label class="field">
                    "Title"
                    <input type="text" placeholder="Mid-term examination"
                        prop:value=move || builder.with(|b| b.title().to_string())
                        on:input=on_title/>
                </label>
                <label class="field">
                    "Subject"
                    <input type="text" placeholder="Physics"
                        prop:value=move || builder.with(|b| b.subject().to_string())
                        on:input=on_subject/>
                </label>
                <label class="field">
                    "Total marks"
                    <input type="number" min="1"
                        prop:value=move || builder.with(|b| b.target_marks().to_string())
                        on:change=on_target/>
                </label>
                <label class="field">
                    {move || format!("Difficulty: {}/10", builder.with(|b| b.difficulty()))}
                    <input type="range" min="1" max="10"
                        prop:value=move || builder.with(|b| b.difficulty().to_string())
                        on:input=on_difficulty/>
                </label>
                <label class="field">
                    "Instructions"
                    <textarea rows="3"
                        prop:value=move || builder.with(|b| b.instructions().to_string())
                        on:input=on_instructions></textarea>
                </label>
            </section>

            <Show when=move || builder.with(|b| !b.available_topics().is_empty()) fallback=|| view! {}>
                <section class="config-card">
                    <h3>"Priority topics"</h3>
                    <div class="topics">
                        <For
                            each=move || builder.with(|b| b.available_topics().to_vec())
                            key=|topic| topic.clone()
                            children=move |topic| view! { <TopicChip topic=topic builder=builder/> }
                        />
                    </div>
                </section>
            </Show>

            <section class="config-card">
                <div class="section-header">
                    <h3>"Question sets"</h3>
                    <Show when=move || suggested.with_value(|p| !p.is_empty()) fallback=|| view! {}>
                        <button class="secondary-button" on:click=on_apply_suggested>
                            "Use suggested pattern"
                        </button>
                    </Show>
                </div>
                <For
                    each=move || builder.with(|b| b.question_sets().iter().map(|s| s.id).collect::<Vec<_>>())
                    key=|id| *id
                    children=move |id| view! { <QuestionSetRow id=id builder=builder report=report/> }
                />
                <button class="secondary-button" id="addQuestionSet" on:click=on_add>
                    "+ Add question set"
                </button>
            </section>

            <div class=move || if total_check().within_tolerance { "total ok" } else { "total warn" }>
                {move || {
                    let check = total_check();
                    format!("Total: {} / {} marks", check.total, check.target)
                }}
            </div>

            <button class="upload-button" id="generateBtn" disabled=generate_disabled on:click=on_generate>
                "Generate paper"
            </button>

            <GenerationModal visible=progress_visible percent=progress/>
        </div>
    }
}

#[component]
fn QuestionSetRow<E>(id: u32, builder: RwSignal<ConfigurationBuilder>, report: E) -> impl IntoView
where
    E: Fn(ConfigError) + Copy + 'static,
{
    let current = move || builder.with(|b| b.question_set(id).cloned());

    let update = move |field: &'static str, value: String| {
        match QuestionSetUpdate::parse(field, &value) {
            Ok(update) => builder.update(|b| {
                b.update_question_set(id, update);
            }),
            Err(e) => report(e),
        }
    };

    let on_remove = move |_| {
        let mut result = Ok(false);
        builder.update(|b| result = b.remove_question_set(id));
        if let Err(e) = result {
            report(e);
        }
    };

    view! {
        <div class="question-set" data-id=id>
            <select on:change=move |ev: Event| update("type", event_target_value(&ev))>
                {QuestionType::ALL
                    .into_iter()
                    .map(|t| {
                        let selected = move || current().map(|s| s.question_type == t).unwrap_or(false);
                        view! { <option value=t.code() selected=selected>{t.label()}</option> }
                    })
                    .collect_view()}
            </select>
            <select on:change=move |ev: Event| update("marks", event_target_value(&ev))>
                {ALLOWED_MARKS
                    .into_iter()
                    .map(|m| {
                        let selected = move || current().map(|s| s.marks.get() == m).unwrap_or(false);
                        view! { <option value=m.to_string() selected=selected>{m} " marks"</option> }
                    })
                    .collect_view()}
            </select>
            <input type="number" min="1" max=MAX_QUESTION_COUNT.to_string()
                prop:value=move || current().map(|s| s.count.get().to_string()).unwrap_or_default()
                on:change=move |ev: Event| update("count", event_target_value(&ev))/>
            <span class="subtotal">
                {move || current().map(|s| format!("= {} marks", s.subtotal())).unwrap_or_default()}
            </span>
            <button class="file-remove" on:click=on_remove>"✕"</button>
        </div>
    }
}

#[component]
fn TopicChip(topic: String, builder: RwSignal<ConfigurationBuilder>) -> impl IntoView {
    let selected = {
        let topic = topic.clone();
        create_memo(move |_| builder.with(|b| b.is_topic_selected(&topic)))
    };
    let toggle = {
        let topic = topic.clone();
        move |_| {
            builder.update(|b| {
                b.toggle_topic(&topic);
            });
        }
    };

    view! {
        <label class=move || if selected.get() { "topic selected" } else { "topic" }>
            <input type="checkbox" prop:checked=move || selected.get() on:change=toggle/>
            {topic}
        </label>
    }
}
