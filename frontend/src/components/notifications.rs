//! Toast list fed by the page shells.

use leptos::*;

use crate::types::Notification;

#[component]
pub fn NotificationList(
    notifications: ReadSignal<Vec<Notification>>,
    set_notifications: WriteSignal<Vec<Notification>>,
) -> impl IntoView {
    view! {
        <div class="notifications" id="notifications">
            <For
                each=move || notifications.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    let dismiss = move |_| {
                        set_notifications.update(|list| list.retain(|x| x.id != id));
                    };
                    view! {
                        <div class=n.css_class()>
                            <span class="notification-time">"[" {n.timestamp.clone()} "] "</span>
                            {n.emoji()} " " {n.message.clone()}
                            <button class="notification-close" on:click=dismiss>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
