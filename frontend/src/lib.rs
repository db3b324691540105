//! Question Paper Studio - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading source documents and configuring
//! the question paper generated from them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  NotificationList (toasts shared by both pages)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /                       UploadPage                      │
//! │  │                           └── ProgressBar                 │
//! │  └── /configure/:session_id  ConfigurePage                   │
//! │                              └── GenerationModal             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Page state lives in `qgen_core` state machines held in signals; the
//! network half of each flow runs in `spawn_local` against a [`PageHost`].
//!
//! # Modules
//!
//! - [`types`] - Common types (Notification, SessionContext)
//! - [`components`] - UI components (pages, progress, toasts)
//! - [`services`] - Browser collaborators (transport, clock, shell)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{Notification, SessionContext};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Question Paper Studio - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (notifications, set_notifications) = create_signal(Vec::<Notification>::new());

    view! {
        <Title text=APP_NAME/>
        <Router>
            <NotificationList notifications=notifications set_notifications=set_notifications/>
            <main>
                <Routes>
                    <Route
                        path="/"
                        view=move || view! { <UploadPage set_notifications=set_notifications/> }
                    />
                    <Route
                        path="/configure/:session_id"
                        view=move || view! { <ConfigurePage set_notifications=set_notifications/> }
                    />
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}
