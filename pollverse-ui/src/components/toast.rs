//! Toast Notification Component
//!
//! Renders session and page notifications.

use leptos::*;

use pollverse::session::Notification;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let toasts = state.toasts;

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2 max-w-sm">
            <For
                each=move || toasts.get()
                key=|entry| entry.id
                children=move |entry| {
                    let state = state.clone();
                    let id = entry.id;
                    view! {
                        <ToastMessage
                            notification=entry.notification
                            on_dismiss=move |_| state.dismiss(id)
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ToastMessage(
    notification: Notification,
    #[prop(into)]
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let (icon, bg_class) = if notification.is_destructive() {
        ("✕", "bg-red-600")
    } else {
        ("✓", "bg-green-600")
    };

    view! {
        <div class=format!(
            "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
             transform transition-all duration-300 ease-out animate-slide-in",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <div class="flex-1">
                <p class="text-sm font-semibold">{notification.title}</p>
                <p class="text-sm opacity-90">{notification.description}</p>
            </div>
            <button
                class="text-white/70 hover:text-white"
                on:click=move |_| on_dismiss.call(())
            >
                "×"
            </button>
        </div>
    }
}
