//! Header Component
//!
//! Brand, navigation links and the wallet button.

use leptos::*;
use leptos_router::*;

use pollverse::chain::short_address;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Header() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let snapshot = state.snapshot;

    view! {
        <header class="sticky top-0 z-10 bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"📊"</span>
                        <span class="text-xl font-bold text-white">"PollVerse"</span>
                    </A>

                    <div class="hidden md:flex items-center space-x-1">
                        <NavLink href="/" label="Polls" />
                        <NavLink href="/create" label="Create Poll" />
                    </div>

                    {move || {
                        let state = state.clone();
                        match snapshot.get().account() {
                            Some(account) => view! {
                                <div class="flex items-center space-x-4">
                                    <span class="hidden md:block text-sm text-gray-300">
                                        {short_address(&account)}
                                    </span>
                                    <button
                                        on:click=move |_| state.disconnect()
                                        class="px-3 py-1.5 text-sm border border-gray-600 rounded-lg
                                               hover:bg-gray-700 transition-colors"
                                    >
                                        "Disconnect"
                                    </button>
                                </div>
                            }.into_view(),
                            None => view! { <ConnectButton /> }.into_view(),
                        }
                    }}
                </div>
            </div>
        </header>
    }
}

/// Connect button; shows progress while the wallet prompt is open
#[component]
pub fn ConnectButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let snapshot = state.snapshot;
    let loading = move || snapshot.get().is_loading();

    view! {
        <button
            on:click=move |_| state.connect()
            disabled=loading
            class="px-4 py-2 text-sm bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                   rounded-lg font-medium transition-colors"
        >
            {move || if loading() { "Connecting..." } else { "Connect Wallet" }}
        </button>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
