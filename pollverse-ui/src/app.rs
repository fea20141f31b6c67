//! App Root Component
//!
//! Main application component with routing, global providers and the
//! wallet event subscription.

use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use pollverse::config::Config;
use pollverse::session::WalletEventOutcome;

use crate::components::{Header, Toast};
use crate::pages::{CreatePollPage, IndexPage, PollPage};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App(config: Config) -> impl IntoView {
    let state = provide_global_state(&config);

    // Follow wallet account and network changes while the app is mounted
    let queries = Rc::clone(&state.queries);
    let session = Rc::downgrade(&state.session);
    let subscription = state.session.watch_wallet(move |outcome| match outcome {
        WalletEventOutcome::ReloadRequired => {
            if let Err(e) = window().location().reload() {
                tracing::error!(error = ?e, "Page reload failed");
            }
        }
        WalletEventOutcome::ReconnectRequired => {
            queries.clear();
            if let Some(session) = session.upgrade() {
                spawn_local(async move {
                    session.restore().await;
                });
            }
        }
        WalletEventOutcome::AccountSwitched(_) | WalletEventOutcome::Disconnected => {
            queries.clear();
        }
        WalletEventOutcome::Ignored => {}
    });
    on_cleanup(move || drop(subscription));

    if state.auto_connect {
        let session = Rc::clone(&state.session);
        spawn_local(async move {
            if let Some(account) = session.restore().await {
                tracing::info!(account = %account, "Restored wallet session");
            }
        });
    }

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Header />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=IndexPage />
                        <Route path="/poll/:id" view=PollPage />
                        <Route path="/create" view=CreatePollPage />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Footer with the last chain refresh
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let last_refresh = state.last_refresh;
    let snapshot = state.snapshot;
    let year = chrono::Utc::now().format("%Y").to_string();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <p class="text-gray-400">{format!("© {} PollVerse. All rights reserved.", year)}</p>

                <div class="text-gray-400">
                    {move || {
                        last_refresh.get()
                            .and_then(|ts| chrono::DateTime::from_timestamp_millis(ts))
                            .map(|dt| format!("Last refresh: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Powered by Ethereum blockchain".to_string())
                    }}
                </div>

                {move || {
                    if snapshot.get().is_loading() {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <div class="loading-spinner w-4 h-4" />
                                <span>"Connecting..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Polls"
            </A>
        </div>
    }
}
