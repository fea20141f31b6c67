//! Poll List Page
//!
//! Welcome banner plus the searchable, filterable poll grid.

use leptos::*;

use pollverse::chain::Poll;
use pollverse::views::{load_poll_list, ListQuery, PollFilter};

use crate::components::{CardSkeleton, PollCard, WalletRequired};
use crate::state::global::GlobalState;

/// Index page component
#[component]
pub fn IndexPage() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <div class="text-center max-w-3xl mx-auto mb-12">
                <h1 class="text-4xl font-bold mb-4 tracking-tight">
                    "Welcome to "
                    <span class="text-primary-400">"PollVerse"</span>
                </h1>
                <p class="text-xl text-gray-400">
                    "Create, vote, and explore decentralized polls on the blockchain"
                </p>
            </div>

            <WalletRequired>
                <PollList />
            </WalletRequired>
        </div>
    }
}

#[component]
fn PollList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // None while the first fetch is in flight
    let (polls, set_polls) = create_signal(None::<Vec<Poll>>);
    let (search, set_search) = create_signal(String::new());
    let (filter, set_filter) = create_signal(PollFilter::All);

    create_effect(move |_| {
        if let Some(cached) = state.queries.list(chrono::Utc::now()) {
            set_polls.set(Some(cached));
            return;
        }

        let state = state.clone();
        spawn_local(async move {
            match load_poll_list(&state.session).await {
                Ok(list) => {
                    state.queries.store_list(list.clone(), chrono::Utc::now());
                    state.mark_refreshed();
                    set_polls.set(Some(list));
                }
                // The session already reported the failure
                Err(_) => set_polls.set(Some(Vec::new())),
            }
        });
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row gap-4 md:items-end">
                <div class="flex-1 space-y-2">
                    <label for="search" class="block text-sm text-gray-400">"Search Polls"</label>
                    <input
                        id="search"
                        type="search"
                        placeholder="Search by title..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div class="space-y-2">
                    <span class="block text-sm text-gray-400">"Filter by Status"</span>
                    <div class="flex gap-4">
                        {PollFilter::ALL.into_iter().map(|option| view! {
                            <label class="flex items-center space-x-2">
                                <input
                                    type="radio"
                                    name="status"
                                    value=option.as_str()
                                    prop:checked=move || filter.get() == option
                                    on:change=move |ev| {
                                        if let Ok(selected) = event_target_value(&ev).parse::<PollFilter>() {
                                            set_filter.set(selected);
                                        }
                                    }
                                />
                                <span>{option.label()}</span>
                            </label>
                        }).collect_view()}
                    </div>
                </div>
            </div>

            {move || match polls.get() {
                None => view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                        {(0..6).map(|_| view! { <CardSkeleton /> }).collect_view()}
                    </div>
                }.into_view(),
                Some(all) => {
                    let query = ListQuery::new(search.get(), filter.get());
                    let matching: Vec<Poll> = query.apply(&all).into_iter().cloned().collect();

                    if matching.is_empty() {
                        let empty = query.empty_state();
                        view! {
                            <div class="text-center py-12">
                                <h3 class="text-lg font-medium">{empty.title}</h3>
                                <p class="text-gray-400 mt-1">{empty.hint}</p>
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                                {matching.into_iter().map(|poll| view! { <PollCard poll=poll /> }).collect_view()}
                            </div>
                        }.into_view()
                    }
                }
            }}
        </div>
    }
}
