//! Poll Detail Page
//!
//! Results, voting panel and the creator's end-poll control.

use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use pollverse::chain::{Poll, PollId};
use pollverse::views::{status_label, tally, PollDetailController, VoteAvailability};

use crate::components::{DetailSkeleton, WalletRequired};
use crate::state::global::GlobalState;

/// Poll page component
#[component]
pub fn PollPage() -> impl IntoView {
    view! {
        <WalletRequired>
            <PollDetail />
        </WalletRequired>
    }
}

/// Loading, missing or loaded
#[derive(Clone, PartialEq)]
enum DetailState {
    Loading,
    NotFound,
    Loaded(Poll),
}

#[component]
fn PollDetail() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params_map();

    let session = Rc::clone(&state.session);
    let voted = state.voted.clone();
    let controller = Signal::derive(move || {
        params
            .with(|p| p.get("id").and_then(|id| id.parse::<PollId>().ok()))
            .map(|id| PollDetailController::new(Rc::clone(&session), voted.clone(), id))
    });

    let (detail, set_detail) = create_signal(DetailState::Loading);
    let (voting, set_voting) = create_signal(false);
    let (ending, set_ending) = create_signal(false);

    let queries = Rc::clone(&state.queries);
    create_effect(move |_| {
        let Some(ctrl) = controller.get() else {
            set_detail.set(DetailState::NotFound);
            return;
        };

        if let Some(cached) = queries.detail(ctrl.poll_id(), chrono::Utc::now()) {
            set_detail.set(DetailState::Loaded(cached));
            return;
        }

        set_detail.set(DetailState::Loading);
        let queries = Rc::clone(&queries);
        spawn_local(async move {
            match ctrl.load().await {
                Ok(poll) => {
                    queries.store_detail(poll.clone(), chrono::Utc::now());
                    set_detail.set(DetailState::Loaded(poll));
                }
                Err(_) => set_detail.set(DetailState::NotFound),
            }
        });
    });

    let queries = Rc::clone(&state.queries);
    let refreshed = move |poll: Poll| {
        queries.invalidate_poll(poll.id);
        queries.store_detail(poll.clone(), chrono::Utc::now());
        set_detail.set(DetailState::Loaded(poll));
    };

    let on_refresh = refreshed.clone();
    let on_vote = move |option_index: usize| {
        let (Some(ctrl), DetailState::Loaded(current)) =
            (controller.get_untracked(), detail.get_untracked())
        else {
            return;
        };

        set_voting.set(true);
        let on_refresh = on_refresh.clone();
        spawn_local(async move {
            if let Ok(Some(updated)) = ctrl.cast_vote(&current, option_index).await {
                on_refresh(updated);
            }
            set_voting.set(false);
        });
    };

    let on_end = move || {
        let Some(ctrl) = controller.get_untracked() else {
            return;
        };

        set_ending.set(true);
        let refreshed = refreshed.clone();
        spawn_local(async move {
            if let Ok(updated) = ctrl.end_poll().await {
                refreshed(updated);
            }
            set_ending.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            <BackButton />

            {move || match detail.get() {
                DetailState::Loading => view! { <DetailSkeleton /> }.into_view(),
                DetailState::NotFound => view! { <PollNotFound /> }.into_view(),
                DetailState::Loaded(poll) => {
                    let Some(ctrl) = controller.get() else {
                        return view! { <PollNotFound /> }.into_view();
                    };
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                            <div class="md:col-span-2">
                                <Results poll=poll.clone() is_creator=ctrl.is_creator(&poll) />
                            </div>
                            <VotePanel
                                poll=poll.clone()
                                availability=ctrl.availability(&poll)
                                can_end=ctrl.can_end(&poll)
                                voting=voting
                                ending=ending
                                on_vote=Callback::new(on_vote.clone())
                                on_end=Callback::new({
                                    let on_end = on_end.clone();
                                    move |_| on_end()
                                })
                            />
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn Results(poll: Poll, is_creator: bool) -> impl IntoView {
    let badge_class = if poll.active {
        "bg-green-900 text-green-300"
    } else {
        "border border-gray-600 text-gray-400"
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-6">
            <div class="flex justify-between items-start flex-wrap gap-2">
                <div class="space-y-1">
                    <h1 class="text-2xl font-bold">{poll.title.clone()}</h1>
                    <p class="text-gray-400">{format!("Poll #{}", poll.id)}</p>
                </div>
                <span class=format!("px-2 py-0.5 rounded text-xs whitespace-nowrap {}", badge_class)>
                    {status_label(&poll)}
                </span>
            </div>

            <div>
                <h3 class="text-lg font-medium mb-4">"Voting Options"</h3>
                <div class="space-y-4">
                    {tally(&poll).into_iter().map(|row| view! {
                        <div class="space-y-2">
                            <div class="flex justify-between text-sm">
                                <span>{row.label.clone()}</span>
                                <span>{row.votes_label()}</span>
                            </div>
                            <div class="h-2 bg-gray-700 rounded">
                                <div
                                    class="h-2 bg-primary-500 rounded"
                                    style=format!("width: {:.1}%", row.percentage)
                                />
                            </div>
                        </div>
                    }).collect_view()}
                </div>
            </div>

            <div class="pt-4 border-t border-gray-700">
                <p class="text-sm text-gray-400 mb-1">{format!("Total Votes: {}", poll.total_votes())}</p>
                {is_creator.then(|| view! {
                    <p class="text-xs text-primary-400">"You created this poll"</p>
                })}
            </div>
        </section>
    }
}

#[component]
fn VotePanel(
    poll: Poll,
    availability: VoteAvailability,
    can_end: bool,
    voting: ReadSignal<bool>,
    ending: ReadSignal<bool>,
    on_vote: Callback<usize>,
    on_end: Callback<()>,
) -> impl IntoView {
    let options = match availability.message() {
        Some(message) => view! {
            <div class="text-center py-4">
                <p class="text-gray-400">{message}</p>
            </div>
        }
        .into_view(),
        None => poll
            .option_names
            .iter()
            .enumerate()
            .map(|(index, option)| {
                view! {
                    <button
                        on:click=move |_| on_vote.call(index)
                        disabled=move || voting.get()
                        class="w-full text-left px-4 py-2 border border-gray-600 rounded-lg
                               hover:bg-gray-700 disabled:opacity-50 transition-colors"
                    >
                        {option.clone()}
                    </button>
                }
            })
            .collect_view(),
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <div>
                <h2 class="text-xl font-semibold">"Cast Your Vote"</h2>
                <p class="text-sm text-gray-400">{availability.prompt()}</p>
            </div>

            <div class="space-y-2">{options}</div>

            {can_end.then(|| view! {
                <div class="border-t border-gray-700 pt-4">
                    <button
                        on:click=move |_| on_end.call(())
                        disabled=move || ending.get()
                        class="w-full px-4 py-2 bg-red-600 hover:bg-red-700 disabled:bg-gray-700
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if ending.get() { "Ending Poll..." } else { "End Poll" }}
                    </button>
                </div>
            })}
        </section>
    }
}

#[component]
fn BackButton() -> impl IntoView {
    let go_back = move |_| {
        if let Err(e) = window().history().and_then(|history| history.back()) {
            tracing::warn!(error = ?e, "History navigation failed");
        }
    };

    view! {
        <button on:click=go_back class="text-gray-300 hover:text-white">
            "← Back"
        </button>
    }
}

#[component]
fn PollNotFound() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Poll Not Found"</h2>
            <p class="text-gray-400">
                "The poll you're looking for doesn't exist or has been removed."
            </p>
            <A
                href="/"
                class="inline-block px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Polls"
            </A>
        </section>
    }
}
