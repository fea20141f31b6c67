//! Create Poll Page
//!
//! Title plus 2-10 options; validated before the transaction is sent.

use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use pollverse::views::{submit_poll, PollDraft, ValidationErrors};

use crate::components::WalletRequired;
use crate::state::global::GlobalState;

/// Create page component
#[component]
pub fn CreatePollPage() -> impl IntoView {
    view! {
        <div class="max-w-2xl mx-auto">
            <WalletRequired>
                <CreatePollForm />
            </WalletRequired>
        </div>
    }
}

#[component]
fn CreatePollForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (draft, set_draft) = create_signal(PollDraft::new());
    let (errors, set_errors) = create_signal(ValidationErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    let state_for_add = state.clone();
    let add_option = move |_| {
        let mut next = draft.get_untracked();
        match next.add_option() {
            Ok(()) => set_draft.set(next),
            Err(e) => state_for_add.notify(e.notification()),
        }
    };

    let state_for_remove = state.clone();
    let remove_option = move |index: usize| {
        let mut next = draft.get_untracked();
        match next.remove_option(index) {
            Ok(()) => set_draft.set(next),
            Err(e) => state_for_remove.notify(e.notification()),
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let valid = match draft.get_untracked().validate() {
            Ok(valid) => valid,
            Err(errs) => {
                set_errors.set(errs);
                return;
            }
        };
        set_errors.set(ValidationErrors::default());
        set_submitting.set(true);

        let session = Rc::clone(&state.session);
        let queries = Rc::clone(&state.queries);
        let navigate = navigate.clone();
        spawn_local(async move {
            if submit_poll(&session, &valid).await.is_ok() {
                queries.invalidate_list();
                navigate("/", Default::default());
            }
            set_submitting.set(false);
        });
    };

    let option_count = move || draft.with(|d| d.options().len());

    view! {
        <div class="space-y-6">
            <A href="/" class="text-gray-300 hover:text-white">"← Back"</A>

            <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 space-y-6">
                <div>
                    <h1 class="text-2xl font-bold">"Create a New Poll"</h1>
                    <p class="text-gray-400 mt-1">"Fill in the details below to create a new poll"</p>
                </div>

                <div class="space-y-2">
                    <label for="title" class="block text-sm text-gray-400">"Poll Title"</label>
                    <input
                        id="title"
                        type="text"
                        placeholder="Enter a title for your poll"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| set_draft.update(|d| d.title = event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    {move || errors.with(|e| e.title.clone()).map(|message| view! {
                        <p class="text-xs text-red-400 mt-1">{message}</p>
                    })}
                </div>

                <div class="space-y-4">
                    <div class="flex justify-between items-center">
                        <span class="text-sm text-gray-400">"Poll Options"</span>
                        <span class="text-xs text-gray-500">{move || draft.with(|d| d.count_label())}</span>
                    </div>

                    // Rows are keyed by position; their values follow the draft
                    <For
                        each=move || (0..option_count()).collect::<Vec<_>>()
                        key=|index| *index
                        children=move |index| {
                            let remove_option = remove_option.clone();
                            view! {
                                <div class="flex gap-2">
                                    <input
                                        type="text"
                                        placeholder=format!("Option {}", index + 1)
                                        prop:value=move || draft.with(|d| d.options().get(index).cloned().unwrap_or_default())
                                        on:input=move |ev| set_draft.update(|d| d.set_option(index, event_target_value(&ev)))
                                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                    <button
                                        type="button"
                                        on:click=move |_| remove_option(index)
                                        disabled=move || !draft.with(|d| d.can_remove_option())
                                        class="px-3 border border-gray-600 rounded-lg hover:bg-gray-700 disabled:opacity-50"
                                    >
                                        "🗑"
                                    </button>
                                </div>
                            }
                        }
                    />

                    {move || errors.with(|e| e.options.clone()).map(|message| view! {
                        <p class="text-xs text-red-400">{message}</p>
                    })}

                    <button
                        type="button"
                        on:click=add_option
                        disabled=move || !draft.with(|d| d.can_add_option())
                        class="w-full px-4 py-2 border border-gray-600 rounded-lg hover:bg-gray-700
                               disabled:opacity-50 transition-colors"
                    >
                        "+ Add Option"
                    </button>
                </div>

                <div class="border-t border-gray-700 pt-6">
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if submitting.get() { "Creating..." } else { "Create Poll" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
