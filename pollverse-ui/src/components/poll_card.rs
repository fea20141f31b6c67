//! Poll Card Component

use leptos::*;
use leptos_router::*;

use pollverse::chain::Poll;
use pollverse::views::{status_label, CardPreview};

/// Summary card linking to a poll's detail page
#[component]
pub fn PollCard(poll: Poll) -> impl IntoView {
    let badge_class = if poll.active {
        "bg-green-900 text-green-300"
    } else {
        "border border-gray-600 text-gray-400"
    };
    let icon = if poll.active { "🔓" } else { "🔒" };
    let href = format!("/poll/{}", poll.id);

    let preview = match CardPreview::for_poll(&poll) {
        CardPreview::Pending => view! {
            <p class="text-sm text-gray-400">"Loading poll details..."</p>
        }.into_view(),
        CardPreview::Options { summary, shown, more } => view! {
            <div class="space-y-1">
                <p class="text-sm text-gray-400 mb-2">{summary}</p>
                <ul class="text-sm list-disc list-inside">
                    {shown.into_iter().map(|option| view! {
                        <li class="truncate">{option}</li>
                    }).collect_view()}
                    {more.map(|more| view! { <li class="text-gray-400">{more}</li> })}
                </ul>
            </div>
        }.into_view(),
    };

    view! {
        <div class="h-full flex flex-col bg-gray-800 rounded-xl p-6 hover:shadow-md transition-shadow duration-200">
            <div class="flex justify-between items-start mb-1">
                <h3 class="text-lg font-semibold mr-4">{poll.title.clone()}</h3>
                <span class=format!("flex items-center gap-1 px-2 py-0.5 rounded text-xs {}", badge_class)>
                    <span>{icon}</span>
                    <span>{status_label(&poll)}</span>
                </span>
            </div>
            <p class="text-sm text-gray-400 mb-4">{format!("Poll #{}", poll.id)}</p>

            <div class="flex-grow">{preview}</div>

            <A
                href=href
                class="mt-4 w-full text-center px-4 py-2 border border-gray-600 rounded-lg
                       hover:bg-gray-700 transition-colors"
            >
                "View Poll →"
            </A>
        </div>
    }
}
