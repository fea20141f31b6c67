//! Loading Component
//!
//! Skeleton states while chain reads are in flight.

use leptos::*;

/// Skeleton loader for a poll card
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="h-[200px] rounded-lg bg-gray-800 animate-pulse" />
    }
}

/// Skeleton loader for the poll detail page
#[component]
pub fn DetailSkeleton() -> impl IntoView {
    view! {
        <div class="rounded-lg h-[400px] bg-gray-800 animate-pulse" />
    }
}
