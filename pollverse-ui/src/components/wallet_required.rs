//! Wallet gate
//!
//! Shows a connect prompt instead of its children until a wallet is
//! connected.

use leptos::*;

use super::header::ConnectButton;
use crate::state::global::GlobalState;

#[component]
pub fn WalletRequired(children: ChildrenFn) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let has_wallet = state.session.adapter().has_wallet();
    let snapshot = state.snapshot;
    let connected = move || snapshot.get().is_connected();

    view! {
        <Show
            when=connected
            fallback=move || view! {
                <div class="flex justify-center items-center p-8">
                    <div class="w-full max-w-md bg-gray-800 rounded-xl p-6 text-center space-y-4">
                        <h2 class="text-xl font-semibold">"Connect Wallet"</h2>
                        <p class="text-gray-400">"Please connect your wallet to continue"</p>
                        {if has_wallet {
                            view! { <ConnectButton /> }.into_view()
                        } else {
                            view! {
                                <p class="text-sm text-red-400">
                                    "No Ethereum wallet detected. Install MetaMask to continue."
                                </p>
                            }.into_view()
                        }}
                    </div>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
