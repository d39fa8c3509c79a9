use contracts::shared::speckle::LoadState;
use leptos::prelude::*;

use crate::layout::global_context::ViewerContext;

/// Fullscreen overlay with spinner and percentage, shown while the model loads
#[component]
pub fn Loader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<ViewerContext>().expect("ViewerContext not found");

    let percent = move || {
        ctx.load.with(|state| match state {
            LoadState::Loading(progress) => progress.percent(),
            _ => 100,
        })
    };

    view! {
        <div class="loader-overlay">
            <div class="loader-overlay__spinner"></div>
            <p class="loader-overlay__text">
                {move || format!("Loading model... {}%", percent())}
            </p>
        </div>
    }
}

/// Сообщение об ошибке загрузки модели
#[component]
pub fn LoadError() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<ViewerContext>().expect("ViewerContext not found");

    view! {
        <Show when=move || ctx.load.with(|state| state.error().is_some())>
            <div class="load-error">
                {move || ctx.load.with(|state| state.error().unwrap_or_default().to_string())}
            </div>
        </Show>
    }
}
