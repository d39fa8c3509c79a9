use contracts::shared::config::load_config;
use contracts::shared::speckle::LoadState;
use leptos::prelude::*;

use crate::layout::global_context::ViewerContext;
use crate::layout::right::MetadataSidebar;
use crate::layout::Shell;
use crate::shared::loader::{LoadError, Loader};
use crate::viewer::start_viewer;

#[component]
pub fn App() -> impl IntoView {
    // Provide the ViewerContext store to the whole app via context.
    let ctx = ViewerContext::new();
    provide_context(ctx);

    view! {
        <Show when=move || ctx.load.with(LoadState::is_loading)>
            <Loader />
        </Show>
        <LoadError />

        <Shell
            center=|| view! { <ViewerCanvas /> }.into_any()
            right=|| view! { <MetadataSidebar /> }.into_any()
        />
    }
}

/// Container the external viewer renders into
#[component]
fn ViewerCanvas() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<ViewerContext>().expect("ViewerContext not found");
    let container = NodeRef::<leptos::html::Div>::new();

    // Запускаем вьюер один раз, когда контейнер смонтирован
    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        let Some(element) = container.get() else {
            return false;
        };

        let config = match load_config(option_env!("SPECKLE_TOKEN")) {
            Ok(config) => config,
            Err(e) => {
                ctx.fail_loading(e.to_string());
                return true;
            }
        };

        leptos::task::spawn_local(async move {
            match start_viewer(&element, &config, ctx).await {
                Ok(()) => ctx.finish_loading(),
                Err(e) => ctx.fail_loading(e),
            }
        });
        true
    });

    view! {
        <div node_ref=container class="viewer-container"></div>
    }
}
