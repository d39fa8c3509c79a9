pub mod global_context;
pub mod right;

use leptos::prelude::*;

/// Page shell: full-screen viewer area with the metadata sidebar on top.
///
/// ```text
/// +------------------------------------------+
/// |                              +---------+ |
/// |          3D viewer           | Sidebar | |
/// |          (center)            | (right) | |
/// |                              +---------+ |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<C, R>(center: C, right: R) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
    R: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <div class="app-main">
                {center()}
            </div>
            {right()}
        </div>
    }
}
