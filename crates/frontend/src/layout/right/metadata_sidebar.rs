//! Metadata sidebar - правая панель со свойствами выбранного компонента
//!
//! Visible while the panel state is shown. Can be pinned (docked to the
//! right edge, survives clicks on empty space) and collapsed to a strip.

use contracts::shared::speckle::{MetadataSection, PanelEvent, PanelLayout, PanelState};
use leptos::prelude::*;

use crate::layout::global_context::ViewerContext;
use crate::shared::icons::icon;

#[component]
pub fn MetadataSidebar() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<ViewerContext>().expect("ViewerContext not found");

    let collapsed =
        Memo::new(move |_| ctx.panel.with(PanelState::layout) == PanelLayout::Collapsed);
    let is_pinned = move || ctx.panel.with(PanelState::is_pinned);

    view! {
        <Show when=move || ctx.panel.with(PanelState::is_shown)>
            <div
                class="metadata-sidebar"
                class:metadata-sidebar--collapsed=move || collapsed.get()
                class:metadata-sidebar--docked=is_pinned
                class:metadata-sidebar--floating=move || !is_pinned()
            >
                {move || {
                    // Пересоздаём содержимое только при сворачивании/разворачивании
                    if collapsed.get() {
                        view! {
                            <div
                                class="metadata-sidebar__expand"
                                title="Expand sidebar"
                                on:click=move |_| ctx.dispatch(PanelEvent::ToggleCollapse)
                            >
                                {icon("chevron-left")}
                            </div>
                        }
                        .into_any()
                    } else {
                        view! { <SidebarContent /> }.into_any()
                    }
                }}
            </div>
        </Show>
    }
}

#[component]
fn SidebarContent() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<ViewerContext>().expect("ViewerContext not found");
    let scroll_ref = NodeRef::<leptos::html::Div>::new();

    let is_pinned = move || ctx.panel.with(PanelState::is_pinned);

    // Новый компонент выбран - прокручиваем список в начало
    let selection_seq = Memo::new(move |_| ctx.panel.with(PanelState::selection_seq));
    Effect::new(move |_| {
        selection_seq.track();
        if let Some(el) = scroll_ref.get() {
            el.set_scroll_top(0);
        }
    });

    view! {
        <div class="metadata-sidebar__body">
            <button
                class="metadata-sidebar__collapse"
                title="Collapse sidebar"
                on:click=move |_| ctx.dispatch(PanelEvent::ToggleCollapse)
            >
                {icon("chevron-right")}
            </button>

            <div class="metadata-sidebar__header">
                <h2>"Metadata"</h2>
                <div class="metadata-sidebar__actions">
                    <button
                        class="metadata-sidebar__action"
                        title="Pin metadata"
                        on:click=move |_| ctx.dispatch(PanelEvent::TogglePin)
                    >
                        {move || if is_pinned() { icon("pin-off") } else { icon("pin") }}
                        {move || if is_pinned() { "Unpin" } else { "Pin" }}
                    </button>
                    <button
                        class="metadata-sidebar__action"
                        title="Close sidebar"
                        on:click=move |_| ctx.dispatch(PanelEvent::Close)
                    >
                        {icon("x")}
                    </button>
                </div>
            </div>

            <div
                node_ref=scroll_ref
                class="metadata-sidebar__sections"
                class:metadata-sidebar__sections--fill=is_pinned
            >
                {move || {
                    ctx.panel
                        .with(PanelState::sections)
                        .into_iter()
                        .map(|section| view! { <SectionView section=section /> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
fn SectionView(section: MetadataSection) -> impl IntoView {
    view! {
        <div class="metadata-section">
            <h3 class="metadata-section__title">{section.title}</h3>
            <ul class="metadata-section__entries">
                {section
                    .entries
                    .into_iter()
                    .map(|entry| {
                        view! {
                            <li class="metadata-entry">
                                <span class="metadata-entry__label">{entry.label}</span>
                                <span class="metadata-entry__value">{entry.value}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
