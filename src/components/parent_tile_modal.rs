//! Parent Tile Modal
//!
//! Drill-down overlay for a selected tile. Renders beneath the
//! presentation layer with a lighter backdrop and leaves page scroll on.

use leptos::prelude::*;

use crate::components::ContentBlockView;
use crate::navigation::{Layer, ParentTileHandle, PresentationHandle};

#[component]
pub fn ParentTileModal(handle: ParentTileHandle, presentation: PresentationHandle) -> impl IntoView {
    let layer = Layer::Tile;
    let overlay_style = format!(
        "position: fixed; inset: 0; z-index: {}; backdrop-filter: blur({}px); background: rgba(10, 12, 20, 0.4); display: flex; align-items: center; justify-content: center;",
        layer.z_index(),
        layer.backdrop_blur()
    );

    view! {
        <Show when=move || handle.is_open()>
            <div class="tile-overlay" style=overlay_style.clone() on:click=move |_| handle.close()>
                <div class="tile-panel" on:click=|ev| ev.stop_propagation()>
                    {move || handle.active_item().map(|tile| {
                        let slide_id = tile.id.clone();
                        view! {
                            <div class="tile-panel-header">
                                <h3>{tile.title.clone()}</h3>
                                <button class="close-btn" on:click=move |_| handle.close()>"×"</button>
                            </div>
                            {tile.description.clone().map(|d| view! { <p class="tile-description">{d}</p> })}
                            {tile.content
                                .into_iter()
                                .map(|block| view! { <ContentBlockView block=block /> })
                                .collect_view()}
                            <button
                                class="present-btn"
                                on:click=move |_| presentation.open(Some(slide_id.clone()))
                            >
                                "Present"
                            </button>
                        }
                    })}
                </div>
            </div>
        </Show>
    }
}
