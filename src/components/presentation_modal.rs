//! Presentation Modal
//!
//! Full-screen slide carousel. Topmost overlay layer.

use leptos::prelude::*;

use crate::components::ContentBlockView;
use crate::navigation::{Layer, PresentationHandle};

#[component]
pub fn PresentationModal(handle: PresentationHandle) -> impl IntoView {
    let layer = Layer::Presentation;
    let overlay_style = format!(
        "position: fixed; inset: 0; z-index: {}; backdrop-filter: blur({}px); background: rgba(10, 12, 20, 0.85); display: flex; flex-direction: column;",
        layer.z_index(),
        layer.backdrop_blur()
    );

    view! {
        <Show when=move || handle.is_open()>
            <div class="presentation-overlay" style=overlay_style.clone() role="dialog" aria-modal="true">
                <div class="presentation-header">
                    <span class="presentation-counter">
                        {move || format!("{} / {}", handle.current_index() + 1, handle.len())}
                    </span>
                    <button class="close-btn" on:click=move |_| handle.close()>"×"</button>
                </div>

                {move || handle.current_item().map(|slide| view! {
                    <section class="presentation-slide">
                        <h2>{slide.title.clone()}</h2>
                        {slide.description.clone().map(|d| view! { <p class="slide-description">{d}</p> })}
                        {slide.content
                            .into_iter()
                            .map(|block| view! { <ContentBlockView block=block /> })
                            .collect_view()}
                    </section>
                })}

                <div class="presentation-controls">
                    <button
                        class="nav-btn"
                        disabled=move || !handle.has_previous()
                        on:click=move |_| handle.previous()
                    >
                        "‹"
                    </button>
                    <div class="presentation-dots">
                        {move || (0..handle.len()).map(|index| view! {
                            <button
                                class=move || if handle.current_index() == index { "dot active" } else { "dot" }
                                on:click=move |_| handle.go_to(index)
                            ></button>
                        }).collect_view()}
                    </div>
                    <button
                        class="nav-btn"
                        disabled=move || !handle.has_next()
                        on:click=move |_| handle.next()
                    >
                        "›"
                    </button>
                </div>
            </div>
        </Show>
    }
}
