//! Content Block View
//!
//! Renders the body blocks of slides and tiles.

use leptos::prelude::*;

use crate::markdown::{render_inline, render_markdown};
use crate::models::ContentBlock;

#[component]
pub fn ContentBlockView(block: ContentBlock) -> impl IntoView {
    match block {
        ContentBlock::Markdown { text } => view! {
            <div class="content-markdown" inner_html=render_markdown(&text)></div>
        }
        .into_any(),
        ContentBlock::Bullets { items } => view! {
            <ul class="content-bullets">
                {items
                    .into_iter()
                    .map(|item| view! { <li inner_html=render_inline(&item)></li> })
                    .collect_view()}
            </ul>
        }
        .into_any(),
        ContentBlock::Metrics { rows } => view! {
            <table class="content-metrics">
                <tbody>
                    {rows
                        .into_iter()
                        .map(|(label, value)| view! {
                            <tr>
                                <th>{label}</th>
                                <td inner_html=render_inline(&value)></td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
    }
}
