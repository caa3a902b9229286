//! Market Overview Component
//!
//! Grid of market tiles. A tile drills down into a detail overlay,
//! and any tile can be presented full-screen from there or from the
//! header. Every tile is one slide, in grid order.

use leptos::prelude::*;

use crate::components::{ContentBlockView, ParentTileModal, PresentationModal};
use crate::models::{ContentBlock, SlideItem, TileItem};
use crate::navigation::{use_parent_tile, use_presentation};

fn market_tiles() -> Vec<TileItem> {
    vec![
        TileItem::new("market-size", "Market size")
            .describe("Serviceable market across the first three regions")
            .block(ContentBlock::Metrics {
                rows: vec![
                    ("TAM".into(), "€4.2B".into()),
                    ("SAM".into(), "€860M".into()),
                    ("SOM (3y)".into(), "€38M".into()),
                ],
            }),
        TileItem::new("segments", "Customer segments")
            .describe("Who buys first")
            .block(ContentBlock::Bullets {
                items: vec![
                    "Mid-size logistics operators".into(),
                    "Regional retail chains".into(),
                    "**Public sector** pilots".into(),
                ],
            }),
        TileItem::new("trends", "Trends")
            .block(ContentBlock::Markdown {
                text: "Digital procurement grows %g%+18%%g% per year while legacy suites lose share %r%-6%%r%.".into(),
            }),
        TileItem::new("competition", "Competition")
            .describe("Incumbents and challengers")
            .block(ContentBlock::Metrics {
                rows: vec![
                    ("Incumbent A".into(), "41% share".into()),
                    ("Incumbent B".into(), "23% share".into()),
                    ("Challengers".into(), "%o%fragmented%o%".into()),
                ],
            }),
    ]
}

#[component]
pub fn MarketOverview() -> impl IntoView {
    let tiles = StoredValue::new(market_tiles());
    let slides = Signal::derive(move || tiles.with_value(|tiles| tiles.iter().map(SlideItem::from_tile).collect::<Vec<_>>()));

    let presentation = use_presentation(slides);
    let tile = use_parent_tile(None);

    view! {
        <section class="market-overview">
            <div class="market-overview-header">
                <h2>"Market"</h2>
                <button class="present-btn" on:click=move |_| presentation.open(None)>
                    "Present"
                </button>
            </div>

            <div class="tile-grid">
                {tiles
                    .get_value()
                    .into_iter()
                    .map(|item| {
                        let summary = item.content.first().cloned();
                        let title = item.title.clone();
                        let description = item.description.clone();
                        view! {
                            <button class="market-tile" on:click=move |_| tile.open(Some(item.clone()))>
                                <h3>{title}</h3>
                                {description.map(|d| view! { <p class="tile-description">{d}</p> })}
                                {summary.map(|block| view! { <ContentBlockView block=block /> })}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <ParentTileModal handle=tile presentation=presentation />
            <PresentationModal handle=presentation />
        </section>
    }
}
