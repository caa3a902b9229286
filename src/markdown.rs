//! Markdown Rendering
//!
//! Renders slide and tile copy with pulldown-cmark, plus:
//! - Highlight syntax for figures: %g%+24%%g% style markers (%r%, %g%, %b%, %o%)
//! - Raw HTML in the source is shown as text, since copy is user-editable

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser};

/// Highlight codes and their hex values
const HIGHLIGHTS: &[(&str, &str)] = &[
    ("r", "#e74c3c"), // decline
    ("g", "#27ae60"), // growth
    ("b", "#3498db"), // neutral
    ("o", "#e67e22"), // caution
];

/// Render markdown to HTML
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut events = Vec::new();
    for event in parser {
        match event {
            Event::Text(text) => {
                if has_highlight(&text) {
                    events.extend(highlight_events(&text));
                } else {
                    events.push(Event::Text(text));
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => events.push(Event::Text(html)),
            other => events.push(other),
        }
    }
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Render a single line (strips the outer <p>)
pub fn render_inline(text: &str) -> String {
    let html = render_markdown(text);
    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn has_highlight(text: &str) -> bool {
    HIGHLIGHTS
        .iter()
        .any(|(code, _)| text.contains(&format!("%{}%", code)))
}

/// Split text at the earliest highlight marker pair, repeatedly
fn highlight_events(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut remaining = text.to_string();

    while !remaining.is_empty() {
        let earliest = HIGHLIGHTS
            .iter()
            .filter_map(|(code, color)| {
                let marker = format!("%{}%", code);
                remaining.find(&marker).map(|pos| (pos, marker, *color))
            })
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, marker, color)) = earliest else {
            events.push(Event::Text(CowStr::from(remaining)));
            break;
        };

        if pos > 0 {
            events.push(Event::Text(CowStr::from(remaining[..pos].to_string())));
        }
        remaining = remaining[pos + marker.len()..].to_string();
        match remaining.find(&marker) {
            Some(end) => {
                events.push(Event::Html(CowStr::from(format!(
                    "<span class=\"figure-highlight\" style=\"color: {}\">",
                    color
                ))));
                if end > 0 {
                    events.push(Event::Text(CowStr::from(remaining[..end].to_string())));
                }
                events.push(Event::Html(CowStr::from("</span>")));
                remaining = remaining[end + marker.len()..].to_string();
            }
            // Unpaired marker stays literal
            None => events.push(Event::Text(CowStr::from(marker))),
        }
    }
    events
}
