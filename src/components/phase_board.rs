//! Phase Board Component
//!
//! Roadmap phases, each with its activities, success criteria and
//! metrics. All three tables load together for every phase and reload
//! after each change.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Map, Value};

use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::models::Record;
use crate::sync::{use_collection, CollectionHandle, CollectionViewStoreFields, SyncResult};

/// Phase id and title
const PHASES: &[(&str, &str)] = &[
    ("phase-1", "Validate"),
    ("phase-2", "Launch"),
    ("phase-3", "Scale"),
];

fn table_label(table: &str) -> String {
    let name = table.strip_prefix("phase_").unwrap_or(table);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}

/// Surface a failed mutation as a toast
fn report(ctx: AppContext, result: SyncResult<()>, action: &str) {
    if let Err(e) = result {
        ctx.show_toast(format!("Could not {}: {}", action, e));
    }
}

#[component]
pub fn PhaseBoard() -> impl IntoView {
    let ctx = use_app_context();
    let tables = ctx.config().record_tables;
    let scope_keys: Vec<String> = PHASES.iter().map(|(id, _)| id.to_string()).collect();
    let collection = use_collection(ctx.collection_sync(), scope_keys.clone());
    let view_store = collection.view();

    view! {
        <section class="phase-board">
            <div class="phase-board-header">
                <h2>"Roadmap"</h2>
                <button
                    class="reload-btn"
                    disabled=move || view_store.loading().get()
                    on:click=move |_| collection.load_all(scope_keys.clone())
                >
                    "Reload"
                </button>
            </div>

            {move || view_store.error().get().map(|e| view! {
                <div class="sync-warning">{format!("Roadmap could not be loaded: {}", e)}</div>
            })}

            <Show when=move || view_store.loading().get()>
                <p class="loading">"Loading..."</p>
            </Show>
            <Show when=move || {
                !view_store.loading().get() && view_store.collection().with(|c| c.is_empty())
            }>
                <p class="empty-hint">"Nothing planned yet. Add the first entry to any phase."</p>
            </Show>

            <div class="phase-columns">
                {PHASES
                    .iter()
                    .map(|(id, title)| view! {
                        <PhaseColumn
                            collection=collection
                            phase_id=id.to_string()
                            title=title.to_string()
                            tables=tables.clone()
                        />
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn PhaseColumn(
    collection: CollectionHandle,
    phase_id: String,
    title: String,
    tables: Vec<String>,
) -> impl IntoView {
    view! {
        <div class="phase-column">
            <h3>{title}</h3>
            {tables
                .into_iter()
                .map(|table| view! {
                    <RecordList collection=collection table=table phase_id=phase_id.clone() />
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn RecordList(collection: CollectionHandle, table: String, phase_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let (new_title, set_new_title) = signal(String::new());
    let table = StoredValue::new(table);
    let phase_id = StoredValue::new(phase_id);

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_title.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(text));
        fields.insert("done".to_string(), Value::Bool(false));
        spawn_local(async move {
            let result = collection
                .add(&table.get_value(), &phase_id.get_value(), fields)
                .await;
            if result.is_ok() {
                set_new_title.set(String::new());
            }
            report(ctx, result, "add the entry");
        });
    };

    let records = move || collection.records(&table.get_value(), &phase_id.get_value());

    view! {
        <div class="record-list">
            <h4>{table_label(&table.get_value())}</h4>
            <ul>
                <For
                    each=records
                    key=|record| (record.id, is_done(record), record.text("title").to_string())
                    children=move |record| view! {
                        <RecordRow collection=collection table=table.get_value() record=record />
                    }
                />
            </ul>
            <form class="record-add-form" on:submit=on_add>
                <input
                    type="text"
                    placeholder="Add..."
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
        </div>
    }
}

fn is_done(record: &Record) -> bool {
    record.fields.get("done").and_then(Value::as_bool).unwrap_or(false)
}

#[component]
fn RecordRow(collection: CollectionHandle, table: String, record: Record) -> impl IntoView {
    let ctx = use_app_context();
    let id = record.id;
    let done = is_done(&record);
    let table = StoredValue::new(table);
    let row_class = if done { "record-row done" } else { "record-row" };

    let toggle = move |_| {
        let mut fields = Map::new();
        fields.insert("done".to_string(), json!(!done));
        spawn_local(async move {
            report(ctx, collection.update(&table.get_value(), id, fields).await, "update the entry");
        });
    };

    let on_delete = move |_| {
        spawn_local(async move {
            report(ctx, collection.delete(&table.get_value(), id).await, "delete the entry");
        });
    };

    view! {
        <li class=row_class>
            <input type="checkbox" prop:checked=done on:change=toggle />
            <span class="record-title">{record.text("title").to_string()}</span>
            <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
        </li>
    }
}
