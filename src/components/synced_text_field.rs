//! Synced Text Field Component
//!
//! Editable text bound to one content key. Saves on blur; a failed save
//! keeps the local value and shows a dismissible warning.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::ValueSource;
use crate::sync::use_synced_field;

#[component]
pub fn SyncedTextField(
    #[prop(into)] content_key: String,
    #[prop(into)] label: String,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let ctx = use_app_context();
    let field = use_synced_field(ctx.content(), &content_key);

    let (draft, set_draft) = signal(String::new());
    let (editing, set_editing) = signal(false);

    // Follow the synced value while the user is not typing
    Effect::new(move |_| {
        let value = field.value();
        if !editing.get_untracked() {
            set_draft.set(value);
        }
    });

    let save = move || {
        set_editing.set(false);
        let text = draft.get_untracked();
        if text != field.value() {
            field.write(text);
        }
    };

    let source_label = move || match field.source() {
        ValueSource::Remote => "synced",
        ValueSource::LocalFallback => "local copy",
        ValueSource::Unset => "empty",
    };

    view! {
        <div class="synced-field">
            <div class="synced-field-header">
                <label>{label}</label>
                <span class="synced-field-source">{source_label}</span>
                <button class="synced-field-refresh" title="Reload from server" on:click=move |_| field.refresh()>
                    "↻"
                </button>
            </div>
            <Show when=move || field.has_error()>
                <div class="sync-warning">
                    <span>"Couldn't reach the server. Changes are kept on this device."</span>
                    <button class="sync-warning-dismiss" on:click=move |_| field.dismiss_error()>"×"</button>
                </div>
            </Show>
            <textarea
                class="synced-field-input"
                placeholder=placeholder
                prop:value=move || draft.get()
                on:focus=move |_| set_editing.set(true)
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:blur=move |_| save()
            ></textarea>
        </div>
    }
}
