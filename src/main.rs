//! Strategy Deck Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod markdown;
mod models;
mod navigation;
mod sync;

#[cfg(test)]
mod test_support;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = ring_logger::init(200, log::LevelFilter::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    log::info!("[APP] strategy deck starting");
    mount_to_body(App);
}
