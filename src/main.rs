#![allow(warnings)]
//! Deskboard Frontend Entry Point

mod commands;
mod logging;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
