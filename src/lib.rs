pub mod app;
pub mod booking;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod gateway;
pub mod models;
pub mod pages;
pub mod payment;
pub mod review;
pub mod search;
pub mod session;
pub mod state;
pub mod voice;

pub use error::TripError;

pub fn run() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );

    leptos::mount::mount_to_body(app::App);
}
