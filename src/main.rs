//! Wrapviz - interactive 3D vehicle wrap configurator
//!
//! Dealer-facing preview tool for vinyl wrap configurations:
//! - procedurally built vehicle bodies (sedan, SUV, pickup, vans, box truck)
//!   with individually addressable panels
//! - physically parameterized wrap finishes (gloss, matte, satin, chrome,
//!   carbon, color-shift, PPF) resolved per panel every frame
//! - orbit/zoom/hover/select pointer interaction with drag-vs-click
//!   disambiguation
//! - still-image captures of the live frame for downstream documents
//!
//! The desktop shell in `app` is a thin host over the `configurator` control
//! surface; everything below it is renderer-agnostic of the windowing stack.

mod app;
mod catalog;
mod configurator;
mod interact;
mod render;
mod ui;
mod vehicle;

fn main() {
    app::run();
}
