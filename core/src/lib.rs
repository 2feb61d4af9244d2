//! # Chilli Source Core
//!
//! Core crate for the Chilli Source render pipeline: math aliases, colours,
//! bounding shapes and handle-indexed object pools.

pub mod colour;
pub mod math;
pub mod pool;
pub mod shapes;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core library version.
pub fn init() {
    log::info!("Chilli Source Core v{} initialized", VERSION);
}
