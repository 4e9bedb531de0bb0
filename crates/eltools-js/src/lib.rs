//! WASM bindings for the LiveCanvas element tools.
//!
//! Exposes the selection engine, snapshots and the mutation bridge as a
//! single `ElementTools` instance for JavaScript/TypeScript apps.

mod tools;
mod types;

pub use tools::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
