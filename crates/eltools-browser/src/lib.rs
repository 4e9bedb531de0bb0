//! Browser DOM layer for the element tools.
//!
//! This crate provides web-sys implementations of the core DOM traits,
//! host capability lookup on window globals, event listener wiring and
//! timer-backed debouncing. It assumes a `wasm32-unknown-unknown` target
//! environment.
//!
//! # Architecture
//!
//! - `dom`: `BrowserNode`/`BrowserDocument` over web-sys handles
//! - `documents`: working/preview document resolution across the iframe
//! - `host`: window-global host function lookup and invocation
//! - `listeners`: selection event wiring with deferred teardown
//! - `debounce`: quiet-period edit flushing on gloo timers
//! - `clipboard`: async clipboard writes
//!
//! # Re-exports
//!
//! This crate re-exports `eltools-core` for convenience, so consumers
//! only need to depend on `eltools-browser`.

// Re-export core crate
pub use eltools_core;
pub use eltools_core::*;

pub mod clipboard;
pub mod debounce;
pub mod documents;
pub mod dom;
pub mod host;
pub mod listeners;

pub use debounce::DebouncedChannel;
pub use documents::{DocumentLocator, PREVIEW_IFRAME_ID};
pub use dom::{BrowserDocument, BrowserNode};
pub use host::WindowHost;
pub use listeners::{ListenerHandles, SelectCallback, install_listeners, schedule_teardown};
