//! Platform abstraction layer
//!
//! The browser specifics the rest of the crate needs: a LocalStorage handle.
//! Everything here degrades to `None` rather than panicking - a sandboxed
//! iframe has no storage and the game still plays, it just forgets.

/// Window LocalStorage, if the embedding allows it (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
}
