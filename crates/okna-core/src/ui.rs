//! Seams between the feature state machines and whatever renders the page.
//!
//! Features never touch a DOM. They listen on abstract [`Control`]s, write
//! through small view traits, and share one [`UiState`] for page-wide
//! concerns (scroll lock, theme). The wasm crate implements these traits
//! with web-sys; tests implement them with plain recorders.

mod events;
mod page;
mod state;

pub use events::*;
pub use page::*;
pub use state::*;
