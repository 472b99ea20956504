//! Application state and controller for trek.
//!
//! [AppState] is the controller the terminal loop drives. It owns the navigation state
//! ([NavState]), the prompt ([actions]), the search and preview state, and the worker
//! channels. [keymap] maps keys to [keymap::Action]s, and the handlers implement them.

pub mod actions;
mod handlers;
pub mod keymap;
pub mod nav;
pub mod preview;
pub mod search;
pub mod state;

pub use actions::{ActionContext, Mode};
pub use keymap::{Action, Keymap};
pub use nav::NavState;
pub use preview::PreviewState;
pub use search::SearchState;
pub use state::{AppState, KeypressResult, Notice};
