//! Terminal front end.
//!
//! `App` holds the editing and scroll state around a [`binder::QueryBinder`];
//! `runtime` owns the terminal and the event loop; `render` draws a frame
//! from the current query snapshot.

pub mod app;
pub mod binder;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod markdown;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
