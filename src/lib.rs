//! Terminal browser for a static book catalog.
//!
//! The catalog is filtered by title, author and genre into a [`pagination::ViewState`],
//! revealed a page at a time, and inspected through a detail overlay. [`app::App`]
//! owns all of that state and turns [`app::Action`]s into [`app::Signal`]s for the
//! ratatui front end in [`ui`].

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod pagination;
pub mod theme;
pub mod ui;
