//! Terminal client for the expense service.
//!
//! [`state::ExpenseState`] mirrors the server list with optimistic creates,
//! [`sort::SortMode`] orders it for display and [`app::App`] drives both from
//! a ratatui event loop.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod sort;
pub mod state;
pub mod ui;
