//! Sunstone: a project discovery and strategy dashboard.
//!
//! Project records live in a local key-value store ([`db`]), are owned in
//! memory by a [`store::ProjectStore`], and are turned into display values by
//! the [`presenter`]. The [`dashboard::Dashboard`] ties these together with an
//! observer and an optional remote backend.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod observer;
pub mod presenter;
pub mod remote;
pub mod render;
pub mod store;
pub mod wizard;
